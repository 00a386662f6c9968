//! Shared test harness
//!
//! Every test runs against its own in-memory SQLite database (a single
//! connection, so the pool never hands out a second, empty `:memory:` db)
//! with migrations applied and the clock pinned to a fixed date.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

use libris::{
    clock::FixedClock,
    config::CirculationConfig,
    ids::UuidIdGenerator,
    models::{
        book::{Book, NewBook},
        user::{RegisterUser, Role, User},
    },
    repository::Repository,
    services::Services,
};

pub const TEST_PASSWORD: &str = "Str0ng@pass1";

pub struct TestApp {
    pub services: Services,
    pub repository: Repository,
    pub clock: Arc<FixedClock>,
}

pub fn start_of_term() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .expect("valid date")
}

pub async fn setup() -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    let clock = Arc::new(FixedClock::new(start_of_term()));
    let repository = Repository::new(pool);
    let services = Services::new(
        repository.clone(),
        CirculationConfig::default(),
        Arc::new(UuidIdGenerator),
        clock.clone(),
    );

    TestApp {
        services,
        repository,
        clock,
    }
}

impl TestApp {
    pub async fn register_student(&self, name: &str, email: &str) -> User {
        self.services
            .users
            .register(RegisterUser {
                name: name.to_string(),
                email: email.to_string(),
                password: TEST_PASSWORD.to_string(),
                role: Role::Student,
            })
            .await
            .expect("failed to register student")
    }

    pub async fn register_admin(&self, name: &str, email: &str) -> User {
        self.services
            .users
            .register(RegisterUser {
                name: name.to_string(),
                email: email.to_string(),
                password: TEST_PASSWORD.to_string(),
                role: Role::Admin,
            })
            .await
            .expect("failed to register admin")
    }

    pub async fn add_book(&self, admin: &User, title: &str, copies: i64) -> Book {
        self.add_book_full(admin, title, "Test Author", "Test Category", copies)
            .await
    }

    pub async fn add_book_full(
        &self,
        admin: &User,
        title: &str,
        author: &str,
        category: &str,
        copies: i64,
    ) -> Book {
        self.services
            .catalog
            .add_book(NewBook {
                title: title.to_string(),
                author: author.to_string(),
                category: category.to_string(),
                total_copies: copies,
                added_by: admin.id.clone(),
            })
            .await
            .expect("failed to add book")
    }

    /// Fetch the book back to assert on its counters.
    pub async fn book(&self, book_id: &str) -> Book {
        self.repository
            .books
            .get_by_id(book_id)
            .await
            .expect("book should exist")
    }
}
