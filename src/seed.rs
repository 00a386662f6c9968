//! Demo data seeding
//!
//! Populates an empty database with a default admin account, a handful of
//! student accounts and a starter catalog. Safe to run repeatedly: nothing
//! is inserted once users or books exist.

use crate::{
    error::AppResult,
    models::{book::NewBook, user::{RegisterUser, Role}},
    repository::Repository,
    services::Services,
};

const DEFAULT_ADMIN_EMAIL: &str = "admin@library.com";
const DEFAULT_ADMIN_PASSWORD: &str = "Admin@123";

const DEMO_BOOKS: &[(&str, &str, &str, i64)] = &[
    ("Dune", "Frank Herbert", "Sci-Fi", 3),
    ("Clean Code", "Robert C. Martin", "Programming", 2),
    ("The Great Gatsby", "F. Scott Fitzgerald", "Classic", 4),
    ("Atomic Habits", "James Clear", "Self-Help", 5),
    ("1984", "George Orwell", "Dystopian", 3),
    ("Sapiens", "Yuval Noah Harari", "History", 3),
    ("The Alchemist", "Paulo Coelho", "Fiction", 4),
    ("Neuromancer", "William Gibson", "Sci-Fi", 2),
    ("Deep Work", "Cal Newport", "Self-Help", 3),
    ("The Pragmatic Programmer", "David Thomas", "Programming", 2),
];

const DEMO_STUDENTS: &[(&str, &str)] = &[
    ("Alice Kumar", "alice@student.com"),
    ("Bob Singh", "bob@student.com"),
    ("Zara Ahmed", "zara@student.com"),
];

/// Seed demo data into an empty database.
pub async fn seed_demo_data(repository: &Repository, services: &Services) -> AppResult<()> {
    if repository.users.count().await? > 0 {
        tracing::debug!("database already seeded, skipping");
        return Ok(());
    }

    let admin = services
        .users
        .register(RegisterUser {
            name: "Super Admin".to_string(),
            email: DEFAULT_ADMIN_EMAIL.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            role: Role::Admin,
        })
        .await?;

    for (name, email) in DEMO_STUDENTS {
        services
            .users
            .register(RegisterUser {
                name: name.to_string(),
                email: email.to_string(),
                password: "Student@123".to_string(),
                role: Role::Student,
            })
            .await?;
    }

    for (title, author, category, copies) in DEMO_BOOKS {
        services
            .catalog
            .add_book(NewBook {
                title: title.to_string(),
                author: author.to_string(),
                category: category.to_string(),
                total_copies: *copies,
                added_by: admin.id.clone(),
            })
            .await?;
    }

    tracing::info!(
        books = DEMO_BOOKS.len(),
        students = DEMO_STUDENTS.len(),
        admin_email = DEFAULT_ADMIN_EMAIL,
        "demo data seeded"
    );

    Ok(())
}
