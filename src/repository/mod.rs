//! Repository layer for database operations

pub mod books;
pub mod fines;
pub mod history;
pub mod loans;
pub mod notifications;
pub mod requests;
pub mod users;
pub mod wishlist;

use sqlx::SqlitePool;

/// Main repository struct holding the database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: SqlitePool,
    pub users: users::UsersRepository,
    pub books: books::BooksRepository,
    pub loans: loans::LoansRepository,
    pub fines: fines::FinesRepository,
    pub history: history::HistoryRepository,
    pub requests: requests::RequestsRepository,
    pub notifications: notifications::NotificationsRepository,
    pub wishlist: wishlist::WishlistRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            loans: loans::LoansRepository::new(pool.clone()),
            fines: fines::FinesRepository::new(pool.clone()),
            history: history::HistoryRepository::new(pool.clone()),
            requests: requests::RequestsRepository::new(pool.clone()),
            notifications: notifications::NotificationsRepository::new(pool.clone()),
            wishlist: wishlist::WishlistRepository::new(pool.clone()),
            pool,
        }
    }
}
