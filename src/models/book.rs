//! Book model and catalog input types

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catalog entry with copy-availability counters.
///
/// `0 <= available_copies <= total_copies` holds at all times;
/// `borrow_count` only ever increases.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub total_copies: i64,
    pub available_copies: i64,
    pub added_by: String,
    pub added_at: NaiveDateTime,
    pub borrow_count: i64,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }
}

/// Create book request
#[derive(Debug, Clone, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub category: String,
    pub total_copies: i64,
    pub added_by: String,
}
