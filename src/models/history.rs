//! Reading-history models and rating aggregates

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// Permanent record of a completed loan.
///
/// Book data is denormalized so the entry survives catalog deletions.
/// `rating` is 0 while unrated, 1..=5 afterwards.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HistoryEntry {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub returned_at: NaiveDateTime,
    pub days_kept: i64,
    pub rating: i64,
    pub review: String,
}

/// Review joined with the reviewer's name.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub returned_at: NaiveDateTime,
    pub rating: i64,
    pub review: String,
    pub reviewer_name: String,
}

/// Rating aggregate for one book, over rated entries only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BookRating {
    /// Average rating rounded to one decimal; 0.0 when no ratings exist.
    pub average: f64,
    pub count: i64,
}
