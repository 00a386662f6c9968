//! Wishlist models

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// Save-for-later entry; unique per (user_id, book_id).
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WishlistEntry {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub added_at: NaiveDateTime,
}

/// Wishlist entry joined with catalog data for display.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WishlistItem {
    pub id: String,
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub available_copies: i64,
    pub added_at: NaiveDateTime,
}

/// Outcome of a wishlist toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WishlistAction {
    Added,
    Removed,
}
