//! Wishlist repository for database operations

use sqlx::SqlitePool;

use crate::{
    error::AppResult,
    models::wishlist::{WishlistAction, WishlistEntry, WishlistItem},
};

#[derive(Clone)]
pub struct WishlistRepository {
    pool: SqlitePool,
}

impl WishlistRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Flip wishlist membership for a (user, book) pair.
    ///
    /// The check and the mutation share one transaction so two toggles
    /// cannot interleave into a duplicate entry.
    pub async fn toggle(&self, entry: &WishlistEntry) -> AppResult<WishlistAction> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<String> = sqlx::query_scalar(
            "SELECT id FROM wishlist WHERE user_id = ? AND book_id = ?",
        )
        .bind(&entry.user_id)
        .bind(&entry.book_id)
        .fetch_optional(&mut *tx)
        .await?;

        let action = match existing {
            Some(id) => {
                sqlx::query("DELETE FROM wishlist WHERE id = ?")
                    .bind(&id)
                    .execute(&mut *tx)
                    .await?;
                WishlistAction::Removed
            }
            None => {
                sqlx::query(
                    "INSERT INTO wishlist (id, user_id, book_id, added_at) VALUES (?, ?, ?, ?)",
                )
                .bind(&entry.id)
                .bind(&entry.user_id)
                .bind(&entry.book_id)
                .bind(entry.added_at)
                .execute(&mut *tx)
                .await?;
                WishlistAction::Added
            }
        };

        tx.commit().await?;

        Ok(action)
    }

    /// Check wishlist membership
    pub async fn contains(&self, user_id: &str, book_id: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM wishlist WHERE user_id = ? AND book_id = ?)",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Get a user's wishlist joined with catalog data, newest first
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<WishlistItem>> {
        let items = sqlx::query_as::<_, WishlistItem>(
            r#"
            SELECT w.id, w.book_id, b.title, b.author, b.category,
                   b.available_copies, w.added_at
            FROM wishlist w
            JOIN books b ON w.book_id = b.id
            WHERE w.user_id = ?
            ORDER BY w.added_at DESC, w.rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}
