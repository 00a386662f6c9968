//! Fines repository for database operations
//!
//! Append-only ledger; fine rows are written by the return flow in
//! `loans.rs` and only the `paid` flag is ever mutated afterwards.

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::fine::FineDetails,
};

#[derive(Clone)]
pub struct FinesRepository {
    pool: SqlitePool,
}

impl FinesRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get fines for a user, newest first.
    ///
    /// LEFT JOIN so a fine keeps showing up after its book was removed from
    /// the catalog.
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<FineDetails>> {
        let fines = sqlx::query_as::<_, FineDetails>(
            r#"
            SELECT f.*, b.title
            FROM fines f
            LEFT JOIN books b ON f.book_id = b.id
            WHERE f.user_id = ?
            ORDER BY f.created_at DESC, f.rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(fines)
    }

    /// Sum of unpaid fine amounts for a user
    pub async fn unpaid_total(&self, user_id: &str) -> AppResult<f64> {
        let total: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0.0) FROM fines WHERE user_id = ? AND paid = 0",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    /// Mark a fine as settled
    pub async fn mark_paid(&self, fine_id: &str) -> AppResult<()> {
        let updated = sqlx::query("UPDATE fines SET paid = 1 WHERE id = ?")
            .bind(fine_id)
            .execute(&self.pool)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("Fine not found.".to_string()));
        }

        Ok(())
    }
}
