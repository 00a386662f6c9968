//! Reading-history repository for database operations

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::history::{BookRating, HistoryEntry, Review},
};

#[derive(Clone)]
pub struct HistoryRepository {
    pool: SqlitePool,
}

impl HistoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get history entry by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<HistoryEntry> {
        sqlx::query_as::<_, HistoryEntry>("SELECT * FROM reading_history WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("History entry not found.".to_string()))
    }

    /// Get reading history for a user, most recent return first
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<HistoryEntry>> {
        let entries = sqlx::query_as::<_, HistoryEntry>(
            r#"
            SELECT * FROM reading_history
            WHERE user_id = ?
            ORDER BY returned_at DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Overwrite the rating and review on an entry
    pub async fn set_rating(&self, id: &str, rating: i64, review: &str) -> AppResult<()> {
        sqlx::query("UPDATE reading_history SET rating = ?, review = ? WHERE id = ?")
            .bind(rating)
            .bind(review)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Average rating and rating count for a book, over rated entries only
    pub async fn book_rating(&self, book_id: &str) -> AppResult<BookRating> {
        let (average, count): (Option<f64>, i64) = sqlx::query_as(
            "SELECT AVG(rating), COUNT(*) FROM reading_history WHERE book_id = ? AND rating > 0",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(BookRating {
            average: (average.unwrap_or(0.0) * 10.0).round() / 10.0,
            count,
        })
    }

    /// Get reviews for a book with reviewer names
    pub async fn reviews_for_book(&self, book_id: &str) -> AppResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT rh.id, rh.user_id, rh.book_id, rh.returned_at,
                   rh.rating, rh.review, u.name AS reviewer_name
            FROM reading_history rh
            JOIN users u ON rh.user_id = u.id
            WHERE rh.book_id = ? AND rh.review != ''
            ORDER BY rh.returned_at DESC
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }
}
