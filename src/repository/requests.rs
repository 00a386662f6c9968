//! Acquisition-requests repository for database operations

use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::{
        notification::Notification,
        request::{BookRequest, RequestStatus},
    },
    repository::notifications::insert_in_tx,
};

#[derive(Clone)]
pub struct RequestsRepository {
    pool: SqlitePool,
}

impl RequestsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get request by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<BookRequest> {
        sqlx::query_as::<_, BookRequest>("SELECT * FROM book_requests WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found.".to_string()))
    }

    /// Insert a pending request and fan out one notification per admin.
    pub async fn create(
        &self,
        request: &BookRequest,
        admin_notifications: &[Notification],
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO book_requests
                (id, user_id, user_name, book_title, author, reason,
                 status, admin_note, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&request.id)
        .bind(&request.user_id)
        .bind(&request.user_name)
        .bind(&request.book_title)
        .bind(&request.author)
        .bind(&request.reason)
        .bind(request.status)
        .bind(&request.admin_note)
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&mut *tx)
        .await?;

        for notification in admin_notifications {
            insert_in_tx(&mut tx, notification).await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Resolve a request and notify the requester, atomically.
    pub async fn resolve(
        &self,
        id: &str,
        status: RequestStatus,
        admin_note: &str,
        updated_at: NaiveDateTime,
        notification: &Notification,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE book_requests SET status = ?, admin_note = ?, updated_at = ? WHERE id = ?",
        )
        .bind(status)
        .bind(admin_note)
        .bind(updated_at)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("Request not found.".to_string()));
        }

        insert_in_tx(&mut tx, notification).await?;

        tx.commit().await?;

        Ok(())
    }

    /// List all requests, newest first
    pub async fn list_all(&self) -> AppResult<Vec<BookRequest>> {
        let requests = sqlx::query_as::<_, BookRequest>(
            "SELECT * FROM book_requests ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// List requests submitted by a user, newest first
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<BookRequest>> {
        let requests = sqlx::query_as::<_, BookRequest>(
            r#"
            SELECT * FROM book_requests
            WHERE user_id = ?
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Count requests still awaiting review
    pub async fn count_pending(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_requests WHERE status = ?")
                .bind(RequestStatus::Pending)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
