//! Notifications repository for database operations

use sqlx::SqlitePool;

use crate::{error::AppResult, models::notification::Notification};

/// Insert a notification as part of an open transaction.
///
/// Operations that notify as a side effect (issue, return, request handling)
/// use this so the message commits or rolls back with the rest of the work.
pub(crate) async fn insert_in_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    notification: &Notification,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO notifications (id, user_id, message, kind, is_read, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&notification.id)
    .bind(&notification.user_id)
    .bind(&notification.message)
    .bind(notification.kind)
    .bind(notification.is_read)
    .bind(notification.created_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[derive(Clone)]
pub struct NotificationsRepository {
    pool: SqlitePool,
}

impl NotificationsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a standalone notification
    pub async fn create(&self, notification: &Notification) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;
        insert_in_tx(&mut tx, notification).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Get the most recent notifications for a user
    pub async fn list_for_user(&self, user_id: &str, limit: i64) -> AppResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    /// Mark every notification for a user as read
    pub async fn mark_all_read(&self, user_id: &str) -> AppResult<()> {
        sqlx::query("UPDATE notifications SET is_read = 1 WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Count unread notifications for a user
    pub async fn count_unread(&self, user_id: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = ? AND is_read = 0",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
