//! Notification model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Per-user message emitted as a side effect of other operations.
/// Mutated only to flip `is_read`; never deleted.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    pub message: String,
    pub kind: NotificationKind,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}
