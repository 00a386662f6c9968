//! Acquisition-request models

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Request lifecycle: pending -> approved or pending -> rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Admin decision on a pending request. Keeping this separate from
/// [`RequestStatus`] makes "respond with pending" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDecision {
    Approved,
    Rejected,
}

impl RequestDecision {
    pub fn status(&self) -> RequestStatus {
        match self {
            RequestDecision::Approved => RequestStatus::Approved,
            RequestDecision::Rejected => RequestStatus::Rejected,
        }
    }
}

/// A user's ask for the library to acquire a title.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookRequest {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub book_title: String,
    pub author: String,
    pub reason: String,
    pub status: RequestStatus,
    pub admin_note: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Submit request input
#[derive(Debug, Clone, Deserialize)]
pub struct NewRequest {
    pub user_id: String,
    pub user_name: String,
    pub book_title: String,
    pub author: String,
    pub reason: String,
}
