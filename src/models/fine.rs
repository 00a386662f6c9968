//! Fine model

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// Penalty record created when a loan is returned after its due date.
///
/// Immutable once created except for the `paid` flag. `loan_id` references
/// the loan that was deleted at return time.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Fine {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub loan_id: String,
    pub days_late: i64,
    pub amount: f64,
    pub paid: bool,
    pub created_at: NaiveDateTime,
}

/// Fine joined with its book title for display.
///
/// The title is optional because fines outlive book deletion.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FineDetails {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub loan_id: String,
    pub days_late: i64,
    pub amount: f64,
    pub paid: bool,
    pub created_at: NaiveDateTime,
    pub title: Option<String>,
}
