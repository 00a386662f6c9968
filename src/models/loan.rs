//! Loan models and derived views

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// An outstanding issue of one copy of a book to one user.
///
/// At most one loan exists per (book_id, user_id) pair at a time. A loan is
/// deleted on return and replaced by a reading-history entry; there is no
/// stored "overdue" state, lateness is derived from `due_date`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Loan {
    pub id: String,
    pub book_id: String,
    pub user_id: String,
    pub issue_date: NaiveDateTime,
    pub due_date: NaiveDateTime,
}

/// Loan joined with its book, as listed for the borrower.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LoanDetails {
    pub id: String,
    pub book_id: String,
    pub user_id: String,
    pub issue_date: NaiveDateTime,
    pub due_date: NaiveDateTime,
    pub title: String,
    pub author: String,
    pub category: String,
}

/// Loan joined with book and borrower, as listed for administrators.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LoanOverview {
    pub id: String,
    pub book_id: String,
    pub user_id: String,
    pub issue_date: NaiveDateTime,
    pub due_date: NaiveDateTime,
    pub title: String,
    pub borrower_name: String,
    pub borrower_email: String,
}

/// Borrower-facing view of an active loan with derived lateness fields.
///
/// `projected_fine` is informational only; nothing is persisted until the
/// book is actually returned.
#[derive(Debug, Clone, Serialize)]
pub struct LoanView {
    #[serde(flatten)]
    pub loan: LoanDetails,
    pub days_left: i64,
    pub is_overdue: bool,
    pub projected_fine: f64,
}
