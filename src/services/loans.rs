//! Loan circulation service: issue, return, lateness views
//!
//! State machine per (book, user) pair: none -> issued -> none, with the
//! completed loan archived to reading history on return. Overdue-ness is
//! never stored; it is derived from `due_date` against the clock.

use chrono::Duration;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    clock::Clock,
    config::CirculationConfig,
    error::AppResult,
    ids::{EntityKind, IdGenerator},
    models::{
        fine::Fine,
        history::HistoryEntry,
        loan::{Loan, LoanOverview, LoanView},
        notification::{Notification, NotificationKind},
    },
    repository::Repository,
};

/// Outcome of a successful issue.
#[derive(Debug, Clone, Serialize)]
pub struct IssueReceipt {
    pub loan_id: String,
    pub due_date: chrono::NaiveDateTime,
    pub message: String,
}

/// Outcome of a successful return.
#[derive(Debug, Clone, Serialize)]
pub struct ReturnReceipt {
    pub days_late: i64,
    pub fine: f64,
    pub message: String,
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    circulation: CirculationConfig,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl LoansService {
    pub fn new(
        repository: Repository,
        circulation: CirculationConfig,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            circulation,
            ids,
            clock,
        }
    }

    /// Issue one copy of a book to a user.
    ///
    /// Fails when the book is unknown, no copy is available, or the user
    /// already holds this book. Availability decrement, loan insert and the
    /// borrower notification are applied atomically.
    pub async fn issue(&self, book_id: &str, user_id: &str) -> AppResult<IssueReceipt> {
        // Resolve both ends first so unknown IDs surface as not-found
        // before any state changes.
        let user = self.repository.users.get_by_id(user_id).await?;
        let book = self.repository.books.get_by_id(book_id).await?;

        let now = self.clock.now();
        let due_date = now + Duration::days(self.circulation.loan_period_days);

        let loan = Loan {
            id: self.ids.generate(EntityKind::Loan),
            book_id: book.id.clone(),
            user_id: user.id.clone(),
            issue_date: now,
            due_date,
        };

        let notification = Notification {
            id: self.ids.generate(EntityKind::Notification),
            user_id: user.id.clone(),
            message: format!("'{}' issued. Due: {}", book.title, due_date.format("%Y-%m-%d")),
            kind: NotificationKind::Info,
            is_read: false,
            created_at: now,
        };

        self.repository.loans.create_issue(&loan, &notification).await?;

        tracing::info!(loan_id = %loan.id, book_id = %book.id, user_id = %user.id, "book issued");

        Ok(IssueReceipt {
            loan_id: loan.id,
            due_date,
            message: format!("'{}' issued! Due: {}", book.title, due_date.format("%Y-%m-%d")),
        })
    }

    /// Return a borrowed book.
    ///
    /// Archives the loan to reading history, restores the copy, and records
    /// a fine of `days_late * fine_per_day` when returned past the due date.
    pub async fn return_book(&self, book_id: &str, user_id: &str) -> AppResult<ReturnReceipt> {
        let loan = self
            .repository
            .loans
            .get_for_pair(book_id, user_id)
            .await?
            .ok_or_else(|| {
                crate::error::AppError::NotFound(
                    "No active loan found for this book under your account.".to_string(),
                )
            })?;

        let book = self.repository.books.get_by_id(book_id).await?;

        let now = self.clock.now();
        let days_late = (now - loan.due_date).num_days().max(0);
        let days_kept = (now - loan.issue_date).num_days().max(1);
        let fine_amount = days_late as f64 * self.circulation.fine_per_day;

        let history = HistoryEntry {
            id: self.ids.generate(EntityKind::History),
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            title: book.title.clone(),
            author: book.author.clone(),
            category: book.category.clone(),
            returned_at: now,
            days_kept,
            rating: 0,
            review: String::new(),
        };

        let (fine, message, kind) = if days_late > 0 {
            let fine = Fine {
                id: self.ids.generate(EntityKind::Fine),
                user_id: user_id.to_string(),
                book_id: book_id.to_string(),
                loan_id: loan.id.clone(),
                days_late,
                amount: fine_amount,
                paid: false,
                created_at: now,
            };
            let message = format!(
                "'{}' returned. {} day(s) late, fine {:.2}.",
                book.title, days_late, fine_amount
            );
            (Some(fine), message, NotificationKind::Warning)
        } else {
            (
                None,
                format!("'{}' returned on time! No fine.", book.title),
                NotificationKind::Success,
            )
        };

        let notification = Notification {
            id: self.ids.generate(EntityKind::Notification),
            user_id: user_id.to_string(),
            message: message.clone(),
            kind,
            is_read: false,
            created_at: now,
        };

        self.repository
            .loans
            .finalize_return(&loan.id, &history, fine.as_ref(), &notification)
            .await?;

        tracing::info!(
            loan_id = %loan.id,
            book_id = %book_id,
            user_id = %user_id,
            days_late,
            "book returned"
        );

        Ok(ReturnReceipt {
            days_late,
            fine: fine.map(|f| f.amount).unwrap_or(0.0),
            message,
        })
    }

    /// Active loans for a user with derived lateness fields.
    pub async fn loans_for_user(&self, user_id: &str) -> AppResult<Vec<LoanView>> {
        let loans = self.repository.loans.list_for_user(user_id).await?;
        let now = self.clock.now();

        Ok(loans
            .into_iter()
            .map(|loan| {
                let days_left = (loan.due_date - now).num_days();
                let is_overdue = days_left < 0;
                let projected_fine = if is_overdue {
                    days_left.unsigned_abs() as f64 * self.circulation.fine_per_day
                } else {
                    0.0
                };
                LoanView {
                    loan,
                    days_left,
                    is_overdue,
                    projected_fine,
                }
            })
            .collect())
    }

    /// Every active loan, for the admin dashboard
    pub async fn list_all(&self) -> AppResult<Vec<LoanOverview>> {
        self.repository.loans.list_all().await
    }
}
