//! Loans repository for database operations
//!
//! Issue and return are multi-table mutations (availability counters, the
//! loan row itself, history, fines, notifications), so both run inside a
//! single transaction: a failure partway leaves no partial state, and two
//! competing issues for the last copy are serialized by the store.

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::{
        fine::Fine,
        history::HistoryEntry,
        loan::{Loan, LoanDetails, LoanOverview},
        notification::Notification,
    },
    repository::notifications::insert_in_tx,
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: SqlitePool,
}

impl LoansRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the active loan for a (book, user) pair, if any
    pub async fn get_for_pair(&self, book_id: &str, user_id: &str) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE book_id = ? AND user_id = ?",
        )
        .bind(book_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(loan)
    }

    /// Record a new loan: one copy leaves the shelf, the borrow counter goes
    /// up, the loan row is inserted and the borrower is notified.
    pub async fn create_issue(&self, loan: &Loan, notification: &Notification) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let title: String = sqlx::query_scalar("SELECT title FROM books WHERE id = ?")
            .bind(&loan.book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found. Check the book ID.".to_string()))?;

        // Conditional update doubles as the out-of-stock check. Availability
        // is checked first, so a borrower re-requesting the last copy they
        // hold sees out-of-stock, not the duplicate-loan conflict. A failure
        // below rolls the decrement back with the rest of the transaction.
        let updated = sqlx::query(
            r#"
            UPDATE books
            SET available_copies = available_copies - 1,
                borrow_count = borrow_count + 1
            WHERE id = ? AND available_copies >= 1
            "#,
        )
        .bind(&loan.book_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::OutOfStock(format!(
                "'{}' is fully issued. No copies available.",
                title
            )));
        }

        let already_issued: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM loans WHERE book_id = ? AND user_id = ?)",
        )
        .bind(&loan.book_id)
        .bind(&loan.user_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_issued {
            return Err(AppError::Conflict(
                "You already have this book on loan.".to_string(),
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO loans (id, book_id, user_id, issue_date, due_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&loan.id)
        .bind(&loan.book_id)
        .bind(&loan.user_id)
        .bind(loan.issue_date)
        .bind(loan.due_date)
        .execute(&mut *tx)
        .await?;

        insert_in_tx(&mut tx, notification).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Close a loan: archive it to reading history, restore the copy, record
    /// the fine when one applies and notify the borrower.
    pub async fn finalize_return(
        &self,
        loan_id: &str,
        history: &HistoryEntry,
        fine: Option<&Fine>,
        notification: &Notification,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM loans WHERE id = ?")
            .bind(loan_id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "No active loan found for this book under your account.".to_string(),
            ));
        }

        sqlx::query(
            r#"
            INSERT INTO reading_history
                (id, user_id, book_id, title, author, category,
                 returned_at, days_kept, rating, review)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&history.id)
        .bind(&history.user_id)
        .bind(&history.book_id)
        .bind(&history.title)
        .bind(&history.author)
        .bind(&history.category)
        .bind(history.returned_at)
        .bind(history.days_kept)
        .bind(history.rating)
        .bind(&history.review)
        .execute(&mut *tx)
        .await?;

        // The copy comes back to the shelf; borrow_count is untouched here.
        sqlx::query("UPDATE books SET available_copies = available_copies + 1 WHERE id = ?")
            .bind(&history.book_id)
            .execute(&mut *tx)
            .await?;

        if let Some(fine) = fine {
            sqlx::query(
                r#"
                INSERT INTO fines
                    (id, user_id, book_id, loan_id, days_late, amount, paid, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&fine.id)
            .bind(&fine.user_id)
            .bind(&fine.book_id)
            .bind(&fine.loan_id)
            .bind(fine.days_late)
            .bind(fine.amount)
            .bind(fine.paid)
            .bind(fine.created_at)
            .execute(&mut *tx)
            .await?;
        }

        insert_in_tx(&mut tx, notification).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Get active loans for a user, most recent first
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<LoanDetails>> {
        let loans = sqlx::query_as::<_, LoanDetails>(
            r#"
            SELECT l.id, l.book_id, l.user_id, l.issue_date, l.due_date,
                   b.title, b.author, b.category
            FROM loans l
            JOIN books b ON l.book_id = b.id
            WHERE l.user_id = ?
            ORDER BY l.issue_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// Get every active loan with book and borrower details
    pub async fn list_all(&self) -> AppResult<Vec<LoanOverview>> {
        let loans = sqlx::query_as::<_, LoanOverview>(
            r#"
            SELECT l.id, l.book_id, l.user_id, l.issue_date, l.due_date,
                   b.title, u.name AS borrower_name, u.email AS borrower_email
            FROM loans l
            JOIN books b ON l.book_id = b.id
            JOIN users u ON l.user_id = u.id
            ORDER BY l.issue_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// Count active loans
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
