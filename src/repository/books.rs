//! Books repository for database operations

use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: SqlitePool,
}

impl BooksRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found. Check the book ID.".to_string()))
    }

    /// Insert a new book
    pub async fn create(&self, book: &Book) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO books
                (id, title, author, category, total_copies, available_copies,
                 added_by, added_at, borrow_count)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.category)
        .bind(book.total_copies)
        .bind(book.available_copies)
        .bind(&book.added_by)
        .bind(book.added_at)
        .bind(book.borrow_count)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List the whole catalog, newest first.
    ///
    /// The secondary rowid key keeps the order total so searches and top-book
    /// tie-breaks are stable across calls.
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT * FROM books ORDER BY added_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Delete a book, refusing while any loan still references it.
    pub async fn remove(&self, id: &str) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found.".to_string()))?;

        let on_loan: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM loans WHERE book_id = ?)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;

        if on_loan {
            return Err(AppError::Conflict(
                "Cannot delete: book has active loans.".to_string(),
            ));
        }

        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(book)
    }

    /// Count catalog entries
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
