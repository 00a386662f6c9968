//! Catalog management service

use std::sync::Arc;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    ids::{EntityKind, IdGenerator},
    models::book::{Book, NewBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl CatalogService {
    pub fn new(repository: Repository, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            ids,
            clock,
        }
    }

    /// Add a book to the catalog. All copies start available.
    pub async fn add_book(&self, input: NewBook) -> AppResult<Book> {
        let title = input.title.trim();
        let author = input.author.trim();
        let category = input.category.trim();

        if title.is_empty() {
            return Err(AppError::Validation("Title cannot be empty.".to_string()));
        }
        if author.is_empty() {
            return Err(AppError::Validation("Author cannot be empty.".to_string()));
        }
        if category.is_empty() {
            return Err(AppError::Validation("Category cannot be empty.".to_string()));
        }
        if input.total_copies < 1 {
            return Err(AppError::Validation(
                "Copies must be at least 1.".to_string(),
            ));
        }

        let book = Book {
            id: self.ids.generate(EntityKind::Book),
            title: title.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            total_copies: input.total_copies,
            available_copies: input.total_copies,
            added_by: input.added_by,
            added_at: self.clock.now(),
            borrow_count: 0,
        };

        self.repository.books.create(&book).await?;

        tracing::info!(book_id = %book.id, title = %book.title, "book added to catalog");

        Ok(book)
    }

    /// Remove a book. Refused while any loan references it.
    pub async fn remove_book(&self, book_id: &str) -> AppResult<String> {
        let book = self.repository.books.remove(book_id).await?;

        tracing::info!(book_id = %book.id, title = %book.title, "book removed from catalog");

        Ok(format!("'{}' deleted.", book.title))
    }

    /// Get book by ID
    pub async fn get_book(&self, book_id: &str) -> AppResult<Book> {
        self.repository.books.get_by_id(book_id).await
    }

    /// List the full catalog in storage order
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    /// Case-insensitive substring search over title, author and category.
    ///
    /// A deliberate O(n) scan over the whole catalog; a blank query returns
    /// everything, and results keep the scan order.
    pub async fn search(&self, query: &str) -> AppResult<Vec<Book>> {
        let books = self.repository.books.list_all().await?;

        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Ok(books);
        }

        Ok(books
            .into_iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&q)
                    || b.author.to_lowercase().contains(&q)
                    || b.category.to_lowercase().contains(&q)
            })
            .collect())
    }
}
