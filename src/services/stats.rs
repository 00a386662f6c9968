//! Dashboard statistics service

use serde::Serialize;
use std::collections::HashSet;

use crate::{
    config::CirculationConfig, error::AppResult, models::book::Book, repository::Repository,
};

/// Aggregate catalog and circulation metrics for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryStats {
    pub total_books: i64,
    pub total_users: i64,
    pub active_loans: i64,
    pub pending_requests: i64,
    pub distinct_authors: usize,
    pub distinct_categories: usize,
    pub top_books: Vec<Book>,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
    circulation: CirculationConfig,
}

impl StatsService {
    pub fn new(repository: Repository, circulation: CirculationConfig) -> Self {
        Self {
            repository,
            circulation,
        }
    }

    /// Build the dashboard metrics.
    ///
    /// Distinct counts come from one pass over the catalog scan; the top-N
    /// ranking uses a stable sort so equal borrow counts keep scan order.
    pub async fn overview(&self) -> AppResult<LibraryStats> {
        let books = self.repository.books.list_all().await?;

        let distinct_authors: HashSet<&str> = books.iter().map(|b| b.author.as_str()).collect();
        let distinct_categories: HashSet<&str> =
            books.iter().map(|b| b.category.as_str()).collect();

        let stats = LibraryStats {
            total_books: self.repository.books.count().await?,
            total_users: self.repository.users.count().await?,
            active_loans: self.repository.loans.count_active().await?,
            pending_requests: self.repository.requests.count_pending().await?,
            distinct_authors: distinct_authors.len(),
            distinct_categories: distinct_categories.len(),
            top_books: top_by_borrow_count(books, self.circulation.top_books),
        };

        Ok(stats)
    }
}

/// Top-N books by borrow count, descending; ties keep the input order.
fn top_by_borrow_count(mut books: Vec<Book>, n: usize) -> Vec<Book> {
    books.sort_by(|a, b| b.borrow_count.cmp(&a.borrow_count));
    books.truncate(n);
    books
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn book(id: &str, borrow_count: i64) -> Book {
        Book {
            id: id.to_string(),
            title: id.to_string(),
            author: "a".to_string(),
            category: "c".to_string(),
            total_copies: 1,
            available_copies: 1,
            added_by: "USR-1".to_string(),
            added_at: NaiveDate::from_ymd_opt(2026, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .expect("valid date"),
            borrow_count,
        }
    }

    #[test]
    fn top_books_sort_is_stable_for_ties() {
        let books = vec![book("first", 2), book("second", 5), book("third", 2)];
        let top = top_by_borrow_count(books, 3);
        assert_eq!(top[0].id, "second");
        assert_eq!(top[1].id, "first");
        assert_eq!(top[2].id, "third");
    }

    #[test]
    fn top_books_truncates_to_n() {
        let books = vec![book("a", 1), book("b", 2), book("c", 3)];
        assert_eq!(top_by_borrow_count(books, 2).len(), 2);
    }
}
