//! Reading history and ratings service

use crate::{
    error::{AppError, AppResult},
    models::history::{BookRating, HistoryEntry, Review},
    repository::Repository,
};

#[derive(Clone)]
pub struct HistoryService {
    repository: Repository,
}

impl HistoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Reading history for a user
    pub async fn history_for_user(&self, user_id: &str) -> AppResult<Vec<HistoryEntry>> {
        self.repository.history.list_for_user(user_id).await
    }

    /// Rate a completed loan, overwriting any earlier rating.
    ///
    /// Only the owner of the history entry may rate it; re-rating simply
    /// replaces the previous value.
    pub async fn rate(
        &self,
        actor_id: &str,
        history_id: &str,
        rating: i64,
        review: &str,
    ) -> AppResult<()> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::Validation(
                "Rating must be between 1 and 5.".to_string(),
            ));
        }

        let entry = self.repository.history.get_by_id(history_id).await?;
        if entry.user_id != actor_id {
            return Err(AppError::Authorization(
                "You can only rate books from your own reading history.".to_string(),
            ));
        }

        self.repository
            .history
            .set_rating(history_id, rating, review.trim())
            .await?;

        tracing::debug!(history_id = %history_id, rating, "rating saved");

        Ok(())
    }

    /// Average rating and count for a book; (0.0, 0) when unrated.
    pub async fn book_rating(&self, book_id: &str) -> AppResult<BookRating> {
        self.repository.history.book_rating(book_id).await
    }

    /// Reviews for a book with reviewer names
    pub async fn reviews_for_book(&self, book_id: &str) -> AppResult<Vec<Review>> {
        self.repository.history.reviews_for_book(book_id).await
    }
}
