//! Wishlist service

use serde::Serialize;
use std::sync::Arc;

use crate::{
    clock::Clock,
    error::AppResult,
    ids::{EntityKind, IdGenerator},
    models::wishlist::{WishlistAction, WishlistEntry, WishlistItem},
    repository::Repository,
};

/// Outcome of a wishlist toggle.
#[derive(Debug, Clone, Serialize)]
pub struct WishlistToggle {
    pub action: WishlistAction,
    pub message: String,
}

#[derive(Clone)]
pub struct WishlistService {
    repository: Repository,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl WishlistService {
    pub fn new(repository: Repository, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            ids,
            clock,
        }
    }

    /// Flip wishlist membership for a (user, book) pair.
    ///
    /// Each call flips state; two toggles cancel out.
    pub async fn toggle(&self, user_id: &str, book_id: &str) -> AppResult<WishlistToggle> {
        // The entry must reference a real book.
        let book = self.repository.books.get_by_id(book_id).await?;

        let entry = WishlistEntry {
            id: self.ids.generate(EntityKind::Wishlist),
            user_id: user_id.to_string(),
            book_id: book.id,
            added_at: self.clock.now(),
        };

        let action = self.repository.wishlist.toggle(&entry).await?;

        let message = match action {
            WishlistAction::Added => "Added to wishlist.".to_string(),
            WishlistAction::Removed => "Removed from wishlist.".to_string(),
        };

        Ok(WishlistToggle { action, message })
    }

    /// Check wishlist membership
    pub async fn contains(&self, user_id: &str, book_id: &str) -> AppResult<bool> {
        self.repository.wishlist.contains(user_id, book_id).await
    }

    /// Get a user's wishlist with catalog data
    pub async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<WishlistItem>> {
        self.repository.wishlist.list_for_user(user_id).await
    }
}
