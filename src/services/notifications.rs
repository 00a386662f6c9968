//! Notification feed service

use crate::{
    config::CirculationConfig, error::AppResult, models::notification::Notification,
    repository::Repository,
};

#[derive(Clone)]
pub struct NotificationsService {
    repository: Repository,
    circulation: CirculationConfig,
}

impl NotificationsService {
    pub fn new(repository: Repository, circulation: CirculationConfig) -> Self {
        Self {
            repository,
            circulation,
        }
    }

    /// Most recent notifications for a user, capped by configuration
    pub async fn feed_for_user(&self, user_id: &str) -> AppResult<Vec<Notification>> {
        self.repository
            .notifications
            .list_for_user(user_id, self.circulation.notification_limit)
            .await
    }

    /// Mark every notification for a user as read
    pub async fn mark_all_read(&self, user_id: &str) -> AppResult<()> {
        self.repository.notifications.mark_all_read(user_id).await
    }

    /// Unread count for UI badges
    pub async fn unread_count(&self, user_id: &str) -> AppResult<i64> {
        self.repository.notifications.count_unread(user_id).await
    }
}
