//! Acquisition-request service

use std::sync::Arc;

use crate::{
    clock::Clock,
    error::{AppError, AppResult},
    ids::{EntityKind, IdGenerator},
    models::{
        notification::{Notification, NotificationKind},
        request::{BookRequest, NewRequest, RequestDecision, RequestStatus},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RequestsService {
    repository: Repository,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl RequestsService {
    pub fn new(repository: Repository, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            ids,
            clock,
        }
    }

    /// Submit an acquisition request and notify every administrator.
    pub async fn submit(&self, input: NewRequest) -> AppResult<BookRequest> {
        let book_title = input.book_title.trim().to_string();
        if book_title.is_empty() {
            return Err(AppError::Validation(
                "Book title is required.".to_string(),
            ));
        }

        let now = self.clock.now();
        let request = BookRequest {
            id: self.ids.generate(EntityKind::Request),
            user_id: input.user_id,
            user_name: input.user_name,
            book_title,
            author: input.author.trim().to_string(),
            reason: input.reason.trim().to_string(),
            status: RequestStatus::Pending,
            admin_note: String::new(),
            created_at: now,
            updated_at: now,
        };

        let admins = self.repository.users.list_admins().await?;
        let admin_notifications: Vec<Notification> = admins
            .iter()
            .map(|admin| Notification {
                id: self.ids.generate(EntityKind::Notification),
                user_id: admin.id.clone(),
                message: format!(
                    "New request from {}: '{}'",
                    request.user_name, request.book_title
                ),
                kind: NotificationKind::Info,
                is_read: false,
                created_at: now,
            })
            .collect();

        self.repository
            .requests
            .create(&request, &admin_notifications)
            .await?;

        tracing::info!(request_id = %request.id, user_id = %request.user_id, "request submitted");

        Ok(request)
    }

    /// Resolve a request and notify the requester with the outcome.
    ///
    /// Re-resolving an already-handled request is allowed and simply
    /// overwrites the previous decision, notifying the requester again.
    pub async fn respond(
        &self,
        request_id: &str,
        decision: RequestDecision,
        note: &str,
        admin_name: &str,
    ) -> AppResult<String> {
        let request = self.repository.requests.get_by_id(request_id).await?;

        let status = decision.status();
        let note = note.trim();
        let now = self.clock.now();

        let mut message = format!(
            "Your request for '{}' was {}.",
            request.book_title, status
        );
        if !note.is_empty() {
            message.push_str(&format!(" Admin note: {}", note));
        }

        let notification = Notification {
            id: self.ids.generate(EntityKind::Notification),
            user_id: request.user_id.clone(),
            message,
            kind: match decision {
                RequestDecision::Approved => NotificationKind::Success,
                RequestDecision::Rejected => NotificationKind::Warning,
            },
            is_read: false,
            created_at: now,
        };

        self.repository
            .requests
            .resolve(request_id, status, note, now, &notification)
            .await?;

        tracing::info!(
            request_id = %request_id,
            status = %status,
            admin = %admin_name,
            "request resolved"
        );

        Ok(format!("Request {} and requester notified.", status))
    }

    /// List all requests
    pub async fn list_all(&self) -> AppResult<Vec<BookRequest>> {
        self.repository.requests.list_all().await
    }

    /// List requests submitted by a user
    pub async fn requests_for_user(&self, user_id: &str) -> AppResult<Vec<BookRequest>> {
        self.repository.requests.list_for_user(user_id).await
    }

    /// Count requests awaiting review
    pub async fn pending_count(&self) -> AppResult<i64> {
        self.repository.requests.count_pending().await
    }
}
