//! Fine ledger service

use crate::{error::AppResult, models::fine::FineDetails, repository::Repository};

#[derive(Clone)]
pub struct FinesService {
    repository: Repository,
}

impl FinesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Fines for a user together with the unpaid total
    pub async fn fines_for_user(&self, user_id: &str) -> AppResult<(Vec<FineDetails>, f64)> {
        let fines = self.repository.fines.list_for_user(user_id).await?;
        let total = self.repository.fines.unpaid_total(user_id).await?;
        Ok((fines, total))
    }

    /// Sum of unpaid fine amounts for a user
    pub async fn unpaid_total(&self, user_id: &str) -> AppResult<f64> {
        self.repository.fines.unpaid_total(user_id).await
    }

    /// Mark a fine as settled.
    pub async fn mark_paid(&self, fine_id: &str) -> AppResult<()> {
        self.repository.fines.mark_paid(fine_id).await?;
        tracing::info!(fine_id = %fine_id, "fine marked paid");
        Ok(())
    }
}
