//! Business logic services
//!
//! All domain rules live here. Services read current state through the
//! repository, apply the rules and write through it; the caller supplies
//! actor identity explicitly — nothing here reads ambient session state.

pub mod catalog;
pub mod fines;
pub mod history;
pub mod loans;
pub mod notifications;
pub mod requests;
pub mod stats;
pub mod users;
pub mod wishlist;

use std::sync::Arc;

use crate::{clock::Clock, config::CirculationConfig, ids::IdGenerator, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub fines: fines::FinesService,
    pub history: history::HistoryService,
    pub requests: requests::RequestsService,
    pub wishlist: wishlist::WishlistService,
    pub notifications: notifications::NotificationsService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository and capabilities
    pub fn new(
        repository: Repository,
        circulation: CirculationConfig,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users: users::UsersService::new(repository.clone(), ids.clone(), clock.clone()),
            catalog: catalog::CatalogService::new(repository.clone(), ids.clone(), clock.clone()),
            loans: loans::LoansService::new(
                repository.clone(),
                circulation.clone(),
                ids.clone(),
                clock.clone(),
            ),
            fines: fines::FinesService::new(repository.clone()),
            history: history::HistoryService::new(repository.clone()),
            requests: requests::RequestsService::new(
                repository.clone(),
                ids.clone(),
                clock.clone(),
            ),
            wishlist: wishlist::WishlistService::new(repository.clone(), ids.clone(), clock),
            notifications: notifications::NotificationsService::new(
                repository.clone(),
                circulation.clone(),
            ),
            stats: stats::StatsService::new(repository, circulation),
        }
    }
}
