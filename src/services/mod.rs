//! Services module
//!
//! This module contains business logic services

pub mod aggregation;
pub mod auth;
pub mod media;

// Re-export commonly used services
pub use aggregation::{AggregationService, LocationsView, POPULAR_CITY_LIMIT};
pub use auth::{AuthService, TokenClaims};
pub use media::{MediaStorage, StoredFile};

use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub aggregation: AggregationService,
    pub auth: AuthService,
    pub storage: MediaStorage,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings, database: &DatabaseService) -> Self {
        let aggregation =
            AggregationService::new(database.venues.clone(), database.locations.clone());
        let auth = AuthService::new(settings.auth.clone());
        let storage = MediaStorage::new(settings.media.root.clone());

        Self {
            aggregation,
            auth,
            storage,
        }
    }
}
