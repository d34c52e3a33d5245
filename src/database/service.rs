//! Database service layer
//!
//! This module bundles the per-aggregate repositories behind one constructor,
//! so handlers receive a single injected data-store dependency.

use crate::database::{
    DatabasePool, EventRepository, LocationRepository, MediaRepository, UserRepository,
    VenueDetailsRepository, VenueRepository,
};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub locations: LocationRepository,
    pub venues: VenueRepository,
    pub venue_details: VenueDetailsRepository,
    pub events: EventRepository,
    pub media: MediaRepository,
    pub users: UserRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            locations: LocationRepository::new(pool.clone()),
            venues: VenueRepository::new(pool.clone()),
            venue_details: VenueDetailsRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            media: MediaRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }
}
