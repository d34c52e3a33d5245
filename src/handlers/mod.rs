//! HTTP handlers module
//!
//! Route handlers for the JSON API, grouped by surface, plus the router
//! assembly. Handlers translate requests into repository calls and
//! serialize the results; no business state lives here.

pub mod events;
pub mod health;
pub mod locations;
pub mod media;
pub mod users;
pub mod venues;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::database::DatabaseService;
use crate::services::ServiceFactory;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseService,
    pub services: ServiceFactory,
}

impl AppState {
    pub fn new(db: DatabaseService, services: ServiceFactory) -> Self {
        Self { db, services }
    }
}

/// Assemble the application router.
///
/// Stored media files are served statically under `/media/`, mirroring
/// where the upload endpoint writes them.
pub fn build_router(state: AppState) -> Router {
    let media_dir = state.services.storage.root().to_path_buf();

    Router::new()
        .route("/api/health/", get(health::health_check))
        .merge(events::routes())
        .merge(venues::routes())
        .merge(locations::routes())
        .merge(media::routes())
        .merge(users::routes())
        .nest_service("/media", ServeDir::new(media_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
