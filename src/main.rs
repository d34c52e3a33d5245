//! VenueHub backend
//!
//! Main application entry point

use tracing::info;

use venuehub::config::Settings;
use venuehub::database::{connection, DatabaseService};
use venuehub::handlers::{build_router, AppState};
use venuehub::services::ServiceFactory;
use venuehub::utils::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging
    logging::init_logging(&settings.logging)?;

    info!("Starting VenueHub backend...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = connection::DatabaseConfig::from_settings(&settings.database);
    let db_pool = connection::create_pool(&db_config).await?;

    // Run database migrations
    connection::run_migrations(&db_pool).await?;

    // Initialize services
    let database_service = DatabaseService::new(db_pool);
    let services = ServiceFactory::new(&settings, &database_service);
    let state = AppState::new(database_service, services);

    let router = build_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    info!("VenueHub backend has been shut down.");

    Ok(())
}
