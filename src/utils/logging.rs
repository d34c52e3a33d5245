//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the VenueHub application.

use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "venuehub.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Log API write operations with structured data
pub fn log_write(entity: &str, id: i64, action: &str) {
    info!(entity = entity, id = id, action = action, "Write operation");
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, success: bool) {
    if success {
        debug!(operation = operation, table = table, "Database operation completed");
    } else {
        error!(operation = operation, table = table, "Database operation failed");
    }
}
