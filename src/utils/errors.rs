//! Error handling for VenueHub
//!
//! This module defines the main error types used throughout the application
//! and the mapping from those errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

/// Field-level validation messages, keyed by field name.
///
/// Serializes as `{"field": ["message", ...]}` — the shape clients consume
/// when a create or update is rejected.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Main error type for the VenueHub application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: i64 },

    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("Authentication error: {0}")]
    Unauthorized(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for VenueHub operations
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Build a validation error for a single field.
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        AppError::Validation(errors)
    }

    pub fn not_found(resource: &'static str, id: i64) -> Self {
        AppError::NotFound { resource, id }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Multipart(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        }

        let body = match &self {
            AppError::Validation(fields) => json!(fields),
            AppError::NotFound { resource, id } => {
                json!({ "error": format!("{resource} with id {id} not found") })
            }
            AppError::Unauthorized(message) => json!({ "error": message }),
            AppError::Multipart(err) => json!({ "error": err.to_string() }),
            // Internal detail stays in the log, not in the response body.
            _ => json!({ "error": "Internal server error" }),
        };

        (status, Json(body)).into_response()
    }
}

/// Accumulates field errors across a validation pass, so a response can
/// report every bad field at once rather than the first one found.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    fields: FieldErrors,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns `Ok(())` when no errors were recorded, otherwise the
    /// accumulated 400 payload.
    pub fn into_result(self) -> Result<()> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.fields))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::invalid_field("rsvp_status", "\"maybe\" is not a valid RSVP status");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::not_found("Event", 42);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Event not found: 42");
    }

    #[test]
    fn database_errors_map_to_500() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_errors_accumulate_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "This field is required");
        errors.add("event_type", "\"gala\" is not a valid event type");
        errors.add("title", "Must be under 200 characters");

        match errors.into_result() {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields["title"].len(), 2);
                assert_eq!(fields["event_type"].len(), 1);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn empty_validation_passes() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
