//! Location lookup endpoint

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::handlers::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/locations/", get(locations))
}

/// States, cities grouped by state, and the popular-city prefix.
///
/// A data-store failure still produces a JSON body: the empty-collection
/// fallback with the error message, under a 500.
pub async fn locations(State(state): State<AppState>) -> Response {
    let view = state.services.aggregation.locations().await;

    let status = if view.is_fallback() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    (status, Json(view)).into_response()
}
