//! API surface tests that run without a database.
//!
//! These drive the real router over a pool pointing at an unreachable
//! server: request validation happens before any query, and the locations
//! endpoint must answer with its fallback payload when the store is down.

mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use serde_json::{json, Value};

#[tokio::test]
async fn health_answers_without_database() {
    let media = tempfile::tempdir().unwrap();
    let server = helpers::offline_server(media.path());

    let response = server.get("/api/health/").await;

    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "venuehub");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let media = tempfile::tempdir().unwrap();
    let server = helpers::offline_server(media.path());

    let response = server.get("/api/bookings/").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn event_create_rejects_invalid_enum_values() {
    let media = tempfile::tempdir().unwrap();
    let server = helpers::offline_server(media.path());

    let response = server
        .post("/api/events/")
        .json(&json!({
            "title": "Annual Meetup",
            "event_type": "gala",
            "status": "archived",
            "date": "2026-09-01T18:00:00Z",
            "location": "Mumbai",
            "organizer_id": 1
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["event_type"][0].as_str().unwrap().contains("gala"));
    assert!(body["status"][0].as_str().unwrap().contains("archived"));
}

#[tokio::test]
async fn event_create_reports_missing_fields() {
    let media = tempfile::tempdir().unwrap();
    let server = helpers::offline_server(media.path());

    let response = server.post("/api/events/").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    for field in ["title", "event_type", "date", "location", "organizer_id"] {
        assert!(body.get(field).is_some(), "no error reported for {field}");
    }
}

#[tokio::test]
async fn guest_create_rejects_invalid_rsvp_status() {
    let media = tempfile::tempdir().unwrap();
    let server = helpers::offline_server(media.path());

    let response = server
        .post("/api/events/1/guests/")
        .json(&json!({
            "name": "Asha",
            "email": "asha@example.com",
            "rsvp_status": "maybe"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["rsvp_status"][0]
        .as_str()
        .unwrap()
        .contains("not a valid RSVP status"));
}

#[tokio::test]
async fn register_rejects_invalid_role_and_email() {
    let media = tempfile::tempdir().unwrap();
    let server = helpers::offline_server(media.path());

    let response = server
        .post("/api/users/register/")
        .json(&json!({
            "username": "asha",
            "email": "not-an-email",
            "password": "hunter2",
            "role": "admin"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body.get("email").is_some());
    assert!(body.get("role").is_some());
}

#[tokio::test]
async fn login_requires_credentials() {
    let media = tempfile::tempdir().unwrap();
    let server = helpers::offline_server(media.path());

    let response = server.post("/api/users/login/").json(&json!({})).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_without_file_reports_field_errors() {
    let media = tempfile::tempdir().unwrap();
    let server = helpers::offline_server(media.path());

    let form = MultipartForm::new().add_text("description", "no file attached");
    let response = server.post("/api/media/upload/").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    for field in ["title", "media_type", "file"] {
        assert!(body.get(field).is_some(), "no error reported for {field}");
    }
}

#[tokio::test]
async fn locations_falls_back_to_empty_payload_when_store_is_down() {
    let media = tempfile::tempdir().unwrap();
    let server = helpers::offline_server(media.path());

    let response = server.get("/api/locations/").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["states"], json!([]));
    assert_eq!(body["cities_by_state"], json!({}));
    assert_eq!(body["popular_cities"], json!([]));
    assert!(body["error"].as_str().unwrap().contains("Failed to fetch locations"));
}

#[tokio::test]
async fn grouped_venues_surface_store_failure_as_500() {
    let media = tempfile::tempdir().unwrap();
    let server = helpers::offline_server(media.path());

    let response = server.get("/api/venues/all/").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Internal server error");
}
