//! Database-backed integration tests.
//!
//! These need Docker (or TEST_DATABASE_URL pointing at a PostgreSQL with
//! create/drop rights) and are ignored by default:
//!
//! ```text
//! cargo test -- --ignored
//! ```

mod helpers;

use axum::http::StatusCode;
use serde_json::{json, Value};
use serial_test::serial;

use venuehub::models::event::{CreateEventRequest, CreateGuestRequest};
use venuehub::models::location::CreateLocationRequest;
use venuehub::models::media::CreateMediaUploadRequest;
use venuehub::models::venue::CreateVenueRequest;
use venuehub::database::NewUser;
use venuehub::services::aggregation::POPULAR_CITY_LIMIT;

fn venue_request(name: &str, city: &str) -> CreateVenueRequest {
    CreateVenueRequest {
        name: name.to_string(),
        venue_type: "Banquet Hall".to_string(),
        location: format!("Central {city}"),
        city: city.to_string(),
        price: "₹30,000 - ₹60,000".to_string(),
        rating: Some(4.5),
        reviews: Some(10),
        image: "https://example.com/venue.jpg".to_string(),
        suitability: Some(vec!["Weddings".to_string()]),
        badges: Some(vec!["AC".to_string()]),
    }
}

fn user_request(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "x".to_string(),
        first_name: String::new(),
        last_name: String::new(),
        role: "organizer".to_string(),
        phone: String::new(),
    }
}

fn event_request(title: &str, organizer_id: i64) -> CreateEventRequest {
    CreateEventRequest {
        title: title.to_string(),
        description: None,
        event_type: "wedding".to_string(),
        status: None,
        date: chrono::Utc::now(),
        location: "Mumbai".to_string(),
        budget: Some(50_000.0),
        attendees_count: Some(120),
        organizer_id,
    }
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn grouped_venues_match_fixture() {
    let db = helpers::TestDatabase::new().await.unwrap();
    let media = tempfile::tempdir().unwrap();
    let state = helpers::app_state(db.pool.clone(), media.path());

    // Mumbai gets two venues inserted out of name order; Pune gets one.
    state.db.venues.create(venue_request("Sunset Garden Resort", "Mumbai")).await.unwrap();
    state.db.venues.create(venue_request("Grand Ballroom Palace", "Mumbai")).await.unwrap();
    state.db.venues.create(venue_request("Royal Gardens", "Pune")).await.unwrap();

    let grouped = state.services.aggregation.venues_by_city().await.unwrap();

    let cities: Vec<&String> = grouped.keys().collect();
    assert_eq!(cities, ["Mumbai", "Pune"]);
    assert_eq!(grouped["Mumbai"].len(), 2);
    assert_eq!(grouped["Pune"].len(), 1);
    // Within a city, venues come back ordered by name.
    assert_eq!(grouped["Mumbai"][0].name, "Grand Ballroom Palace");
    assert_eq!(grouped["Mumbai"][1].name, "Sunset Garden Resort");

    let city_list = state.services.aggregation.cities_list().await.unwrap();
    assert_eq!(city_list, ["Mumbai", "Pune"]);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn locations_summary_matches_fixture() {
    let db = helpers::TestDatabase::new().await.unwrap();
    let media = tempfile::tempdir().unwrap();
    let state = helpers::app_state(db.pool.clone(), media.path());

    let kerala = [
        "Thiruvananthapuram", "Kochi", "Kozhikode", "Thrissur", "Kollam",
        "Kannur", "Kottayam", "Alappuzha", "Palakkad", "Pathanamthitta",
        "Idukki", "Wayanad", "Kasaragod", "Malappuram", "Ernakulam",
    ];
    for city in kerala {
        state
            .db
            .locations
            .create(CreateLocationRequest {
                state: "Kerala".to_string(),
                city: city.to_string(),
            })
            .await
            .unwrap();
    }
    state
        .db
        .locations
        .create(CreateLocationRequest {
            state: "Delhi".to_string(),
            city: "Delhi".to_string(),
        })
        .await
        .unwrap();

    let view = state.services.aggregation.locations().await;

    assert!(!view.is_fallback());
    assert_eq!(view.states, ["Delhi", "Kerala"]);
    assert_eq!(view.cities_by_state["Kerala"].len(), 15);
    assert_eq!(view.popular_cities.len(), POPULAR_CITY_LIMIT);

    // Popular cities are the alphabetical prefix across all states.
    let mut all: Vec<String> = kerala.iter().map(|c| c.to_string()).collect();
    all.push("Delhi".to_string());
    all.sort();
    assert_eq!(view.popular_cities, all[..POPULAR_CITY_LIMIT]);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn duplicate_location_pairs_collapse() {
    let db = helpers::TestDatabase::new().await.unwrap();
    let media = tempfile::tempdir().unwrap();
    let state = helpers::app_state(db.pool.clone(), media.path());

    for _ in 0..2 {
        state
            .db
            .locations
            .create(CreateLocationRequest {
                state: "Goa".to_string(),
                city: "Goa".to_string(),
            })
            .await
            .unwrap();
    }

    assert_eq!(state.db.locations.count().await.unwrap(), 1);

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn deleting_event_cascades_to_guests_and_media() {
    let db = helpers::TestDatabase::new().await.unwrap();
    let media = tempfile::tempdir().unwrap();
    let state = helpers::app_state(db.pool.clone(), media.path());

    let organizer = state.db.users.create(user_request("organizer1")).await.unwrap();
    let event = state.db.events.create(event_request("Wedding", organizer.id)).await.unwrap();

    state
        .db
        .events
        .add_guest(
            event.id,
            CreateGuestRequest {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                phone: None,
                rsvp_status: None,
            },
        )
        .await
        .unwrap();

    let upload = state
        .db
        .media
        .create(CreateMediaUploadRequest {
            title: "Poster".to_string(),
            description: None,
            file: "uploads/2026/08/08/poster.png".to_string(),
            media_type: "image".to_string(),
            file_size: Some(3),
            uploaded_by: Some(organizer.id),
            event_id: Some(event.id),
        })
        .await
        .unwrap();

    assert_eq!(state.db.events.delete(event.id).await.unwrap(), 1);

    assert!(state.db.events.guests_for_event(event.id).await.unwrap().is_empty());
    assert!(state.db.media.find_by_id(upload.id).await.unwrap().is_none());

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn register_login_and_upload_flow() {
    let db = helpers::TestDatabase::new().await.unwrap();
    let media = tempfile::tempdir().unwrap();
    let state = helpers::app_state(db.pool.clone(), media.path());
    let server = axum_test::TestServer::new(venuehub::build_router(state)).unwrap();

    let response = server
        .post("/api/users/register/")
        .json(&json!({
            "username": "asha",
            "email": "asha@example.com",
            "password": "hunter2",
            "role": "organizer"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let registered: Value = response.json();
    assert!(registered["token"].as_str().is_some());
    assert!(registered["user"].get("password_hash").is_none());

    let response = server
        .post("/api/users/login/")
        .json(&json!({"username": "asha", "password": "hunter2"}))
        .await;
    response.assert_status(StatusCode::OK);
    let login: Value = response.json();
    let token = login["token"].as_str().unwrap().to_string();

    let response = server
        .post("/api/users/login/")
        .json(&json!({"username": "asha", "password": "wrong"}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    // Authenticated upload is attributed to the caller.
    let form = axum_test::multipart::MultipartForm::new()
        .add_text("title", "Poster")
        .add_text("media_type", "image")
        .add_part(
            "file",
            axum_test::multipart::Part::bytes(b"fake image bytes".to_vec())
                .file_name("poster.png"),
        );
    let response = server
        .post("/api/media/upload/")
        .authorization_bearer(&token)
        .multipart(form)
        .await;
    response.assert_status(StatusCode::CREATED);
    let upload: Value = response.json();
    assert_eq!(upload["file_size"], 16);
    assert_eq!(upload["uploaded_by"], login["user"]["id"]);
    assert!(upload["file_url"].as_str().unwrap().starts_with("/media/uploads/"));

    // Anonymous upload stores a null uploader.
    let form = axum_test::multipart::MultipartForm::new()
        .add_text("title", "Anonymous poster")
        .add_text("media_type", "image")
        .add_part(
            "file",
            axum_test::multipart::Part::bytes(b"bytes".to_vec()).file_name("b.png"),
        );
    let response = server.post("/api/media/upload/").multipart(form).await;
    response.assert_status(StatusCode::CREATED);
    let upload: Value = response.json();
    assert!(upload["uploaded_by"].is_null());

    db.cleanup().await.unwrap();
}

#[tokio::test]
#[serial]
#[ignore = "requires Docker or TEST_DATABASE_URL"]
async fn venue_details_filters_by_city_substring() {
    let db = helpers::TestDatabase::new().await.unwrap();
    let media = tempfile::tempdir().unwrap();
    let state = helpers::app_state(db.pool.clone(), media.path());
    let server = axum_test::TestServer::new(venuehub::build_router(state)).unwrap();

    for (name, location) in [
        ("Grand Hall", "Andheri, Mumbai"),
        ("River View", "Pune Riverside"),
    ] {
        let response = server
            .post("/api/venue-details/")
            .json(&json!({
                "venue_name": name,
                "location": location,
                "capacity": 200,
                "price_range": "₹₹",
                "image_url": "https://example.com/v.jpg",
                "description": "A venue"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    let response = server.get("/api/venue-details/").add_query_param("city", "mumb").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["venue_name"], "Grand Hall");

    db.cleanup().await.unwrap();
}
