//! Venue endpoints
//!
//! CRUD on venues, the grouped/aggregate views, and the venue details
//! catalog with its city substring filter.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::handlers::AppState;
use crate::models::venue::{
    CreateVenueDetailsRequest, CreateVenueRequest, UpdateVenueRequest, Venue, VenueDetails,
};
use crate::utils::errors::{AppError, Result, ValidationErrors};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/venues/", get(list_venues).post(create_venue))
        .route("/api/venues/all/", get(all_venues))
        .route("/api/venues/city/:city/", get(venues_by_city))
        .route(
            "/api/venues/:id/",
            get(get_venue).put(update_venue).delete(delete_venue),
        )
        .route("/api/cities/", get(cities_list))
        .route("/api/venue-details/", get(venue_details).post(create_venue_details))
}

#[derive(Debug, Deserialize)]
pub struct VenuePayload {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub venue_type: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub price: Option<String>,
    pub rating: Option<f64>,
    pub reviews: Option<i32>,
    pub image: Option<String>,
    pub suitability: Option<Vec<String>>,
    pub badges: Option<Vec<String>>,
}

impl VenuePayload {
    fn validate(self) -> Result<CreateVenueRequest> {
        let mut errors = ValidationErrors::new();

        for (field, value) in [
            ("name", &self.name),
            ("type", &self.venue_type),
            ("location", &self.location),
            ("city", &self.city),
            ("price", &self.price),
            ("image", &self.image),
        ] {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                errors.add(field, "This field is required");
            }
        }

        errors.into_result()?;

        Ok(CreateVenueRequest {
            name: self.name.unwrap_or_default(),
            venue_type: self.venue_type.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            rating: self.rating,
            reviews: self.reviews,
            image: self.image.unwrap_or_default(),
            suitability: self.suitability,
            badges: self.badges,
        })
    }
}

pub async fn list_venues(State(state): State<AppState>) -> Result<Json<Vec<Venue>>> {
    Ok(Json(state.db.venues.list().await?))
}

pub async fn create_venue(
    State(state): State<AppState>,
    Json(payload): Json<VenuePayload>,
) -> Result<(StatusCode, Json<Venue>)> {
    let request = payload.validate()?;
    let venue = state.db.venues.create(request).await?;
    crate::utils::logging::log_write("venue", venue.id, "create");

    Ok((StatusCode::CREATED, Json(venue)))
}

pub async fn get_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Venue>> {
    let venue = state
        .db
        .venues
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("Venue", id))?;

    Ok(Json(venue))
}

pub async fn update_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateVenueRequest>,
) -> Result<Json<Venue>> {
    if state.db.venues.find_by_id(id).await?.is_none() {
        return Err(AppError::not_found("Venue", id));
    }

    let venue = state.db.venues.update(id, request).await?;
    crate::utils::logging::log_write("venue", id, "update");

    Ok(Json(venue))
}

pub async fn delete_venue(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let deleted = state.db.venues.delete(id).await?;
    if deleted == 0 {
        return Err(AppError::not_found("Venue", id));
    }
    crate::utils::logging::log_write("venue", id, "delete");

    Ok(StatusCode::NO_CONTENT)
}

/// Venues in one city, matched case-insensitively.
pub async fn venues_by_city(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<Vec<Venue>>> {
    Ok(Json(state.db.venues.list_by_city(&city).await?))
}

/// All venues grouped by city.
pub async fn all_venues(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, Vec<Venue>>>> {
    Ok(Json(state.services.aggregation.venues_by_city().await?))
}

/// Sorted distinct list of cities that have venues.
pub async fn cities_list(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.services.aggregation.cities_list().await?))
}

#[derive(Debug, Deserialize)]
pub struct VenueDetailsQuery {
    pub city: Option<String>,
}

/// Browse catalog, optionally narrowed by a city substring.
pub async fn venue_details(
    State(state): State<AppState>,
    Query(query): Query<VenueDetailsQuery>,
) -> Result<Json<Vec<VenueDetails>>> {
    let filter = query.city.as_deref().filter(|c| !c.trim().is_empty());
    Ok(Json(state.db.venue_details.list(filter).await?))
}

#[derive(Debug, Deserialize)]
pub struct VenueDetailsPayload {
    pub venue_name: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub price_range: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

pub async fn create_venue_details(
    State(state): State<AppState>,
    Json(payload): Json<VenueDetailsPayload>,
) -> Result<(StatusCode, Json<VenueDetails>)> {
    let mut errors = ValidationErrors::new();
    if payload.venue_name.as_deref().map_or(true, |v| v.trim().is_empty()) {
        errors.add("venue_name", "This field is required");
    }
    if payload.location.as_deref().map_or(true, |v| v.trim().is_empty()) {
        errors.add("location", "This field is required");
    }
    if payload.capacity.is_none() {
        errors.add("capacity", "This field is required");
    }
    errors.into_result()?;

    let details = state
        .db
        .venue_details
        .create(CreateVenueDetailsRequest {
            venue_name: payload.venue_name.unwrap_or_default(),
            location: payload.location.unwrap_or_default(),
            capacity: payload.capacity.unwrap_or(0),
            price_range: payload.price_range.unwrap_or_default(),
            image_url: payload.image_url.unwrap_or_default(),
            description: payload.description.unwrap_or_default(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(details)))
}
