//! Venue models
//!
//! `Venue` is the bookable listing used by the grouping endpoints.
//! `VenueDetails` is the standalone browse catalog queried by city substring.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub venue_type: String,
    pub location: String,
    pub city: String,
    pub price: String,
    pub rating: f64,
    pub reviews: i32,
    pub image: String,
    pub suitability: Json<Vec<String>>,
    pub badges: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVenueRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub venue_type: String,
    pub location: String,
    pub city: String,
    pub price: String,
    pub rating: Option<f64>,
    pub reviews: Option<i32>,
    pub image: String,
    pub suitability: Option<Vec<String>>,
    pub badges: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateVenueRequest {
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

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VenueDetails {
    pub id: i64,
    pub venue_name: String,
    pub location: String,
    pub capacity: i32,
    pub price_range: String,
    pub image_url: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVenueDetailsRequest {
    pub venue_name: String,
    pub location: String,
    pub capacity: i32,
    pub price_range: String,
    pub image_url: String,
    pub description: String,
}
