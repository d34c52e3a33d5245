//! Venue repository implementation

use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::venue::{CreateVenueRequest, UpdateVenueRequest, Venue};
use crate::utils::errors::AppError;

const VENUE_COLUMNS: &str = "id, name, venue_type, location, city, price, rating, reviews, image, suitability, badges, created_at";

#[derive(Debug, Clone)]
pub struct VenueRepository {
    pool: PgPool,
}

impl VenueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new venue
    pub async fn create(&self, request: CreateVenueRequest) -> Result<Venue, AppError> {
        let venue = sqlx::query_as::<_, Venue>(&format!(
            r#"
            INSERT INTO venues (name, venue_type, location, city, price, rating, reviews, image, suitability, badges, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {VENUE_COLUMNS}
            "#
        ))
        .bind(request.name)
        .bind(request.venue_type)
        .bind(request.location)
        .bind(request.city)
        .bind(request.price)
        .bind(request.rating.unwrap_or(0.0))
        .bind(request.reviews.unwrap_or(0))
        .bind(request.image)
        .bind(Json(request.suitability.unwrap_or_default()))
        .bind(Json(request.badges.unwrap_or_default()))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(venue)
    }

    /// Find venue by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Venue>, AppError> {
        let venue = sqlx::query_as::<_, Venue>(&format!(
            "SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(venue)
    }

    /// Update venue
    pub async fn update(&self, id: i64, request: UpdateVenueRequest) -> Result<Venue, AppError> {
        let venue = sqlx::query_as::<_, Venue>(&format!(
            r#"
            UPDATE venues
            SET name = COALESCE($2, name),
                venue_type = COALESCE($3, venue_type),
                location = COALESCE($4, location),
                city = COALESCE($5, city),
                price = COALESCE($6, price),
                rating = COALESCE($7, rating),
                reviews = COALESCE($8, reviews),
                image = COALESCE($9, image),
                suitability = COALESCE($10, suitability),
                badges = COALESCE($11, badges)
            WHERE id = $1
            RETURNING {VENUE_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(request.name)
        .bind(request.venue_type)
        .bind(request.location)
        .bind(request.city)
        .bind(request.price)
        .bind(request.rating)
        .bind(request.reviews)
        .bind(request.image)
        .bind(request.suitability.map(Json))
        .bind(request.badges.map(Json))
        .fetch_one(&self.pool)
        .await?;

        Ok(venue)
    }

    /// Delete venue
    pub async fn delete(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// List venues, newest first
    pub async fn list(&self) -> Result<Vec<Venue>, AppError> {
        let venues = sqlx::query_as::<_, Venue>(&format!(
            "SELECT {VENUE_COLUMNS} FROM venues ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(venues)
    }

    /// Venues in a city, matched case-insensitively, ordered by name
    pub async fn list_by_city(&self, city: &str) -> Result<Vec<Venue>, AppError> {
        let venues = sqlx::query_as::<_, Venue>(&format!(
            "SELECT {VENUE_COLUMNS} FROM venues WHERE LOWER(city) = LOWER($1) ORDER BY name ASC"
        ))
        .bind(city)
        .fetch_all(&self.pool)
        .await?;

        Ok(venues)
    }

    /// All venues ordered by (city, name). Input for the grouped view.
    pub async fn list_ordered_by_city_name(&self) -> Result<Vec<Venue>, AppError> {
        let venues = sqlx::query_as::<_, Venue>(&format!(
            "SELECT {VENUE_COLUMNS} FROM venues ORDER BY city ASC, name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(venues)
    }

    /// Distinct city values, sorted ascending
    pub async fn distinct_cities(&self) -> Result<Vec<String>, AppError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT city FROM venues ORDER BY city ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(city,)| city).collect())
    }

    /// Remove every venue row. Used by the seed binary before repopulating.
    pub async fn delete_all(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM venues").execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    /// Count total venues
    pub async fn count(&self) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM venues")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
