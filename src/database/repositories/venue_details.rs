//! Venue details repository implementation
//!
//! Backs the browse catalog endpoint, including the case-insensitive
//! city substring filter.

use chrono::Utc;
use sqlx::PgPool;

use crate::models::venue::{CreateVenueDetailsRequest, VenueDetails};
use crate::utils::errors::AppError;

#[derive(Debug, Clone)]
pub struct VenueDetailsRepository {
    pool: PgPool,
}

impl VenueDetailsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new venue details record
    pub async fn create(&self, request: CreateVenueDetailsRequest) -> Result<VenueDetails, AppError> {
        let details = sqlx::query_as::<_, VenueDetails>(
            r#"
            INSERT INTO venue_details (venue_name, location, capacity, price_range, image_url, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, venue_name, location, capacity, price_range, image_url, description, created_at
            "#,
        )
        .bind(request.venue_name)
        .bind(request.location)
        .bind(request.capacity)
        .bind(request.price_range)
        .bind(request.image_url)
        .bind(request.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(details)
    }

    /// Find venue details by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<VenueDetails>, AppError> {
        let details = sqlx::query_as::<_, VenueDetails>(
            "SELECT id, venue_name, location, capacity, price_range, image_url, description, created_at FROM venue_details WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(details)
    }

    /// List venue details, optionally filtered by a case-insensitive
    /// substring match on the location field.
    pub async fn list(&self, city_filter: Option<&str>) -> Result<Vec<VenueDetails>, AppError> {
        let details = match city_filter {
            Some(city) => {
                sqlx::query_as::<_, VenueDetails>(
                    "SELECT id, venue_name, location, capacity, price_range, image_url, description, created_at FROM venue_details WHERE location ILIKE $1 ORDER BY id ASC",
                )
                .bind(format!("%{}%", escape_like(city)))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, VenueDetails>(
                    "SELECT id, venue_name, location, capacity, price_range, image_url, description, created_at FROM venue_details ORDER BY id ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(details)
    }
}

/// Escape LIKE metacharacters so a filter value matches literally.
fn escape_like(value: &str) -> String {
    value.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(escape_like("mum%bai"), "mum\\%bai");
        assert_eq!(escape_like("new_delhi"), "new\\_delhi");
        assert_eq!(escape_like("plain"), "plain");
    }
}
