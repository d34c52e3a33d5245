//! Location repository implementation

use sqlx::PgPool;

use crate::models::location::{CreateLocationRequest, Location};
use crate::utils::errors::AppError;

#[derive(Debug, Clone)]
pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a location. Inserting an existing (state, city) pair is a
    /// no-op that returns the existing row.
    pub async fn create(&self, request: CreateLocationRequest) -> Result<Location, AppError> {
        sqlx::query(
            "INSERT INTO locations (state, city) VALUES ($1, $2) ON CONFLICT (state, city) DO NOTHING",
        )
        .bind(&request.state)
        .bind(&request.city)
        .execute(&self.pool)
        .await?;

        let location = sqlx::query_as::<_, Location>(
            "SELECT id, state, city FROM locations WHERE state = $1 AND city = $2",
        )
        .bind(&request.state)
        .bind(&request.city)
        .fetch_one(&self.pool)
        .await?;

        Ok(location)
    }

    /// List all locations ordered by (state, city)
    pub async fn list_all(&self) -> Result<Vec<Location>, AppError> {
        let locations = sqlx::query_as::<_, Location>(
            "SELECT id, state, city FROM locations ORDER BY state ASC, city ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(locations)
    }

    /// Remove every location row. Used by the seed binary before repopulating.
    pub async fn delete_all(&self) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM locations").execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    /// Count total locations
    pub async fn count(&self) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM locations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
