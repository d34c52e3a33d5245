//! Media upload repository implementation

use chrono::Utc;
use sqlx::PgPool;

use crate::models::media::{CreateMediaUploadRequest, MediaUpload, UpdateMediaUploadRequest};
use crate::utils::errors::AppError;

#[derive(Debug, Clone)]
pub struct MediaRepository {
    pool: PgPool,
}

impl MediaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new media upload record
    pub async fn create(&self, request: CreateMediaUploadRequest) -> Result<MediaUpload, AppError> {
        let upload = sqlx::query_as::<_, MediaUpload>(
            r#"
            INSERT INTO media_uploads (title, description, file, media_type, file_size, uploaded_by, event_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, description, file, media_type, file_size, uploaded_by, event_id, created_at
            "#,
        )
        .bind(request.title)
        .bind(request.description.unwrap_or_default())
        .bind(request.file)
        .bind(request.media_type)
        .bind(request.file_size)
        .bind(request.uploaded_by)
        .bind(request.event_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(upload)
    }

    /// Find media upload by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<MediaUpload>, AppError> {
        let upload = sqlx::query_as::<_, MediaUpload>(
            "SELECT id, title, description, file, media_type, file_size, uploaded_by, event_id, created_at FROM media_uploads WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(upload)
    }

    /// Update media upload metadata
    pub async fn update(
        &self,
        id: i64,
        request: UpdateMediaUploadRequest,
    ) -> Result<MediaUpload, AppError> {
        let upload = sqlx::query_as::<_, MediaUpload>(
            r#"
            UPDATE media_uploads
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                media_type = COALESCE($4, media_type),
                event_id = COALESCE($5, event_id)
            WHERE id = $1
            RETURNING id, title, description, file, media_type, file_size, uploaded_by, event_id, created_at
            "#,
        )
        .bind(id)
        .bind(request.title)
        .bind(request.description)
        .bind(request.media_type)
        .bind(request.event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(upload)
    }

    /// Delete media upload record
    pub async fn delete(&self, id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM media_uploads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// List media uploads, newest first
    pub async fn list(&self) -> Result<Vec<MediaUpload>, AppError> {
        let uploads = sqlx::query_as::<_, MediaUpload>(
            "SELECT id, title, description, file, media_type, file_size, uploaded_by, event_id, created_at FROM media_uploads ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(uploads)
    }

    /// List media uploads attached to an event
    pub async fn list_for_event(&self, event_id: i64) -> Result<Vec<MediaUpload>, AppError> {
        let uploads = sqlx::query_as::<_, MediaUpload>(
            "SELECT id, title, description, file, media_type, file_size, uploaded_by, event_id, created_at FROM media_uploads WHERE event_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(uploads)
    }

    /// Count total media uploads
    pub async fn count(&self) -> Result<i64, AppError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM media_uploads")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
