//! Media upload endpoints
//!
//! Metadata CRUD plus the multipart upload endpoint. The upload computes
//! the file size server-side and attributes the file to the caller only
//! when a valid bearer token is presented.

use axum::extract::{Multipart, Path, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::handlers::AppState;
use crate::models::media::{
    CreateMediaUploadRequest, MediaType, MediaUploadResponse, UpdateMediaUploadRequest,
};
use crate::utils::errors::{AppError, Result, ValidationErrors};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/media/", get(list_media))
        .route("/api/media/upload/", post(upload_file))
        .route(
            "/api/media/:id/",
            get(get_media).put(update_media).delete(delete_media),
        )
}

/// Fields collected from a multipart upload request.
#[derive(Debug, Default)]
struct UploadForm {
    title: Option<String>,
    description: Option<String>,
    media_type: Option<String>,
    event_id: Option<String>,
    file_name: Option<String>,
    file_bytes: Option<Vec<u8>>,
}

impl UploadForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => form.title = Some(field.text().await?),
                "description" => form.description = Some(field.text().await?),
                "media_type" => form.media_type = Some(field.text().await?),
                "event" => form.event_id = Some(field.text().await?),
                "file" => {
                    form.file_name = field.file_name().map(str::to_string);
                    form.file_bytes = Some(field.bytes().await?.to_vec());
                }
                // Unknown parts are ignored.
                _ => {}
            }
        }

        Ok(form)
    }

    /// Field-level validation; returns (title, description, media_type,
    /// parsed event id, file name, file bytes).
    fn validate(self) -> Result<(String, String, String, Option<i64>, String, Vec<u8>)> {
        let mut errors = ValidationErrors::new();

        if self.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            errors.add("title", "This field is required");
        }
        match self.media_type.as_deref() {
            None => errors.add("media_type", "This field is required"),
            Some(ty) => {
                if let Err(msg) = ty.parse::<MediaType>() {
                    errors.add("media_type", msg);
                }
            }
        }
        if self.file_bytes.is_none() {
            errors.add("file", "No file was submitted");
        }

        let event_id = match self.event_id.as_deref().filter(|v| !v.is_empty()) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add("event", format!("\"{raw}\" is not a valid event id"));
                    None
                }
            },
            None => None,
        };

        errors.into_result()?;

        Ok((
            self.title.unwrap_or_default(),
            self.description.unwrap_or_default(),
            self.media_type.unwrap_or_default(),
            event_id,
            self.file_name.unwrap_or_else(|| "upload".to_string()),
            self.file_bytes.unwrap_or_default(),
        ))
    }
}

pub async fn list_media(
    State(state): State<AppState>,
) -> Result<Json<Vec<MediaUploadResponse>>> {
    let uploads = state.db.media.list().await?;
    Ok(Json(uploads.into_iter().map(Into::into).collect()))
}

pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MediaUploadResponse>> {
    let upload = state
        .db
        .media
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("MediaUpload", id))?;

    Ok(Json(upload.into()))
}

pub async fn update_media(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMediaUploadRequest>,
) -> Result<Json<MediaUploadResponse>> {
    if let Some(media_type) = request.media_type.as_deref() {
        if let Err(msg) = media_type.parse::<MediaType>() {
            return Err(AppError::invalid_field("media_type", msg));
        }
    }

    if state.db.media.find_by_id(id).await?.is_none() {
        return Err(AppError::not_found("MediaUpload", id));
    }

    let upload = state.db.media.update(id, request).await?;

    Ok(Json(upload.into()))
}

pub async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let deleted = state.db.media.delete(id).await?;
    if deleted == 0 {
        return Err(AppError::not_found("MediaUpload", id));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Multipart upload: store the file, then record it.
pub async fn upload_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<(StatusCode, Json<MediaUploadResponse>)> {
    let form = UploadForm::from_multipart(multipart).await?;
    let (title, description, media_type, event_id, file_name, bytes) = form.validate()?;

    if let Some(event_id) = event_id {
        if state.db.events.find_by_id(event_id).await?.is_none() {
            return Err(AppError::invalid_field(
                "event",
                format!("Invalid event: {event_id}"),
            ));
        }
    }

    // Anonymous uploads are allowed; a valid token attributes the file.
    let uploaded_by = state.services.auth.user_from_bearer(
        headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
    );

    let stored = state.services.storage.store(&file_name, &bytes).await?;

    let upload = state
        .db
        .media
        .create(CreateMediaUploadRequest {
            title,
            description: Some(description),
            file: stored.relative_path,
            media_type,
            file_size: Some(stored.size as i32),
            uploaded_by,
            event_id,
        })
        .await?;
    crate::utils::logging::log_write("media_upload", upload.id, "create");

    Ok((StatusCode::CREATED, Json(upload.into())))
}
