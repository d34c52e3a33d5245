//! Media upload model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MediaUpload {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Path of the stored file, relative to the media root.
    pub file: String,
    pub media_type: String,
    pub file_size: Option<i32>,
    pub uploaded_by: Option<i64>,
    pub event_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl MediaUpload {
    /// Public URL under which the stored file is served.
    pub fn file_url(&self) -> String {
        format!("/media/{}", self.file)
    }
}

/// Upload row plus the derived `file_url`, as served over the API.
#[derive(Debug, Clone, Serialize)]
pub struct MediaUploadResponse {
    #[serde(flatten)]
    pub upload: MediaUpload,
    pub file_url: String,
}

impl From<MediaUpload> for MediaUploadResponse {
    fn from(upload: MediaUpload) -> Self {
        let file_url = upload.file_url();
        Self { upload, file_url }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMediaUploadRequest {
    pub title: String,
    pub description: Option<String>,
    pub file: String,
    pub media_type: String,
    pub file_size: Option<i32>,
    pub uploaded_by: Option<i64>,
    pub event_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMediaUploadRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub media_type: Option<String>,
    pub event_id: Option<i64>,
}

/// Allowed `media_type` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Video,
    Document,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Document => "document",
        }
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            "document" => Ok(MediaType::Document),
            _ => Err(format!("\"{s}\" is not a valid media type")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_type_round_trips() {
        for s in ["image", "video", "document"] {
            assert_eq!(s.parse::<MediaType>().unwrap().as_str(), s);
        }
        assert!("audio".parse::<MediaType>().is_err());
    }

    #[test]
    fn file_url_is_rooted_at_media() {
        let upload = MediaUpload {
            id: 1,
            title: "poster".to_string(),
            description: String::new(),
            file: "uploads/2026/08/08/abc_poster.png".to_string(),
            media_type: "image".to_string(),
            file_size: Some(1024),
            uploaded_by: None,
            event_id: None,
            created_at: Utc::now(),
        };
        assert_eq!(upload.file_url(), "/media/uploads/2026/08/08/abc_poster.png");
    }
}
