//! Media storage service
//!
//! Writes uploaded files under the configured media root in dated
//! subdirectories and reports the stored relative path and byte size.

use chrono::{Datelike, Utc};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use crate::utils::errors::Result;
use crate::utils::helpers::sanitize_filename;

#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

/// Outcome of storing one uploaded file.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Path relative to the media root, e.g. `uploads/2026/08/08/<uuid>_name.png`.
    pub relative_path: String,
    pub size: i64,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write upload bytes to disk. The size is computed here, from the
    /// bytes actually received, never trusted from the client.
    pub async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<StoredFile> {
        let now = Utc::now();
        let subdir = format!(
            "uploads/{:04}/{:02}/{:02}",
            now.year(),
            now.month(),
            now.day()
        );
        let filename = format!(
            "{}_{}",
            Uuid::new_v4().simple(),
            sanitize_filename(original_name)
        );
        let relative_path = format!("{subdir}/{filename}");

        let dir = self.root.join(&subdir);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&filename), bytes).await?;

        info!(path = %relative_path, size = bytes.len(), "Stored uploaded file");

        Ok(StoredFile {
            relative_path,
            size: bytes.len() as i64,
        })
    }
}
