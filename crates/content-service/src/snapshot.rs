//! File-backed snapshot source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use content_core::error::AppError;
use content_core::result::AppResult;
use content_core::traits::SnapshotSource;
use content_core::types::FileRecord;

/// Parse a JSON array of file records.
///
/// Individual fields are read leniently; only a payload that is not an
/// array of objects is rejected.
pub fn parse_records(bytes: &[u8]) -> AppResult<Vec<FileRecord>> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    if !value.is_array() {
        return Err(AppError::validation("Snapshot must be a JSON array of files"));
    }
    Ok(serde_json::from_value(value)?)
}

/// Read and parse a snapshot file synchronously.
pub fn load_records(path: impl AsRef<Path>) -> AppResult<Vec<FileRecord>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| {
        AppError::with_source(
            content_core::error::ErrorKind::Storage,
            format!("Failed to read snapshot '{}': {e}", path.display()),
            e,
        )
    })?;
    parse_records(&bytes)
}

/// Snapshot source that re-reads a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotSource for JsonFileSource {
    async fn fetch(&self) -> AppResult<Vec<FileRecord>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            AppError::with_source(
                content_core::error::ErrorKind::Storage,
                format!("Failed to read snapshot '{}': {e}", self.path.display()),
                e,
            )
        })?;
        let records = parse_records(&bytes)?;
        debug!(path = %self.path.display(), files = records.len(), "Fetched snapshot");
        Ok(records)
    }
}
