//! Snapshot source trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::FileRecord;

/// Supplies the current flat file list of a torrent on demand.
///
/// A failed fetch is not fatal: callers keep showing the last tree they
/// built successfully.
#[async_trait]
pub trait SnapshotSource: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the current file list.
    async fn fetch(&self) -> AppResult<Vec<FileRecord>>;
}
