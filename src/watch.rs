//! Log-backed collaborators for the watcher.

use tracing::{info, trace};

use content_core::result::AppResult;
use content_core::traits::{ChangeSink, RenderSurface};
use content_core::types::{FileId, FilePriority, RowPatch, RowView};

/// Render surface that logs what a table widget would paint.
#[derive(Debug, Default)]
pub struct LogSurface;

impl RenderSurface for LogSurface {
    fn replace(&self, rows: &[RowView]) {
        info!(rows = rows.len(), "Replacing table rows");
        for row in rows {
            trace!(
                row = %row.row_id,
                path = %row.path,
                checked = %row.checked,
                priority = %row.priority,
                progress = row.progress,
                "Row"
            );
        }
    }

    fn patch(&self, patches: &[RowPatch]) {
        for patch in patches {
            let columns: Vec<&str> = patch.columns.iter().map(|c| c.as_str()).collect();
            trace!(
                row = %patch.row.row_id,
                path = %patch.row.path,
                columns = ?columns,
                "Repainting row"
            );
        }
    }
}

/// Change sink that only records edits in the log.
#[derive(Debug, Default)]
pub struct LogSink;

impl ChangeSink for LogSink {
    fn priority_changed(&self, file_ids: &[FileId], priority: FilePriority) -> AppResult<()> {
        info!(files = file_ids.len(), priority = %priority, "Priority change requested");
        Ok(())
    }
}
