//! Priority edit command.

use std::sync::{Arc, Mutex};

use clap::Args;

use content_core::error::AppError;
use content_core::result::AppResult;
use content_core::traits::ChangeSink;
use content_core::types::{FileId, FilePriority, FileRecord, RowId};
use content_service::PriorityController;

use crate::output::{self, OutputFormat};

/// Arguments for the priority command
#[derive(Debug, Args)]
pub struct PriorityArgs {
    /// Snapshot file (JSON array of files)
    pub snapshot: String,

    /// Rows to change, comma separated
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub rows: Vec<u32>,

    /// New priority: ignored, normal, high or maximum
    #[arg(short, long)]
    pub priority: FilePriority,

    /// Write the new priorities back into the snapshot file
    #[arg(short, long)]
    pub write: bool,
}

/// Collects the edit so it can be written back to the snapshot.
#[derive(Debug, Default)]
struct PendingEdit {
    edits: Mutex<Vec<(Vec<FileId>, FilePriority)>>,
}

impl ChangeSink for PendingEdit {
    fn priority_changed(&self, file_ids: &[FileId], priority: FilePriority) -> AppResult<()> {
        self.edits
            .lock()
            .map_err(|_| AppError::internal("Edit buffer poisoned"))?
            .push((file_ids.to_vec(), priority));
        Ok(())
    }
}

impl PendingEdit {
    fn apply_to(&self, records: &mut [FileRecord]) -> AppResult<usize> {
        let edits = self
            .edits
            .lock()
            .map_err(|_| AppError::internal("Edit buffer poisoned"))?;
        let mut changed = 0;
        for (file_ids, priority) in edits.iter() {
            for id in file_ids {
                if let Some(record) = records.get_mut(id.get() as usize) {
                    record.priority = *priority;
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }
}

/// Execute the priority command
pub async fn execute(
    args: &PriorityArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let (mut records, mut tree) = super::load_tree(&config, &args.snapshot).await?;

    let pending = Arc::new(PendingEdit::default());
    let controller = PriorityController::new(Some(pending.clone()));
    let rows: Vec<RowId> = args.rows.iter().copied().map(RowId).collect();
    let change = controller.set_priority(&mut tree, &rows, args.priority)?;

    output::print_rows(&tree.rows(), format);
    output::print_success(&format!(
        "Set {} on {} row(s), {} file(s)",
        change.priority,
        change.rows.len(),
        change.file_ids.len()
    ));

    if args.write {
        let changed = pending.apply_to(&mut records)?;
        let json = serde_json::to_vec_pretty(&records)?;
        tokio::fs::write(&args.snapshot, json).await?;
        output::print_success(&format!("Wrote {changed} file priority(ies) to '{}'", args.snapshot));
    }

    Ok(())
}
