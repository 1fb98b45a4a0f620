//! Snapshot comparison command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use content_core::error::AppError;
use content_service::{Reconciliation, reconcile};

use crate::output::{self, OutputFormat};

/// Arguments for the diff command
#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Snapshot currently displayed
    pub old: String,
    /// Newly polled snapshot
    pub new: String,
}

/// Changed row display
#[derive(Debug, Serialize, Tabled)]
struct ChangeRow {
    row: u32,
    path: String,
    columns: String,
}

/// Execute the diff command
pub async fn execute(args: &DiffArgs, config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let (_, displayed) = super::load_tree(&config, &args.old).await?;
    let (_, candidate) = super::load_tree(&config, &args.new).await?;

    match reconcile(Some(&displayed), &candidate) {
        Reconciliation::Replace { cause } => {
            let reason = cause.map(|c| c.to_string()).unwrap_or_default();
            output::print_warning(&format!("Table would be repopulated: {reason}"));
        }
        Reconciliation::Patch(changes) if changes.is_empty() => {
            output::print_success("No changes");
        }
        Reconciliation::Patch(changes) => {
            let rows: Vec<ChangeRow> = changes
                .iter()
                .map(|(row, columns)| ChangeRow {
                    row: row.get(),
                    path: displayed
                        .get(*row)
                        .map(|node| node.path.clone())
                        .unwrap_or_default(),
                    columns: columns
                        .iter()
                        .map(|c| c.as_str())
                        .collect::<Vec<_>>()
                        .join(","),
                })
                .collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
