//! Snapshot display command.

use clap::Args;

use content_core::error::AppError;
use content_service::global_state;

use crate::output::{self, OutputFormat};

/// Arguments for the show command
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Snapshot file (JSON array of files)
    pub snapshot: String,

    /// Only print rows up to this depth
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Print totals instead of rows
    #[arg(short, long)]
    pub summary: bool,
}

/// Execute the show command
pub async fn execute(args: &ShowArgs, config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let (records, tree) = super::load_tree(&config, &args.snapshot).await?;

    if args.summary {
        let root = tree.node(tree.root());
        output::print_kv("Files", &records.len().to_string());
        output::print_kv("Rows", &tree.len().to_string());
        output::print_kv("Size", &output::friendly_size(root.size));
        output::print_kv("Remaining", &output::friendly_size(root.remaining));
        output::print_kv("Progress", &format!("{:.1}%", root.progress));
        output::print_kv("Selection", &global_state(&tree).to_string());
        if tree.file_count() < records.len() {
            output::print_warning(&format!(
                "{} file(s) skipped because of path collisions",
                records.len() - tree.file_count()
            ));
        }
        return Ok(());
    }

    let rows: Vec<_> = tree
        .rows()
        .into_iter()
        .filter(|row| args.depth.is_none_or(|max| row.depth <= max))
        .collect();
    output::print_rows(&rows, format);
    Ok(())
}
