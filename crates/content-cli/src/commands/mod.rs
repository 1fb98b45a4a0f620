//! CLI command definitions and dispatch.

pub mod config;
pub mod diff;
pub mod priority;
pub mod show;

use clap::{Parser, Subcommand};

use content_core::config::AppConfig;
use content_core::error::AppError;
use content_core::traits::SnapshotSource;
use content_core::types::FileRecord;
use content_entity::FileTree;
use content_service::{JsonFileSource, TreeBuilder};

use crate::output::OutputFormat;

/// Inspect and edit torrent content snapshots
#[derive(Debug, Parser)]
#[command(name = "content", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the content tree of a snapshot
    Show(show::ShowArgs),
    /// Compare two snapshots the way the live table would
    Diff(diff::DiffArgs),
    /// Change file priorities in a snapshot
    Priority(priority::PriorityArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Show(args) => show::execute(args, &self.config, self.format).await,
            Commands::Diff(args) => diff::execute(args, &self.config, self.format).await,
            Commands::Priority(args) => priority::execute(args, &self.config, self.format).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format),
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load_file(config_path)
}

/// Helper: read a snapshot file and build its tree
pub async fn load_tree(
    config: &AppConfig,
    snapshot: &str,
) -> Result<(Vec<FileRecord>, FileTree), AppError> {
    let records = JsonFileSource::new(snapshot).fetch().await?;
    let tree = TreeBuilder::new(&config.content).build(&records);
    tracing::debug!(snapshot, files = records.len(), rows = tree.len(), "Loaded snapshot");
    Ok((records, tree))
}
