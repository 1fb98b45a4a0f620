//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use content_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration file
    Validate,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            output::print_item(&config, format);
        }
        ConfigCommand::Validate => match super::load_config(config_path) {
            Ok(config) => {
                output::print_success(&format!("Configuration '{config_path}' is valid"));
                output::print_kv("Path separator", &config.content.path_separator);
                output::print_kv("Unwanted folder", &config.content.unwanted_folder);
                output::print_kv("Snapshot", &config.watch.snapshot_path);
                output::print_kv("Poll interval", &format!("{} ms", config.watch.poll_interval_ms));
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {e}"));
                return Err(e);
            }
        },
    }

    Ok(())
}
