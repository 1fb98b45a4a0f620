//! Content watcher
//!
//! Polls a torrent's file list and keeps a content table in sync with it,
//! logging every repopulation and in-place repaint.

mod watch;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use content_core::config::AppConfig;
use content_core::error::AppError;
use content_service::{ContentSession, JsonFileSource, UpdateOutcome};

use crate::watch::{LogSink, LogSurface};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Watcher stopped");
        std::process::exit(1);
    }
}

/// Load configuration from an explicit file or the environment overlay
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("CONTENT_CONFIG") {
        Ok(path) => AppConfig::load_file(&path),
        Err(_) => {
            let env = std::env::var("CONTENT_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Poll until interrupted
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        snapshot = %config.watch.snapshot_path,
        interval_ms = config.watch.poll_interval_ms,
        "Starting content watcher"
    );

    let source = Arc::new(JsonFileSource::new(&config.watch.snapshot_path));
    let mut session = ContentSession::new(
        &config.content,
        source,
        Arc::new(LogSurface),
        Some(Arc::new(LogSink)),
    );

    let mut ticker = tokio::time::interval(Duration::from_millis(config.watch.poll_interval_ms.max(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match session.poll().await {
                    UpdateOutcome::Replaced => {
                        let rows = session.tree().map(|t| t.len()).unwrap_or_default();
                        tracing::info!(rows, selection = %session.global_state(), "Content table repopulated");
                    }
                    UpdateOutcome::Patched(rows) => tracing::debug!(rows, "Content table patched"),
                    UpdateOutcome::Unchanged | UpdateOutcome::Skipped => {}
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}
