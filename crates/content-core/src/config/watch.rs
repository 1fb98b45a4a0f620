//! Poll loop configuration.

use serde::{Deserialize, Serialize};

/// Settings for the `content-watch` poll loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// JSON snapshot file polled on every tick.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    /// Poll interval in milliseconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

fn default_snapshot_path() -> String {
    "data/files.json".to_string()
}

fn default_poll_interval() -> u64 {
    1500
}
