//! Tree building and display configuration.

use serde::{Deserialize, Serialize};

/// Settings that shape how a flat file list becomes a tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Separator used to split file paths into folder segments.
    #[serde(default = "default_path_separator")]
    pub path_separator: String,
    /// Name of the backend holding directory for unwanted files. Segments
    /// with this name never become folders.
    #[serde(default = "default_unwanted_folder")]
    pub unwanted_folder: String,
    /// Folders at or below this depth start collapsed after a full
    /// repopulation (`None` leaves everything expanded).
    #[serde(default)]
    pub collapse_depth: Option<u32>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path_separator: default_path_separator(),
            unwanted_folder: default_unwanted_folder(),
            collapse_depth: None,
        }
    }
}

fn default_path_separator() -> String {
    "/".to_string()
}

fn default_unwanted_folder() -> String {
    ".unwanted".to_string()
}
