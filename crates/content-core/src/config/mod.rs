//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a default so an empty file is valid.

pub mod content;
pub mod logging;
pub mod watch;

use serde::{Deserialize, Serialize};

use self::content::ContentConfig;
use self::logging::LoggingConfig;
use self::watch::WatchConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Tree building and display settings.
    #[serde(default)]
    pub content: ContentConfig,
    /// Poll loop settings for the watch binary.
    #[serde(default)]
    pub watch: WatchConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `CONTENT__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        Self::finish(builder)
    }

    /// Load configuration from an explicit file path, still honouring
    /// environment overrides.
    pub fn load_file(path: &str) -> Result<Self, AppError> {
        let builder =
            config::Config::builder().add_source(config::File::with_name(path).required(false));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix("CONTENT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load_file("does/not/exist.toml").unwrap();
        assert_eq!(config.content.path_separator, "/");
        assert_eq!(config.content.unwanted_folder, ".unwanted");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "content": { "path_separator": "\\" }
        }))
        .unwrap();
        assert_eq!(config.content.path_separator, "\\");
        assert_eq!(config.content.unwanted_folder, ".unwanted");
        assert_eq!(config.watch.poll_interval_ms, 1500);
    }
}
