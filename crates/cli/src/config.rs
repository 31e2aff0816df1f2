//! CLI configuration loaded from the environment.
//!
//! # Environment Variables
//!
//! - `TRACKFLOW_DATA_DIR` - Directory holding the slot files (default `trackflow-data`)
//! - `TRACKFLOW_LOG_FORMAT` - `text` (default) or `json`
//! - `RUST_LOG` - Log filter (default `trackflow=warn`)

use std::path::PathBuf;

use thiserror::Error;

/// Default directory for slot files, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "trackflow-data";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("expected `text` or `json`, got `{s}`")),
        }
    }
}

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory passed to `FileStorage`.
    pub data_dir: PathBuf,
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from the environment.
    ///
    /// `.env` must already have been loaded by the caller so that the
    /// command-line parser sees the same values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] for an unrecognised log format.
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(get_env_or_default("TRACKFLOW_DATA_DIR", DEFAULT_DATA_DIR));
        let log_format = get_env_or_default("TRACKFLOW_LOG_FORMAT", "text")
            .parse()
            .map_err(|e| ConfigError::InvalidEnvVar("TRACKFLOW_LOG_FORMAT".to_string(), e))?;

        Ok(Self {
            data_dir,
            log_format,
        })
    }

    /// Apply a `--data-dir` override from the command line.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
