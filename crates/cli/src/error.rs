//! Errors surfaced by CLI commands.

use thiserror::Error;
use trackflow_core::{StorageError, TransferError};

use crate::config::ConfigError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A referenced entity does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A reminder needs either a lead or an order to attach to.
    #[error("a reminder needs --lead or --order")]
    MissingTarget,

    /// An update was requested without any field to change.
    #[error("nothing to update; pass at least one field")]
    EmptyUpdate,

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Reading or writing a user-supplied file failed.
    #[error("failed to access {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("confirmation prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl CliError {
    pub fn not_found(kind: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}
