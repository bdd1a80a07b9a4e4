//! CLI error types.

use docver_config::ConfigError;
use docver_links::ValidateError;
use docver_nav::NavError;
use docver_storage::StorageError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Navigation(#[from] NavError),

    #[error("{0}")]
    Validate(#[from] ValidateError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}
