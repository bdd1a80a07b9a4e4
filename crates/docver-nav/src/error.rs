//! Navigation loading errors.

use std::path::PathBuf;

/// Error loading or configuring navigation trees.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Tree file could not be read.
    #[error("Failed to read navigation tree {}: {source}", path.display())]
    Io {
        /// Tree file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Tree file is not valid navigation JSON.
    #[error("Invalid navigation tree {}: {source}", path.display())]
    Parse {
        /// Tree file path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// Version folder pattern does not compile.
    #[error("Invalid version folder pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as written in configuration.
        pattern: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },
}
