//! Validation setup errors.
//!
//! Broken links are not errors: they are collected as issues in the report.

/// Error preventing a validation run from starting.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// Scope pattern does not compile.
    #[error("Invalid scope pattern '{pattern}': {source}")]
    InvalidScope {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    /// Fallback route template is malformed.
    #[error("Invalid fallback route '{route}': {reason}")]
    InvalidRoute { route: String, reason: String },
}
