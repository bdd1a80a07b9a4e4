//! Error types for path resolution.

/// Error building a path resolver from configuration.
#[derive(Debug, thiserror::Error)]
pub enum PathsError {
    /// Version pattern is not a valid regular expression.
    #[error("Invalid version pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as written in configuration.
        pattern: String,
        /// Underlying regex compilation error.
        #[source]
        source: regex::Error,
    },
    /// Product root is not an absolute URL path.
    #[error("Invalid product root '{0}': must start with '/' and not end with '/'")]
    InvalidProduct(String),
}
