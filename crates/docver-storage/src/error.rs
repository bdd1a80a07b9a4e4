//! Content source errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::source::PageRef;

/// What went wrong while listing or reading content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Document or content directory does not exist.
    NotFound,
    /// Document exists but may not be read.
    PermissionDenied,
    /// Document is not UTF-8 text.
    InvalidContent,
    /// Any other I/O failure.
    Other,
}

impl StorageErrorKind {
    fn from_io(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::InvalidData => Self::InvalidContent,
            _ => Self::Other,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::NotFound => "Content not found",
            Self::PermissionDenied => "Permission denied",
            Self::InvalidContent => "Content is not valid UTF-8",
            Self::Other => "Cannot read content",
        }
    }
}

/// Failure of a [`ContentSource`](crate::ContentSource) call.
///
/// Carries the page being read when there is one, so a report can name the
/// URL that could not be indexed.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Site URL of the page being read; `None` for listing failures.
    pub page: Option<String>,
    /// Document or directory path.
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<io::Error>,
}

impl StorageError {
    /// Create an error without context.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            page: None,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// A file or directory that does not exist.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::new(StorageErrorKind::NotFound)
        }
    }

    /// A listed page whose document has no content.
    #[must_use]
    pub fn missing_page(page: &PageRef) -> Self {
        Self {
            page: Some(page.url.clone()),
            ..Self::not_found(page.absolute_path.clone())
        }
    }

    /// A listed page whose document could not be read.
    #[must_use]
    pub fn unreadable(page: &PageRef, err: io::Error) -> Self {
        Self {
            kind: StorageErrorKind::from_io(err.kind()),
            page: Some(page.url.clone()),
            path: Some(page.absolute_path.clone()),
            backend: None,
            source: Some(err),
        }
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // [Fs] Content not found for page /a at content/a.mdx: No such file
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }
        f.write_str(self.kind.describe())?;
        if let Some(url) = &self.page {
            write!(f, " for page {url}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " at {}", path.display())?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}
