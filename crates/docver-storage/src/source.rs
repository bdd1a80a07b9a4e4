//! Content source trait.
//!
//! # URL Convention
//!
//! Page URLs are absolute site paths without trailing slash:
//! - `/` - site root
//! - `/contracts` - library landing page
//! - `/contracts/v5.x/erc20` - versioned page
//!
//! Slugs are the non-empty URL segments (`["contracts", "v5.x", "erc20"]`).

use std::path::PathBuf;

use serde::Serialize;

use crate::StorageError;

/// Reference to a published page, as listed by a content source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRef {
    /// Site URL (e.g., "/contracts/v5.x/erc20").
    pub url: String,
    /// URL segments.
    pub slugs: Vec<String>,
    /// Path of the source document, used in diagnostics and scope matching.
    pub absolute_path: PathBuf,
}

impl PageRef {
    /// Create a page reference, deriving slugs from the URL.
    #[must_use]
    pub fn new(url: impl Into<String>, absolute_path: impl Into<PathBuf>) -> Self {
        let url = url.into();
        let slugs = url
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect();
        Self {
            url,
            slugs,
            absolute_path: absolute_path.into(),
        }
    }
}

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub depth: u8,
    /// Heading text.
    pub title: String,
    /// In-page link (e.g., "#installation").
    pub url: String,
}

impl TocEntry {
    /// Anchor this entry links to, without the leading `#`.
    #[must_use]
    pub fn anchor(&self) -> &str {
        self.url.strip_prefix('#').unwrap_or(&self.url)
    }
}

/// Source of published pages.
///
/// Implementations must list pages in a stable order and return the same
/// `url` and `absolute_path` for a page on every call.
pub trait ContentSource: Send + Sync {
    /// List all published pages.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the listing fails as a whole.
    fn list_pages(&self) -> Result<Vec<PageRef>, StorageError>;

    /// Read the raw authored text of a page.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the content cannot be read.
    fn load_raw_text(&self, page: &PageRef) -> Result<String, StorageError>;

    /// Table of contents of a page, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the content cannot be read.
    fn load_toc(&self, page: &PageRef) -> Result<Vec<TocEntry>, StorageError>;
}
