//! Mock content source for testing.
//!
//! Provides [`MockContentSource`] for unit testing without filesystem access.

use std::collections::{HashMap, HashSet};

use crate::source::{ContentSource, PageRef, TocEntry};
use crate::toc::extract_toc;
use crate::StorageError;

const BACKEND: &str = "Mock";

/// In-memory content source.
///
/// Pages are listed in insertion order. Each page's document path is
/// `content{url}.mdx`. Without an explicit table of contents, one is derived
/// from the page's markdown headings.
///
/// # Example
///
/// ```ignore
/// use docver_storage::{ContentSource, MockContentSource};
///
/// let source = MockContentSource::new()
///     .with_page("/contracts/erc20", "# ERC20\n\n## Usage\n")
///     .with_unreadable("/contracts/broken");
///
/// let pages = source.list_pages().unwrap();
/// assert_eq!(pages.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockContentSource {
    pages: Vec<PageRef>,
    contents: HashMap<String, String>,
    tocs: HashMap<String, Vec<TocEntry>>,
    unreadable: HashSet<String>,
}

impl MockContentSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn add_ref(&mut self, url: &str) {
        if !self.pages.iter().any(|p| p.url == url) {
            self.pages
                .push(PageRef::new(url, format!("content{url}.mdx")));
        }
    }

    /// Add a page with raw content.
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, content: impl Into<String>) -> Self {
        let url = url.into();
        self.add_ref(&url);
        self.contents.insert(url, content.into());
        self
    }

    /// Override the table of contents of a page.
    #[must_use]
    pub fn with_toc(mut self, url: impl Into<String>, toc: Vec<TocEntry>) -> Self {
        self.tocs.insert(url.into(), toc);
        self
    }

    /// Add a page that is listed but cannot be read.
    #[must_use]
    pub fn with_unreadable(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.add_ref(&url);
        self.unreadable.insert(url);
        self
    }

    fn content(&self, page: &PageRef) -> Result<&str, StorageError> {
        if self.unreadable.contains(&page.url) {
            return Err(StorageError::missing_page(page).with_backend(BACKEND));
        }
        self.contents
            .get(&page.url)
            .map(String::as_str)
            .ok_or_else(|| StorageError::missing_page(page).with_backend(BACKEND))
    }
}

impl ContentSource for MockContentSource {
    fn list_pages(&self) -> Result<Vec<PageRef>, StorageError> {
        Ok(self.pages.clone())
    }

    fn load_raw_text(&self, page: &PageRef) -> Result<String, StorageError> {
        self.content(page).map(str::to_owned)
    }

    fn load_toc(&self, page: &PageRef) -> Result<Vec<TocEntry>, StorageError> {
        let content = self.content(page)?;
        Ok(self
            .tocs
            .get(&page.url)
            .cloned()
            .unwrap_or_else(|| extract_toc(content)))
    }
}
