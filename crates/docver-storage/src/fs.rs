//! Filesystem content source.
//!
//! Walks a content directory and publishes every markdown document:
//!
//! - `index.mdx` -> `/`
//! - `contracts/index.mdx` -> `/contracts`
//! - `contracts/v5.x/erc20.mdx` -> `/contracts/v5.x/erc20`
//!
//! Hidden files and directories are skipped. Entries are visited in name
//! order so listings are stable across platforms.

use std::fs;
use std::path::{Path, PathBuf};

use crate::source::{ContentSource, PageRef, TocEntry};
use crate::toc::extract_toc;
use crate::StorageError;

const BACKEND: &str = "Fs";

/// Markdown extensions published by default.
const DEFAULT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Content source reading markdown documents from a directory tree.
#[derive(Clone, Debug)]
pub struct FsContentSource {
    source_dir: PathBuf,
    extensions: Vec<String>,
}

impl FsContentSource {
    /// Create a source publishing `.md` and `.mdx` files under `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self {
            source_dir,
            extensions: DEFAULT_EXTENSIONS.iter().map(|&e| e.to_owned()).collect(),
        }
    }

    /// Publish files with these extensions instead (without leading dot).
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Root directory of the content tree.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    fn scan_directory(&self, dir: &Path, url_prefix: &str, pages: &mut Vec<PageRef>) {
        let Ok(entries) = fs::read_dir(dir) else {
            tracing::warn!(path = %dir.display(), "Cannot read directory");
            return;
        };

        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                (e.file_name().to_string_lossy().into_owned(), e.path(), is_dir)
            })
            .filter(|(name, _, _)| !name.starts_with('.'))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, path, is_dir) in entries {
            if is_dir {
                let child_prefix = format!("{url_prefix}/{name}");
                self.scan_directory(&path, &child_prefix, pages);
            } else if self.is_document(&path) {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                pages.push(PageRef::new(document_url(url_prefix, &stem), path));
            }
        }
    }

    fn read(&self, page: &PageRef) -> Result<String, StorageError> {
        fs::read_to_string(&page.absolute_path)
            .map_err(|e| StorageError::unreadable(page, e).with_backend(BACKEND))
    }
}

/// URL of a document named `stem` in the directory at `url_prefix`.
fn document_url(url_prefix: &str, stem: &str) -> String {
    match (url_prefix.is_empty(), stem == "index") {
        (true, true) => "/".to_owned(),
        (false, true) => url_prefix.to_owned(),
        (_, false) => format!("{url_prefix}/{stem}"),
    }
}

impl ContentSource for FsContentSource {
    fn list_pages(&self) -> Result<Vec<PageRef>, StorageError> {
        if !self.source_dir.is_dir() {
            return Err(StorageError::not_found(self.source_dir.clone()).with_backend(BACKEND));
        }

        let mut pages = Vec::new();
        self.scan_directory(&self.source_dir, "", &mut pages);
        tracing::debug!(
            dir = %self.source_dir.display(),
            count = pages.len(),
            "Scanned content directory"
        );
        Ok(pages)
    }

    fn load_raw_text(&self, page: &PageRef) -> Result<String, StorageError> {
        self.read(page)
    }

    fn load_toc(&self, page: &PageRef) -> Result<Vec<TocEntry>, StorageError> {
        self.read(page).map(|text| extract_toc(&text))
    }
}
