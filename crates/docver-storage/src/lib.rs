//! Content source abstraction for docver.
//!
//! This crate provides the boundary between the documentation content and
//! the path/link engine:
//!
//! - [`ContentSource`] trait with `list_pages()`, `load_raw_text()` and
//!   `load_toc()` methods
//! - [`FsContentSource`] for `.md`/`.mdx` trees on disk
//! - [`MockContentSource`] for testing (behind `mock` feature flag)
//! - [`PageLoader`] turning page references into immutable [`Page`] records
//!   in parallel
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use docver_storage::{FsContentSource, PageLoader};
//!
//! let source = Arc::new(FsContentSource::new(PathBuf::from("content")));
//! let pages = PageLoader::new(source).load_all()?;
//! for page in &pages {
//!     println!("{} ({} anchors)", page.url, page.anchors().len());
//! }
//! # Ok::<(), docver_storage::StorageError>(())
//! ```

mod anchors;
mod error;
mod fs;
mod loader;
mod mdx;
#[cfg(feature = "mock")]
mod mock;
mod page;
mod replace;
mod source;
mod toc;

pub use anchors::{AnchorExtractor, DEFAULT_ANCHOR_PATTERN, RegexAnchorExtractor};
pub use error::{StorageError, StorageErrorKind};
pub use fs::FsContentSource;
pub use loader::{LoadOutcome, PageLoader};
pub use mdx::blank_jsx_lines;
#[cfg(feature = "mock")]
pub use mock::MockContentSource;
pub use page::Page;
pub use replace::{ReplacementRule, Replacements};
pub use source::{ContentSource, PageRef, TocEntry};
pub use toc::{Slugger, extract_toc};
