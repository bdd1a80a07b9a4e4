//! Version-aware URL path resolution for docver.
//!
//! Several documented libraries share one site, and some of them expose a
//! release line in their URLs (`/relayer/1.3.x/quickstart`). This crate knows
//! how to read such paths:
//!
//! - [`normalize`]: canonical form of a URL path (trailing slash removal)
//! - [`ProductPaths`]: splits product paths into base, version and subpath
//! - [`ActiveMatcher`]: decides whether a navigation entry is active for the
//!   current path, treating versions of the same page as equivalent
//! - [`VersionRegistry`]: per-library release lines for version selectors
//! - [`TabSet`]: ecosystem sidebar tabs resolved for the current path
//!
//! # Example
//!
//! ```
//! use docver_paths::{ActiveMatcher, ProductPaths};
//!
//! let products = ProductPaths::from_pattern(
//!     vec!["/relayer".to_owned(), "/monitor".to_owned()],
//!     r"^\d+\.\d+\.x$",
//! )?;
//! let matcher = ActiveMatcher::new(products);
//!
//! assert!(matcher.is_active("/relayer/1.3.x/quickstart", "/relayer/quickstart", true));
//! # Ok::<(), docver_paths::PathsError>(())
//! ```

mod active;
mod error;
mod path;
mod tabs;
mod versions;

pub use active::{ActiveMatcher, SidebarTab};
pub use error::PathsError;
pub use path::{DEFAULT_SEGMENT_PATTERN, ProductPaths, VersionedPath, normalize};
pub use tabs::{TabConfig, TabSet};
pub use versions::{CurrentVersion, LibraryVersion, VersionRegistry};
