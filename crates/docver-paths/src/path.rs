//! Path normalization and product path parsing.
//!
//! # Product Paths
//!
//! A versioned product owns every URL under its root. The first segment after
//! the root is a version when it matches the segment pattern (`1.3.x`),
//! otherwise the path belongs to the development view:
//!
//! | Path | Base | Version | Subpath |
//! |---|---|---|---|
//! | `/relayer` | `/relayer` | none | `""` |
//! | `/relayer/quickstart` | `/relayer` | none | `/quickstart` |
//! | `/relayer/1.3.x` | `/relayer` | `1.3.x` | `""` |
//! | `/relayer/1.3.x/api/keys` | `/relayer` | `1.3.x` | `/api/keys` |

use regex::Regex;

use crate::PathsError;

/// Default pattern for version segments in product paths (`1.3.x`).
pub const DEFAULT_SEGMENT_PATTERN: &str = r"^\d+\.\d+\.x$";

/// Remove a single trailing slash from a URL path.
///
/// The root path `/` is returned unchanged.
///
/// # Examples
///
/// ```
/// use docver_paths::normalize;
///
/// assert_eq!(normalize("/relayer/"), "/relayer");
/// assert_eq!(normalize("/"), "/");
/// assert_eq!(normalize("/relayer"), "/relayer");
/// ```
#[must_use]
pub fn normalize(path: &str) -> &str {
    if path.len() > 1
        && let Some(stripped) = path.strip_suffix('/')
    {
        return stripped;
    }
    path
}

/// A product path split into its logical parts.
///
/// Borrowed from the parsed path and the registered product list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VersionedPath<'a> {
    /// Product root (e.g., `/relayer`).
    pub base: &'a str,
    /// Version segment, `None` for the development view.
    pub version: Option<&'a str>,
    /// Remainder after base and version, with leading slash, or empty.
    pub subpath: &'a str,
}

impl VersionedPath<'_> {
    /// Whether this path is the development (unversioned) view.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.version.is_none()
    }

    /// Whether this path is the product root for its version.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.subpath.is_empty()
    }
}

/// Registered versioned products and the version segment pattern.
#[derive(Clone, Debug)]
pub struct ProductPaths {
    products: Vec<String>,
    segment_pattern: Regex,
}

impl ProductPaths {
    /// Create a parser for the given product roots.
    ///
    /// # Errors
    ///
    /// Returns [`PathsError::InvalidProduct`] if a root is not of the form `/name`.
    pub fn new(products: Vec<String>, segment_pattern: Regex) -> Result<Self, PathsError> {
        for product in &products {
            if !product.starts_with('/') || product.len() < 2 || product.ends_with('/') {
                return Err(PathsError::InvalidProduct(product.clone()));
            }
        }
        Ok(Self {
            products,
            segment_pattern,
        })
    }

    /// Create a parser, compiling the version segment pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PathsError::InvalidPattern`] if the pattern does not compile,
    /// or [`PathsError::InvalidProduct`] for a malformed product root.
    pub fn from_pattern(products: Vec<String>, segment_pattern: &str) -> Result<Self, PathsError> {
        let regex = Regex::new(segment_pattern).map_err(|source| PathsError::InvalidPattern {
            pattern: segment_pattern.to_owned(),
            source,
        })?;
        Self::new(products, regex)
    }

    /// Registered product roots, in configuration order.
    #[must_use]
    pub fn products(&self) -> &[String] {
        &self.products
    }

    /// Whether a single path segment is a version segment.
    #[must_use]
    pub fn is_version_segment(&self, segment: &str) -> bool {
        self.segment_pattern.is_match(segment)
    }

    /// Parse a path belonging to a registered product.
    ///
    /// Returns `None` for paths outside every registered product; callers
    /// fall back to plain path comparison.
    #[must_use]
    pub fn parse<'a>(&'a self, path: &'a str) -> Option<VersionedPath<'a>> {
        let path = normalize(path);

        for product in &self.products {
            let Some(rest) = path.strip_prefix(product.as_str()) else {
                continue;
            };

            if rest.is_empty() {
                return Some(VersionedPath {
                    base: product,
                    version: None,
                    subpath: "",
                });
            }

            // `rest` keeps its leading slash, which is exactly the subpath form
            let Some(remainder) = rest.strip_prefix('/') else {
                continue;
            };

            let first = remainder.split('/').next().unwrap_or_default();
            if !first.is_empty() && self.is_version_segment(first) {
                return Some(VersionedPath {
                    base: product,
                    version: Some(first),
                    subpath: &remainder[first.len()..],
                });
            }

            return Some(VersionedPath {
                base: product,
                version: None,
                subpath: rest,
            });
        }

        None
    }
}
