//! Index of published URLs and their anchors.

use std::collections::{HashMap, HashSet};

use docver_paths::normalize;
use docver_storage::Page;
use regex::Regex;

use crate::ValidateError;

/// Matcher for a dynamically generated route.
///
/// Templates use `[param]` for one segment and `[...param]` for one or more
/// segments: `/api/[package]/[...path]`.
#[derive(Clone, Debug)]
pub struct FallbackRoute {
    template: String,
    pattern: Regex,
}

impl FallbackRoute {
    /// Compile a route template.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::InvalidRoute`] if the template is not an
    /// absolute path or a bracketed segment is malformed.
    pub fn parse(template: &str) -> Result<Self, ValidateError> {
        let invalid = |reason: &str| ValidateError::InvalidRoute {
            route: template.to_owned(),
            reason: reason.to_owned(),
        };

        let Some(rest) = template.strip_prefix('/') else {
            return Err(invalid("must start with '/'"));
        };

        let mut pattern = String::from("^");
        for segment in rest.split('/').filter(|s| !s.is_empty()) {
            pattern.push('/');
            match segment.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
                Some(param) if param.starts_with("...") && param.len() > 3 => pattern.push_str(".+"),
                Some(param) if !param.is_empty() && !param.starts_with("...") => {
                    pattern.push_str("[^/]+");
                }
                Some(_) => return Err(invalid("empty parameter name")),
                None if segment.contains(['[', ']']) => {
                    return Err(invalid("parameters must span a whole segment"));
                }
                None => pattern.push_str(&regex::escape(segment)),
            }
        }
        if pattern == "^" {
            pattern.push('/');
        }
        pattern.push('$');

        let pattern = Regex::new(&pattern).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self {
            template: template.to_owned(),
            pattern,
        })
    }

    /// Template this route was compiled from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether a normalized path is served by this route.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

/// Result of looking up a path in the index.
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Published page with its anchors.
    Page(&'a HashSet<String>),
    /// Served by a dynamic route; anchors unknown.
    Fallback,
    /// Not published.
    Missing,
}

/// Published URLs of one validation run.
#[derive(Debug, Default)]
pub struct SiteIndex {
    urls: HashMap<String, HashSet<String>>,
    fallbacks: Vec<FallbackRoute>,
}

impl SiteIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every page with its anchors, plus dynamic routes.
    #[must_use]
    pub fn build(pages: &[Page], fallbacks: Vec<FallbackRoute>) -> Self {
        let mut index = Self {
            urls: HashMap::with_capacity(pages.len()),
            fallbacks,
        };
        for page in pages {
            index.insert(&page.url, page.anchors().into_iter().map(str::to_owned));
        }
        tracing::info!(
            pages = index.urls.len(),
            fallbacks = index.fallbacks.len(),
            "Built site index"
        );
        index
    }

    /// Register a URL with its anchors, merging with an existing entry.
    pub fn insert(&mut self, url: &str, anchors: impl IntoIterator<Item = String>) {
        self.urls
            .entry(normalize(url).to_owned())
            .or_default()
            .extend(anchors);
    }

    /// Register a dynamic route.
    pub fn add_fallback(&mut self, route: FallbackRoute) {
        self.fallbacks.push(route);
    }

    /// Look up a path, falling back to dynamic routes.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Lookup<'_> {
        let path = normalize(path);
        if let Some(anchors) = self.urls.get(path) {
            Lookup::Page(anchors)
        } else if self.fallbacks.iter().any(|route| route.matches(path)) {
            Lookup::Fallback
        } else {
            Lookup::Missing
        }
    }

    /// Number of indexed pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Whether no pages are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    fn page(url: &str, headings: &[&str], anchor_ids: &[&str]) -> Page {
        Page {
            url: url.to_owned(),
            slugs: Vec::new(),
            absolute_path: PathBuf::from(format!("content{url}.mdx")),
            raw_content: String::new(),
            headings: headings.iter().map(|&s| s.to_owned()).collect(),
            anchor_ids: anchor_ids.iter().map(|&s| s.to_owned()).collect(),
        }
    }

    #[test]
    fn test_build_and_lookup() {
        let index = SiteIndex::build(
            &[page("/contracts/erc20", &["usage"], &["ERC20-transfer"])],
            Vec::new(),
        );

        let Lookup::Page(anchors) = index.lookup("/contracts/erc20/") else {
            panic!("expected page");
        };
        assert!(anchors.contains("usage"));
        assert!(anchors.contains("ERC20-transfer"));
        assert_eq!(index.lookup("/contracts/erc721"), Lookup::Missing);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_fallback_lookup() {
        let mut index = SiteIndex::new();
        index.add_fallback(FallbackRoute::parse("/api/[package]/[...path]").unwrap());

        assert_eq!(index.lookup("/api/contracts/token/erc20"), Lookup::Fallback);
        assert_eq!(index.lookup("/api/contracts"), Lookup::Missing);
        assert!(index.is_empty());
    }

    #[test]
    fn test_fallback_route_patterns() {
        let single = FallbackRoute::parse("/blog/[slug]").unwrap();
        assert!(single.matches("/blog/post"));
        assert!(!single.matches("/blog/a/b"));
        assert!(!single.matches("/blog"));

        let literal = FallbackRoute::parse("/v1.0/[id]").unwrap();
        assert!(literal.matches("/v1.0/x"));
        assert!(!literal.matches("/v100/x"));

        assert!(FallbackRoute::parse("/").unwrap().matches("/"));
    }

    #[test]
    fn test_invalid_fallback_routes() {
        for route in ["blog/[slug]", "/blog/[]", "/blog/[...]", "/blog/x[id]"] {
            assert!(
                matches!(FallbackRoute::parse(route), Err(ValidateError::InvalidRoute { .. })),
                "{route}"
            );
        }
    }
}
