//! Page scope filter.
//!
//! A scope restricts content validation to matching pages. `*` matches any
//! run of characters. Patterns starting with `/` are anchored at the start of
//! the URL; other patterns may match after any prefix:
//!
//! - `/contracts/*` -> `^/contracts/.*`
//! - `contracts/*` -> `^.*contracts/.*`
//!
//! The rest of the pattern is a regular expression.

use std::path::Path;

use regex::Regex;

use crate::ValidateError;

/// Filter selecting pages by URL or source path.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    pattern: Option<Regex>,
}

impl Scope {
    /// Scope matching every page.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse a scope pattern. An empty pattern matches every page.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::InvalidScope`] if the pattern does not compile.
    pub fn parse(pattern: &str) -> Result<Self, ValidateError> {
        if pattern.is_empty() {
            return Ok(Self::all());
        }

        let expanded = pattern.replace('*', ".*");
        let anchored = if let Some(rest) = expanded.strip_prefix('/') {
            format!("^/{rest}")
        } else if expanded.starts_with('^') {
            expanded
        } else {
            format!("^.*{expanded}")
        };

        let regex = Regex::new(&anchored).map_err(|source| ValidateError::InvalidScope {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(Self {
            pattern: Some(regex),
        })
    }

    /// Whether the scope matches every page.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.pattern.is_none()
    }

    /// Whether a page with this URL and source path is in scope.
    #[must_use]
    pub fn matches(&self, url: &str, path: &Path) -> bool {
        let Some(pattern) = &self.pattern else {
            return true;
        };
        pattern.is_match(url) || pattern.is_match(&path.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(scope: &str, url: &str, path: &str) -> bool {
        Scope::parse(scope).unwrap().matches(url, Path::new(path))
    }

    #[test]
    fn test_absolute_scope_is_anchored() {
        assert!(matches("/contracts/*", "/contracts/v5.x/erc20", "x.mdx"));
        assert!(!matches("/contracts/*", "/stellar-contracts/erc20", "x.mdx"));
        assert!(!matches("/contracts/*", "/contracts", "x.mdx"));
    }

    #[test]
    fn test_relative_scope_matches_anywhere() {
        assert!(matches("contracts/*", "/stellar-contracts/erc20", "x.mdx"));
        assert!(matches("v5.x/*", "/other", "content/contracts/v5.x/erc20.mdx"));
        assert!(!matches("relayer/*", "/contracts/erc20", "content/contracts/erc20.mdx"));
    }

    #[test]
    fn test_scope_matches_source_path() {
        assert!(matches(
            "content/contracts/*",
            "/whatever",
            "/repo/content/contracts/erc20.mdx"
        ));
    }

    #[test]
    fn test_empty_scope_matches_all() {
        let scope = Scope::parse("").unwrap();
        assert!(scope.is_all());
        assert!(scope.matches("/anything", Path::new("any.mdx")));
    }

    #[test]
    fn test_invalid_scope() {
        let err = Scope::parse("/contracts/(*").unwrap_err();
        assert!(matches!(err, ValidateError::InvalidScope { ref pattern, .. } if pattern == "/contracts/(*"));
    }
}
