//! Library version registry.
//!
//! Libraries with folder-based release lines (`/contracts/v5.x/...`) are
//! listed here with their selectable versions, newest first.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A selectable version of a library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryVersion {
    /// Path segment and navigation folder name (e.g., `v5.x`).
    pub value: String,
    /// Display label (e.g., `5.x`).
    pub label: String,
}

/// Library and version the visitor is currently browsing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CurrentVersion {
    /// Library name (first path segment).
    pub library: String,
    /// Version value (second path segment).
    pub version: String,
}

/// Mapping from library name to its ordered versions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct VersionRegistry {
    libraries: BTreeMap<String, Vec<LibraryVersion>>,
}

impl VersionRegistry {
    /// Create a registry from library descriptors.
    #[must_use]
    pub fn new(libraries: BTreeMap<String, Vec<LibraryVersion>>) -> Self {
        Self { libraries }
    }

    /// Versions for a library, empty when the library is unknown.
    #[must_use]
    pub fn versions_for(&self, library: &str) -> &[LibraryVersion] {
        self.libraries.get(library).map_or(&[], Vec::as_slice)
    }

    /// Registered library names.
    pub fn libraries(&self) -> impl Iterator<Item = &str> {
        self.libraries.keys().map(String::as_str)
    }

    /// Detect the library version from a URL path.
    ///
    /// The first segment must be a registered library and the second one of
    /// its version values.
    #[must_use]
    pub fn current_version(&self, path: &str) -> Option<CurrentVersion> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let library = segments.next()?;
        let version = segments.next()?;

        self.versions_for(library)
            .iter()
            .any(|v| v.value == version)
            .then(|| CurrentVersion {
                library: library.to_owned(),
                version: version.to_owned(),
            })
    }

    /// Versions to offer in a version selector for `path`.
    ///
    /// Returns `None` when the path has no library version or the library
    /// has nothing to switch to.
    #[must_use]
    pub fn selectable_versions(&self, path: &str) -> Option<&[LibraryVersion]> {
        let current = self.current_version(path)?;
        let versions = self.versions_for(&current.library);
        (versions.len() > 1).then_some(versions)
    }

    /// Display label for a library version, falling back to the value.
    #[must_use]
    pub fn label_for<'a>(&'a self, library: &str, value: &'a str) -> &'a str {
        self.versions_for(library)
            .iter()
            .find(|v| v.value == value)
            .map_or(value, |v| v.label.as_str())
    }

    /// Path of the same page in another version of the current library.
    ///
    /// Returns `None` when `path` has fewer than two segments.
    #[must_use]
    pub fn switch_version(&self, path: &str, new_version: &str) -> Option<String> {
        if let Some(current) = self.current_version(path)
            && current.version == new_version
        {
            return Some(path.to_owned());
        }
        replace_version_segment(path, new_version)
    }
}

/// Rewrite the version segment of `path`.
///
/// Empty segments are dropped, so the result never has a trailing slash.
/// Returns `None` when the path has fewer than two segments.
#[must_use]
fn replace_version_segment(path: &str, new_version: &str) -> Option<String> {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 2 {
        return None;
    }
    segments[1] = new_version;
    Some(format!("/{}", segments.join("/")))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn registry() -> VersionRegistry {
        toml::from_str(
            r#"
contracts = [{ value = "v5.x", label = "5.x" }, { value = "v4.x", label = "4.x" }]
cairo-contracts = [{ value = "v2.x", label = "2.x" }]
tools = []
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_versions_for_known_library() {
        let registry = registry();
        let values: Vec<_> = registry
            .versions_for("contracts")
            .iter()
            .map(|v| v.value.as_str())
            .collect();
        assert_eq!(values, vec!["v5.x", "v4.x"]);
    }

    #[test]
    fn test_versions_for_unknown_library() {
        assert!(registry().versions_for("nope").is_empty());
    }

    #[test]
    fn test_current_version_from_path() {
        let registry = registry();
        assert_eq!(
            registry.current_version("/contracts/v4.x/erc20"),
            Some(CurrentVersion {
                library: "contracts".to_owned(),
                version: "v4.x".to_owned(),
            })
        );
        assert_eq!(
            registry.current_version("/contracts/v5.x").unwrap().version,
            "v5.x"
        );
    }

    #[test]
    fn test_current_version_requires_registered_version() {
        let registry = registry();
        assert_eq!(registry.current_version("/contracts/v3.x/erc20"), None);
        assert_eq!(registry.current_version("/contracts/erc20"), None);
        assert_eq!(registry.current_version("/contracts"), None);
        assert_eq!(registry.current_version("/tools/v1.x"), None);
        assert_eq!(registry.current_version("/"), None);
    }

    #[test]
    fn test_selectable_versions() {
        let registry = registry();
        assert_eq!(
            registry.selectable_versions("/contracts/v5.x/erc20").map(<[_]>::len),
            Some(2)
        );
        // Single version: nothing to switch to
        assert!(registry.selectable_versions("/cairo-contracts/v2.x").is_none());
        assert!(registry.selectable_versions("/contracts/erc20").is_none());
    }

    #[test]
    fn test_switch_version() {
        let registry = registry();
        assert_eq!(
            registry.switch_version("/contracts/v4.x/token/erc20", "v5.x"),
            Some("/contracts/v5.x/token/erc20".to_owned())
        );
        assert_eq!(
            registry.switch_version("/contracts/v5.x/erc20/", "v5.x"),
            Some("/contracts/v5.x/erc20/".to_owned())
        );
        assert_eq!(registry.switch_version("/contracts", "v5.x"), None);
    }

    #[test]
    fn test_label_for() {
        let registry = registry();
        assert_eq!(registry.label_for("contracts", "v4.x"), "4.x");
        assert_eq!(registry.label_for("contracts", "v9.x"), "v9.x");
    }
}
