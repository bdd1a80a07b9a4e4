//! Link target classification and resolution.

use std::borrow::Cow;
use std::sync::LazyLock;

use docver_paths::normalize;
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

/// Origin used as the base for URL resolution. Never appears in output.
const SITE_ORIGIN: &str = "https://docs.invalid";

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

/// Handling of relative link targets (`./erc20`, `../guides`, `erc20`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelativePaths {
    /// Resolve against the page URL like a browser would.
    #[default]
    AsUrl,
    /// Skip relative targets.
    Ignore,
}

/// Resolved internal link target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    /// Normalized, percent-decoded site path.
    pub path: String,
    /// Fragment without `#`, if any.
    pub fragment: Option<String>,
}

impl Target {
    /// Split an absolute site URL on its first `#`.
    ///
    /// Query strings are dropped; the path is normalized but not decoded.
    #[must_use]
    pub fn split(url: &str) -> Self {
        let (path, fragment) = match url.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (url, None),
        };
        let path = path.split_once('?').map_or(path, |(p, _)| p);
        Self {
            path: normalize(path).to_owned(),
            fragment: fragment.filter(|f| !f.is_empty()).map(str::to_owned),
        }
    }
}

/// Whether a link target points inside the site and should be checked.
#[must_use]
pub fn is_internal(link: &str, relative: RelativePaths) -> bool {
    if link.is_empty() || link.starts_with("//") || SCHEME_RE.is_match(link) {
        return false;
    }
    if link.starts_with('/') || link.starts_with('#') {
        return true;
    }
    relative == RelativePaths::AsUrl
}

/// Resolve an internal link found on the page at `page_url`.
///
/// Returns `None` when the link cannot be parsed as a URL reference.
#[must_use]
pub fn resolve(page_url: &str, link: &str) -> Option<Target> {
    let base = Url::parse(SITE_ORIGIN).ok()?.join(page_url).ok()?;
    let resolved = base.join(link).ok()?;

    let path = decode(resolved.path());
    let fragment = resolved
        .fragment()
        .filter(|f| !f.is_empty())
        .map(|f| decode(f).into_owned());

    Some(Target {
        path: normalize(&path).to_owned(),
        fragment,
    })
}

fn decode(s: &str) -> Cow<'_, str> {
    percent_decode_str(s).decode_utf8_lossy()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn target(path: &str, fragment: Option<&str>) -> Option<Target> {
        Some(Target {
            path: path.to_owned(),
            fragment: fragment.map(str::to_owned),
        })
    }

    #[test]
    fn test_is_internal() {
        let rel = RelativePaths::AsUrl;
        assert!(is_internal("/contracts", rel));
        assert!(is_internal("#usage", rel));
        assert!(is_internal("./erc20", rel));
        assert!(is_internal("erc20", rel));
        assert!(!is_internal("https://github.com", rel));
        assert!(!is_internal("mailto:security@example.com", rel));
        assert!(!is_internal("//cdn.example.com/x.js", rel));
        assert!(!is_internal("", rel));

        assert!(is_internal("/contracts", RelativePaths::Ignore));
        assert!(!is_internal("./erc20", RelativePaths::Ignore));
    }

    #[test]
    fn test_resolve_absolute() {
        assert_eq!(
            resolve("/contracts/v5.x/erc20", "/contracts/v5.x/erc721#usage"),
            target("/contracts/v5.x/erc721", Some("usage"))
        );
        assert_eq!(resolve("/a", "/b/?tab=1"), target("/b", None));
    }

    #[test]
    fn test_resolve_relative() {
        assert_eq!(
            resolve("/contracts/v5.x/erc20", "./erc721"),
            target("/contracts/v5.x/erc721", None)
        );
        assert_eq!(
            resolve("/contracts/v5.x/erc20", "../v4.x/erc20"),
            target("/contracts/v4.x/erc20", None)
        );
        assert_eq!(resolve("/contracts", "erc20"), target("/erc20", None));
    }

    #[test]
    fn test_resolve_fragment_only() {
        assert_eq!(
            resolve("/contracts/erc20", "#transfer"),
            target("/contracts/erc20", Some("transfer"))
        );
    }

    #[test]
    fn test_resolve_decodes() {
        assert_eq!(
            resolve("/a", "/guides/caf%C3%A9#%C3%BCber"),
            target("/guides/café", Some("über"))
        );
    }

    #[test]
    fn test_resolve_root() {
        assert_eq!(resolve("/contracts", "/"), target("/", None));
    }

    #[test]
    fn test_split() {
        assert_eq!(
            Target::split("/contracts/erc20/#usage"),
            Target {
                path: "/contracts/erc20".to_owned(),
                fragment: Some("usage".to_owned()),
            }
        );
        assert_eq!(Target::split("/a?x=1#"), Target {
            path: "/a".to_owned(),
            fragment: None,
        });
    }
}
