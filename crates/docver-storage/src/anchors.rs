//! Explicit anchor discovery in raw content.
//!
//! Generated API reference pages place `<a id="..."></a>` markers next to
//! each item. Other markup dialects can plug in their own extractor.

use std::sync::LazyLock;

use regex::Regex;

/// Default anchor marker pattern. The first capture group is the anchor.
pub const DEFAULT_ANCHOR_PATTERN: &str = r#"<a id="([^"]+)"></a>"#;

static DEFAULT_ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_ANCHOR_PATTERN).unwrap());

/// Discovers explicit anchors in a page's raw text.
pub trait AnchorExtractor: Send + Sync {
    /// Anchors in order of appearance. May contain duplicates.
    fn extract(&self, content: &str) -> Vec<String>;
}

/// Extracts the first capture group of every match of a regex.
#[derive(Clone, Debug)]
pub struct RegexAnchorExtractor {
    pattern: Regex,
}

impl RegexAnchorExtractor {
    /// Create an extractor from a compiled pattern with one capture group.
    #[must_use]
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }

    /// Create an extractor, compiling the pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex error if the pattern does not compile.
    pub fn from_pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::new)
    }
}

impl Default for RegexAnchorExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_ANCHOR_RE.clone())
    }
}

impl AnchorExtractor for RegexAnchorExtractor {
    fn extract(&self, content: &str) -> Vec<String> {
        self.pattern
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_owned())
            .collect()
    }
}
