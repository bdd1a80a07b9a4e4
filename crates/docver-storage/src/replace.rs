//! Content variable replacements.
//!
//! Some libraries keep release-specific values (package versions, class
//! hashes) out of the prose and reference them as `{{ name }}`. A rule
//! applies its variables to every document matching one of its globs.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use glob::Pattern;
use regex::{Captures, Regex};
use serde::Deserialize;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap());

/// Replacement rule as written in configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ReplacementRule {
    /// Glob patterns matched against the document path.
    pub include: Vec<String>,
    /// Variable values.
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
}

#[derive(Clone, Debug)]
struct CompiledRule {
    include: Vec<Pattern>,
    vars: BTreeMap<String, String>,
}

/// Compiled replacement rules.
#[derive(Clone, Debug, Default)]
pub struct Replacements {
    rules: Vec<CompiledRule>,
}

impl Replacements {
    /// Compile replacement rules.
    ///
    /// # Errors
    ///
    /// Returns the glob error for the first invalid pattern.
    pub fn new(rules: &[ReplacementRule]) -> Result<Self, glob::PatternError> {
        let rules = rules
            .iter()
            .map(|rule| {
                let include = rule
                    .include
                    .iter()
                    .map(|p| Pattern::new(p))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CompiledRule {
                    include,
                    vars: rule.vars.clone(),
                })
            })
            .collect::<Result<Vec<_>, glob::PatternError>>()?;
        Ok(Self { rules })
    }

    /// Whether no rules are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Substitute placeholders in `content` for the document at `path`.
    ///
    /// Rules apply in order; placeholders without a value are kept verbatim.
    #[must_use]
    pub fn apply(&self, path: &Path, content: String) -> String {
        self.rules
            .iter()
            .filter(|rule| rule.include.iter().any(|p| p.matches_path(path)))
            .fold(content, |content, rule| {
                PLACEHOLDER_RE
                    .replace_all(&content, |caps: &Captures<'_>| {
                        rule.vars
                            .get(&caps[1])
                            .cloned()
                            .unwrap_or_else(|| caps[0].to_owned())
                    })
                    .into_owned()
            })
    }
}
