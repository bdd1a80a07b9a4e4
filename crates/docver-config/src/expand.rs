//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use std::sync::LazyLock;

use regex::Regex;

use crate::ConfigError;

/// `${NAME}` or `${NAME:-default}`; group 2 is present when a default is given.
static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-[^}]*)?\}").unwrap());

/// Expand environment variable references in a string.
///
/// Only braced references are expanded; a bare `$VAR` is kept as written.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    if let Some(missing) = REFERENCE_RE
        .captures_iter(value)
        .filter(|caps| caps.get(2).is_none())
        .map(|caps| caps[1].to_owned())
        .find(|name| std::env::var(name).is_err())
    {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{missing}}} not set"),
        });
    }

    let expanded = REFERENCE_RE.replace_all(value, |caps: &regex::Captures<'_>| {
        shellexpand::env_with_context_no_errors(&caps[0], |var| std::env::var(var).ok())
            .into_owned()
    });
    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: each test uses its own variable name, so parallel tests do not race
        unsafe {
            std::env::set_var("DOCVER_TEST_SIMPLE", "hello");
        }
        let result = expand_env("${DOCVER_TEST_SIMPLE}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("DOCVER_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: each test uses its own variable name, so parallel tests do not race
        unsafe {
            std::env::remove_var("DOCVER_TEST_UNSET");
        }
        let result = expand_env("${DOCVER_TEST_UNSET:-content}", "test.field").unwrap();
        assert_eq!(result, "content");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: each test uses its own variable name, so parallel tests do not race
        unsafe {
            std::env::remove_var("DOCVER_TEST_MISSING");
        }
        let err = expand_env("${DOCVER_TEST_MISSING}/docs", "content.source_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DOCVER_TEST_MISSING"));
        assert!(err.to_string().contains("content.source_dir"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("content", "test.field").unwrap();
        assert_eq!(result, "content");
    }

    #[test]
    fn test_expand_keeps_bare_dollar_references() {
        // SAFETY: each test uses its own variable name, so parallel tests do not race
        unsafe {
            std::env::set_var("DOCVER_TEST_BARE_ROOT", "/srv");
        }
        let result = expand_env("${DOCVER_TEST_BARE_ROOT}/$HOME/$$", "test.field").unwrap();
        assert_eq!(result, "/srv/$HOME/$$");
        unsafe {
            std::env::remove_var("DOCVER_TEST_BARE_ROOT");
        }
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: each test uses its own variable name, so parallel tests do not race
        unsafe {
            std::env::set_var("DOCVER_TEST_ROOT", "/srv/site");
        }
        let result = expand_env("${DOCVER_TEST_ROOT}/content", "test.field").unwrap();
        assert_eq!(result, "/srv/site/content");
        unsafe {
            std::env::remove_var("DOCVER_TEST_ROOT");
        }
    }
}
