//! Site settings for docver, read from `docver.toml`.
//!
//! Without an explicit path the file is looked up from the working directory
//! upwards; with none found, built-in defaults rooted at the working directory
//! apply. Command-line overrides arrive as [`CliSettings`].
//!
//! `content.source_dir` and `navigation.dir` may reference the environment
//! as `${NAME}` (required) or `${NAME:-fallback}`.
//!
//! ## Example
//!
//! ```toml
//! [content]
//! source_dir = "content"
//!
//! [[content.replacements]]
//! include = ["**/contracts-cairo/**"]
//! vars = { umbrella_version = "3.0.0" }
//!
//! [navigation]
//! dir = "navigation"
//! trees = [
//!   { name = "Ethereum & EVM", file = "ethereum-evm.json" },
//!   { name = "Starknet", file = "starknet.json" },
//! ]
//!
//! [versions]
//! products = ["/relayer", "/monitor"]
//!
//! [versions.libraries]
//! contracts = [
//!   { value = "v5.x", label = "v5.x (latest)" },
//!   { value = "v4.x", label = "v4.x" },
//! ]
//!
//! [validation]
//! check_fragments = true
//! fallback_routes = ["/api/[...path]"]
//! ```

mod expand;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use docver_links::{FallbackRoute, RelativePaths, Scope, ValidateOptions};
use docver_nav::{DEFAULT_FOLDER_PATTERN, VersionFlattener};
use docver_paths::{DEFAULT_SEGMENT_PATTERN, ProductPaths, TabConfig, TabSet, VersionRegistry};
use docver_storage::{DEFAULT_ANCHOR_PATTERN, RegexAnchorExtractor, ReplacementRule, Replacements};
use serde::Deserialize;

/// Command-line overrides; `None` keeps the file's value.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override validation scope pattern.
    pub scope: Option<String>,
    /// Override fragment checking.
    pub check_fragments: Option<bool>,
}

/// File name looked up by discovery.
const CONFIG_FILENAME: &str = "docver.toml";

/// Loaded site settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Navigation configuration (paths are relative strings from TOML).
    navigation: NavigationConfigRaw,
    /// Versioned products and library release lines.
    pub versions: VersionsConfig,
    /// Link validation settings.
    pub validation: ValidationConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Resolved navigation configuration (set after loading).
    #[serde(skip)]
    pub navigation_resolved: NavigationConfig,
    /// File the settings came from; `None` for built-in defaults.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::rooted_at(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    extensions: Option<Vec<String>>,
    replacements: Vec<ReplacementRule>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Root of the markdown content tree.
    pub source_dir: PathBuf,
    /// Published file extensions, without leading dot.
    pub extensions: Vec<String>,
    /// Placeholder replacement rules.
    pub replacements: Vec<ReplacementRule>,
}

/// Navigation tree file entry.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TreeConfig {
    /// Ecosystem name shown in reports (e.g., "Ethereum & EVM").
    pub name: String,
    /// JSON file, relative to the navigation directory.
    pub file: String,
}

/// Raw navigation configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct NavigationConfigRaw {
    dir: Option<String>,
    trees: Vec<TreeConfig>,
    shared_prefixes: Vec<String>,
    hide_tabs_under: Vec<String>,
    tabs: Vec<TabConfig>,
}

/// Navigation tree with its resolved file path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeSource {
    /// Ecosystem name.
    pub name: String,
    /// Absolute path of the tree JSON file.
    pub path: PathBuf,
}

/// Resolved navigation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct NavigationConfig {
    /// Directory holding tree files.
    pub dir: PathBuf,
    /// Trees in configured order.
    pub trees: Vec<TreeSource>,
    /// Path prefixes of products shared between ecosystems.
    pub shared_prefixes: Vec<String>,
    /// Path prefixes where no sidebar tabs are shown.
    pub hide_tabs_under: Vec<String>,
    /// Sidebar tabs in display order.
    pub tabs: Vec<TabConfig>,
}

impl NavigationConfig {
    /// Find a tree by name.
    #[must_use]
    pub fn tree(&self, name: &str) -> Option<&TreeSource> {
        self.trees.iter().find(|t| t.name == name)
    }
}

/// Versioning configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Product roots with `x.y.x` version segments in their URLs.
    pub products: Vec<String>,
    /// Pattern for product version segments.
    pub segment_pattern: String,
    /// Pattern for version folder names in navigation trees.
    pub folder_pattern: String,
    /// Release lines per library.
    pub libraries: VersionRegistry,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            products: vec!["/relayer".to_owned(), "/monitor".to_owned()],
            segment_pattern: DEFAULT_SEGMENT_PATTERN.to_owned(),
            folder_pattern: DEFAULT_FOLDER_PATTERN.to_owned(),
            libraries: VersionRegistry::default(),
        }
    }
}

/// Link validation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Report links to missing anchors.
    pub check_fragments: bool,
    /// Handling of relative link targets.
    pub relative_paths: RelativePaths,
    /// Dynamic route templates.
    pub fallback_routes: Vec<String>,
    /// Component name -> link-bearing attributes. Replaces the default map.
    pub components: BTreeMap<String, Vec<String>>,
    /// Explicit anchor pattern with one capture group.
    pub anchor_pattern: String,
    /// Restrict content validation to matching pages.
    pub scope: Option<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        let defaults = ValidateOptions::default();
        Self {
            check_fragments: defaults.check_fragments,
            relative_paths: defaults.relative_paths,
            fallback_routes: defaults.fallback_routes,
            components: defaults.components,
            anchor_pattern: DEFAULT_ANCHOR_PATTERN.to_owned(),
            scope: None,
        }
    }
}

/// Reasons settings cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly given settings file is missing.
    #[error("No settings file at {}", .0.display())]
    NotFound(PathBuf),
    #[error("Cannot read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed docver.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// A value is present but unusable.
    #[error("Invalid setting {0}")]
    Validation(String),
    /// A `${NAME}` reference has no value.
    #[error("Cannot expand {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.source_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Ok(())
}

/// Nearest `docver.toml` in `start` or one of its ancestors.
fn find_upwards(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}

/// Validation error for `field` caused by `err`.
fn invalid(field: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Validation(format!("{field}: {err}"))
}

impl Config {
    /// Load settings and apply command-line overrides on top.
    ///
    /// `path` must exist when given. Otherwise the nearest `docver.toml` in
    /// the working directory or its ancestors is used, falling back to
    /// defaults rooted at the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, malformed or invalid.
    pub fn load(path: Option<&Path>, overrides: Option<&CliSettings>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir().ok().and_then(|cwd| find_upwards(&cwd)),
        };

        let mut config = match file {
            Some(file) => Self::read(&file)?,
            None => Self::rooted_at(&std::env::current_dir().unwrap_or_default()),
        };
        if let Some(overrides) = overrides {
            config.apply_cli_settings(overrides);
        }
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(scope) = &settings.scope {
            self.validation.scope = Some(scope.clone());
        }
        if let Some(check_fragments) = settings.check_fragments {
            self.validation.check_fragments = check_fragments;
        }
    }

    /// Built-in defaults with relative paths joined onto `base`.
    fn rooted_at(base: &Path) -> Self {
        let mut config = Self {
            content: ContentConfigRaw::default(),
            navigation: NavigationConfigRaw::default(),
            versions: VersionsConfig::default(),
            validation: ValidationConfig::default(),
            content_resolved: ContentConfig::default(),
            navigation_resolved: NavigationConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    fn read(file: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(&std::fs::read_to_string(file)?)?;

        // Paths may contain ${NAME} references, so expand before joining.
        config.expand_env_vars()?;
        config.resolve_paths(file.parent().unwrap_or(Path::new(".")));
        config.config_path = Some(file.to_path_buf());
        config.validate()?;
        Ok(config)
    }

    /// Check every value.
    ///
    /// Compiles every pattern once so that later construction of path
    /// resolvers and validators cannot fail on configuration input.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_navigation()?;
        self.product_paths()?;
        self.flattener()?;
        self.anchor_extractor()?;
        self.replacements()?;
        self.validate_options()?;
        if let Some(scope) = &self.validation.scope {
            Scope::parse(scope).map_err(|e| invalid("validation.scope", e))?;
        }
        Ok(())
    }

    fn validate_navigation(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for tree in &self.navigation.trees {
            require_non_empty(&tree.name, "navigation.trees.name")?;
            require_non_empty(&tree.file, "navigation.trees.file")?;
            if !seen.insert(tree.name.as_str()) {
                return Err(invalid(
                    "navigation.trees",
                    format!("duplicate tree name '{}'", tree.name),
                ));
            }
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.content.source_dir {
            self.content.source_dir = Some(expand::expand_env(dir, "content.source_dir")?);
        }
        if let Some(ref dir) = self.navigation.dir {
            self.navigation.dir = Some(expand::expand_env(dir, "navigation.dir")?);
        }
        Ok(())
    }

    /// Join configured directories onto `config_dir` and fill in defaults.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            source_dir: resolve(self.content.source_dir.as_deref(), "content"),
            extensions: self
                .content
                .extensions
                .clone()
                .unwrap_or_else(|| vec!["md".to_owned(), "mdx".to_owned()]),
            replacements: self.content.replacements.clone(),
        };

        let nav_dir = resolve(self.navigation.dir.as_deref(), "navigation");
        self.navigation_resolved = NavigationConfig {
            trees: self
                .navigation
                .trees
                .iter()
                .map(|t| TreeSource {
                    name: t.name.clone(),
                    path: nav_dir.join(&t.file),
                })
                .collect(),
            dir: nav_dir,
            shared_prefixes: self.navigation.shared_prefixes.clone(),
            hide_tabs_under: self.navigation.hide_tabs_under.clone(),
            tabs: self.navigation.tabs.clone(),
        };
    }

    /// Product path parser for the configured versioned products.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for invalid products or pattern.
    pub fn product_paths(&self) -> Result<ProductPaths, ConfigError> {
        ProductPaths::from_pattern(self.versions.products.clone(), &self.versions.segment_pattern)
            .map_err(|e| invalid("versions", e))
    }

    /// Version folder flattener for navigation trees.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the folder pattern does not compile.
    pub fn flattener(&self) -> Result<VersionFlattener, ConfigError> {
        VersionFlattener::from_pattern(&self.versions.folder_pattern)
            .map_err(|e| invalid("versions.folder_pattern", e))
    }

    /// Explicit anchor extractor.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the anchor pattern does not
    /// compile or has no capture group.
    pub fn anchor_extractor(&self) -> Result<RegexAnchorExtractor, ConfigError> {
        let pattern = &self.validation.anchor_pattern;
        let field = "validation.anchor_pattern";
        let extractor =
            RegexAnchorExtractor::from_pattern(pattern).map_err(|e| invalid(field, e))?;
        if regex::Regex::new(pattern).is_ok_and(|re| re.captures_len() < 2) {
            return Err(ConfigError::Validation(format!(
                "{field}: pattern needs a capture group"
            )));
        }
        Ok(extractor)
    }

    /// Compiled content replacement rules.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for invalid include globs.
    pub fn replacements(&self) -> Result<Replacements, ConfigError> {
        Replacements::new(&self.content_resolved.replacements)
            .map_err(|e| invalid("content.replacements", e))
    }

    /// Link validation options.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for malformed fallback routes.
    pub fn validate_options(&self) -> Result<ValidateOptions, ConfigError> {
        for route in &self.validation.fallback_routes {
            FallbackRoute::parse(route).map_err(|e| invalid("validation.fallback_routes", e))?;
        }
        Ok(ValidateOptions {
            check_fragments: self.validation.check_fragments,
            relative_paths: self.validation.relative_paths,
            components: self.validation.components.clone(),
            fallback_routes: self.validation.fallback_routes.clone(),
        })
    }

    /// Sidebar tabs.
    #[must_use]
    pub fn tab_set(&self) -> TabSet {
        TabSet::new(
            self.navigation_resolved.tabs.clone(),
            self.navigation_resolved.shared_prefixes.clone(),
            self.navigation_resolved.hide_tabs_under.clone(),
        )
    }
}
