//! `check-links` command implementation.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, ValueEnum};
use docver_config::{CliSettings, Config};
use docver_links::{Scope, ValidationReport, Validator};
use docver_nav::NavigationTree;
use docver_storage::{FsContentSource, Page, PageLoader};

use crate::error::CliError;
use crate::output::{Output, Tone};

/// Exit status when broken links were found.
const EXIT_ISSUES: u8 = 1;

/// Report format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Text,
    Json,
}

impl Format {
    /// Pick a format from an explicit flag or the output file extension.
    fn infer(explicit: Option<Self>, output: Option<&Path>) -> Self {
        explicit.unwrap_or_else(|| {
            match output.and_then(Path::extension).and_then(|e| e.to_str()) {
                Some("json") => Self::Json,
                _ => Self::Text,
            }
        })
    }
}

/// Arguments for the check-links command.
#[derive(Args)]
pub(crate) struct CheckLinksArgs {
    /// Path to configuration file (default: auto-discover docver.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Write the report to a file instead of the console.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format (default: inferred from --output extension, else text).
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Only check pages whose URL or file path matches this pattern.
    /// `*` matches anything; a leading `/` anchors at the URL root.
    #[arg(long)]
    scope: Option<String>,

    /// Do not check `#fragment` parts of internal links.
    #[arg(long, conflicts_with = "no_ignore_fragments")]
    ignore_fragments: bool,

    /// Check `#fragment` parts of internal links (overrides config).
    #[arg(long)]
    no_ignore_fragments: bool,

    /// Warn about unreadable pages instead of aborting.
    #[arg(long)]
    skip_unreadable: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl CheckLinksArgs {
    /// Execute the check-links command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, content or navigation cannot be loaded.
    pub(crate) fn execute(self) -> Result<ExitCode, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            scope: self.scope,
            check_fragments: self
                .ignore_fragments
                .then_some(false)
                .or(self.no_ignore_fragments.then_some(true)),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let output = Output::new();

        let report = run(&config, self.skip_unreadable, &output)?;

        let format = Format::infer(self.format, self.output.as_deref());
        let rendered = match format {
            Format::Text => report.to_text(),
            Format::Json => report.to_json()?,
        };

        if let Some(path) = &self.output {
            std::fs::write(path, rendered)?;
            output.info(format!("Results saved to {}", path.display()));
            print_summary(&output, &report);
        } else if format == Format::Json {
            output.data(&rendered);
        } else {
            print_report(&output, &report);
        }

        Ok(if report.has_issues() {
            ExitCode::from(EXIT_ISSUES)
        } else {
            ExitCode::SUCCESS
        })
    }
}

/// Load pages and navigation trees, then validate them.
fn run(config: &Config, skip_unreadable: bool, output: &Output) -> Result<ValidationReport, CliError> {
    let scope = Scope::parse(config.validation.scope.as_deref().unwrap_or_default())?;
    let pages = load_pages(config, skip_unreadable, output)?;

    let trees = config
        .navigation_resolved
        .trees
        .iter()
        .map(|tree| NavigationTree::load(tree.name.clone(), &tree.path))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(
        pages = pages.len(),
        trees = trees.len(),
        scope = %config.validation.scope.as_deref().unwrap_or("*"),
        "Checking links"
    );

    let validator = Validator::new(config.validate_options()?)?;
    Ok(validator.validate(&pages, &trees, &scope))
}

fn load_pages(config: &Config, skip_unreadable: bool, output: &Output) -> Result<Vec<Page>, CliError> {
    let content = &config.content_resolved;
    let source = FsContentSource::new(content.source_dir.clone())
        .with_extensions(content.extensions.clone());
    let loader = PageLoader::new(Arc::new(source))
        .with_extractor(config.anchor_extractor()?)
        .with_replacements(config.replacements()?);

    if !skip_unreadable {
        return Ok(loader.load_all()?);
    }

    let outcome = loader.load_lenient()?;
    for (_, err) in &outcome.failures {
        output.warning(format!("Skipped: {err}"));
    }
    Ok(outcome.pages)
}

fn print_report(output: &Output, report: &ValidationReport) {
    for file in report.files.iter().filter(|f| !f.issues.is_empty()) {
        output.say(Tone::Heading, format!("Invalid URLs in {}:", file.file));
        for issue in &file.issues {
            output.info(format!(
                "{}: {} at line {} column {}",
                issue.url, issue.reason, issue.line, issue.column
            ));
        }
        output.say(Tone::Muted, "------");
    }

    if !report.navigation.is_empty() {
        output.info("");
        output.say(Tone::Heading, "Invalid URLs in Navigation Trees:");
        for issue in &report.navigation {
            output.info(format!("{}: {} - {}", issue.tree, issue.url, issue.reason));
        }
        output.say(Tone::Muted, "------");
    }

    output.info("");
    print_summary(output, report);
}

fn print_summary(output: &Output, report: &ValidationReport) {
    if report.has_issues() {
        output.error(report.summary());
    } else {
        output.say(
            Tone::Good,
            format!("No broken links found in {} files", report.total_files()),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "docver.toml",
            r#"
[content]
source_dir = "content"

[navigation]
dir = "navigation"
trees = [{ name = "main", file = "main.json" }]
"#,
        );
        write(root, "content/index.mdx", "# Home\n\n[Guide](/guide#setup)\n");
        write(
            root,
            "content/guide.mdx",
            "# Guide\n\n## Setup\n\n[Missing](/missing)\n[Bad anchor](#nope)\n",
        );
        write(
            root,
            "navigation/main.json",
            r#"[{"type": "page", "name": "Guide", "url": "/guide"},
                {"type": "page", "name": "Gone", "url": "/gone"}]"#,
        );
        dir
    }

    #[test]
    fn test_format_explicit_wins() {
        assert_eq!(
            Format::infer(Some(Format::Text), Some(Path::new("out.json"))),
            Format::Text
        );
    }

    #[test]
    fn test_format_inferred_from_extension() {
        assert_eq!(Format::infer(None, Some(Path::new("out.json"))), Format::Json);
        assert_eq!(Format::infer(None, Some(Path::new("out.txt"))), Format::Text);
        assert_eq!(Format::infer(None, None), Format::Text);
    }

    #[test]
    fn test_run_reports_content_and_navigation_issues() {
        let dir = site();
        let config = Config::load(Some(&dir.path().join("docver.toml")), None).unwrap();

        let report = run(&config, false, &Output::new()).unwrap();

        assert_eq!(report.total_files(), 2);
        assert_eq!(report.files_with_issues(), 1);
        assert_eq!(report.link_issues(), 2);
        assert_eq!(report.navigation.len(), 1);
        assert_eq!(report.navigation[0].url, "/gone");
    }

    #[test]
    fn test_run_without_fragment_checks() {
        let dir = site();
        let settings = CliSettings {
            check_fragments: Some(false),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&dir.path().join("docver.toml")), Some(&settings)).unwrap();

        let report = run(&config, false, &Output::new()).unwrap();

        assert_eq!(report.link_issues(), 1);
    }

    #[test]
    fn test_run_scoped_to_home_page() {
        let dir = site();
        let settings = CliSettings {
            scope: Some("/".to_owned()),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&dir.path().join("docver.toml")), Some(&settings)).unwrap();

        let report = run(&config, false, &Output::new()).unwrap();

        assert_eq!(report.total_files(), 2);
        assert_eq!(report.link_issues(), 2);

        let settings = CliSettings {
            scope: Some("/index-only".to_owned()),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&dir.path().join("docver.toml")), Some(&settings)).unwrap();
        let report = run(&config, false, &Output::new()).unwrap();
        assert_eq!(report.total_files(), 0);
        assert_eq!(report.navigation.len(), 1);
    }

    #[test]
    fn test_run_missing_tree_file_is_fatal() {
        let dir = site();
        fs::remove_file(dir.path().join("navigation/main.json")).unwrap();
        let config = Config::load(Some(&dir.path().join("docver.toml")), None).unwrap();

        let err = run(&config, false, &Output::new()).unwrap_err();

        assert!(matches!(err, CliError::Navigation(_)));
    }
}
