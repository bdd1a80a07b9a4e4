//! `tabs` command implementation.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use docver_config::Config;
use docver_paths::{ActiveMatcher, SidebarTab};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tabs command.
#[derive(Args)]
pub(crate) struct TabsArgs {
    /// Path to configuration file (default: auto-discover docver.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// URL path being viewed.
    path: String,

    /// Ecosystem the visitor last browsed (decides ownership of shared products).
    #[arg(long, env = "DOCVER_LAST_ECOSYSTEM")]
    last_ecosystem: Option<String>,
}

impl TabsArgs {
    /// Execute the tabs command.
    ///
    /// Prints one tab per line; the active tab is marked with `*`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub(crate) fn execute(self) -> Result<ExitCode, CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let (tabs, active) = tabs(&config, &self.path, self.last_ecosystem.as_deref())?;

        let output = Output::new();
        if tabs.is_empty() {
            output.info("No tabs shown for this path");
        }
        for (i, tab) in tabs.iter().enumerate() {
            let marker = if active == Some(i) { '*' } else { ' ' };
            output.data(&format!("{marker} {}\t{}", tab.title, tab.url));
        }
        Ok(ExitCode::SUCCESS)
    }
}

/// Resolve tabs for `path` and the index of the active one.
fn tabs(
    config: &Config,
    path: &str,
    last_ecosystem: Option<&str>,
) -> Result<(Vec<SidebarTab>, Option<usize>), CliError> {
    let tabs = config.tab_set().resolve(path, last_ecosystem);
    let matcher = ActiveMatcher::new(config.product_paths()?);
    let active = tabs.iter().position(|tab| matcher.is_tab_active(tab, path));
    Ok((tabs, active))
}
