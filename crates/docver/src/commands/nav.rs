//! `nav` command implementation.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use docver_config::Config;
use docver_nav::NavigationTree;
use docver_paths::normalize;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Path to configuration file (default: auto-discover docver.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Navigation tree name.
    #[arg(short, long)]
    tree: String,

    /// URL path being viewed. Selects the library version to splice in.
    #[arg(short, long)]
    path: Option<String>,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// Prints the flattened tree entries as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree is unknown or cannot be loaded.
    pub(crate) fn execute(self) -> Result<ExitCode, CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let flattened = flatten(&config, &self.tree, self.path.as_deref())?;
        Output::new().data(&serde_json::to_string_pretty(&flattened.children)?);
        Ok(ExitCode::SUCCESS)
    }
}

fn flatten(config: &Config, name: &str, path: Option<&str>) -> Result<NavigationTree, CliError> {
    let source = config
        .navigation_resolved
        .tree(name)
        .ok_or_else(|| CliError::Usage(format!("Unknown navigation tree '{name}'")))?;
    let tree = NavigationTree::load(source.name.clone(), &source.path)?;

    let current = path.and_then(|p| config.versions.libraries.current_version(normalize(p)));
    if let Some(current) = &current {
        tracing::info!(library = %current.library, version = %current.version, "Viewing library version");
    }

    Ok(config.flattener()?.flatten(&tree, current.as_ref()))
}
