//! `resolve` command implementation.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use docver_config::Config;
use docver_paths::{CurrentVersion, LibraryVersion, normalize};
use serde::Serialize;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Path to configuration file (default: auto-discover docver.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// URL path to resolve (e.g., /relayer/1.3.x/quickstart).
    path: String,

    /// Also compute the path of the same page in this library version.
    #[arg(long)]
    switch_to: Option<String>,
}

/// Product path breakdown.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct ProductResolution {
    base: String,
    version: Option<String>,
    subpath: String,
}

/// Everything known about a URL path.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct Resolution {
    path: String,
    product: Option<ProductResolution>,
    library: Option<CurrentVersion>,
    selectable_versions: Vec<LibraryVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    switched: Option<String>,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub(crate) fn execute(self) -> Result<ExitCode, CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let resolution = resolve(&config, &self.path, self.switch_to.as_deref())?;
        Output::new().data(&serde_json::to_string_pretty(&resolution)?);
        Ok(ExitCode::SUCCESS)
    }
}

fn resolve(config: &Config, path: &str, switch_to: Option<&str>) -> Result<Resolution, CliError> {
    let path = normalize(path);
    let products = config.product_paths()?;
    let registry = &config.versions.libraries;

    let product = products.parse(path).map(|parsed| ProductResolution {
        base: parsed.base.to_owned(),
        version: parsed.version.map(str::to_owned),
        subpath: parsed.subpath.to_owned(),
    });

    let switched = match switch_to {
        Some(version) => Some(registry.switch_version(path, version).ok_or_else(|| {
            CliError::Usage(format!("Cannot switch version of '{path}': no version segment"))
        })?),
        None => None,
    };

    Ok(Resolution {
        path: path.to_owned(),
        product,
        library: registry.current_version(path),
        selectable_versions: registry
            .selectable_versions(path)
            .map(<[LibraryVersion]>::to_vec)
            .unwrap_or_default(),
        switched,
    })
}
