//! docver CLI - version-aware documentation navigation and link checking.
//!
//! Provides commands for:
//! - `check-links`: Validate links in content and navigation trees
//! - `nav`: Print a navigation tree flattened for a viewing context
//! - `resolve`: Show how a URL path resolves to a product, library and version
//! - `tabs`: Show sidebar tabs for a URL path

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckLinksArgs, NavArgs, ResolveArgs, TabsArgs};
use output::Output;

/// Exit status for runs that could not complete.
const EXIT_FATAL: u8 = 2;

/// docver - version-aware documentation navigation and link checker.
#[derive(Parser)]
#[command(name = "docver", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate links in page content and navigation trees.
    CheckLinks(CheckLinksArgs),
    /// Print a navigation tree flattened for a viewing context.
    Nav(NavArgs),
    /// Resolve a URL path to its product, library and version.
    Resolve(ResolveArgs),
    /// Show sidebar tabs for a URL path.
    Tabs(TabsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::CheckLinks(args) if args.verbose);

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::CheckLinks(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
        Commands::Resolve(args) => args.execute(),
        Commands::Tabs(args) => args.execute(),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            output.error(format!("Error: {err}"));
            ExitCode::from(EXIT_FATAL)
        }
    }
}
