//! Command-line interface for confmerge
//!
//! Provides `merge` and `inspect` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod inspect;
mod merge;

/// Merge provisioning handoff files into a deployment response config
#[derive(Parser)]
#[command(name = "confmerge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fold handoff values into the response document and rewrite it in place
    Merge(merge::MergeArgs),

    /// Report what a merge would write without touching the response document
    Inspect(inspect::InspectArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Merge(args) => merge::run(args),
        Commands::Inspect(args) => inspect::run(args),
    }
}
