//! Merge command implementation

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::{load_paths, EnvOverrides, Paths};
use crate::merge;
use crate::output;

#[derive(Args)]
pub struct MergeArgs {
    /// Directory holding the handoff files
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Path to config file (confmerge.toml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database address file (first line, trimmed)
    #[arg(long, value_name = "FILE")]
    pub db_address_file: Option<PathBuf>,

    /// Load balancer address file (first line, trimmed)
    #[arg(long, value_name = "FILE")]
    pub lb_address_file: Option<PathBuf>,

    /// Splunk credentials file
    #[arg(long, value_name = "FILE")]
    pub credentials_file: Option<PathBuf>,

    /// Response document to rewrite in place
    #[arg(long, value_name = "FILE")]
    pub response_file: Option<PathBuf>,

    /// Print the merged document to stdout instead of rewriting the file
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: MergeArgs) -> Result<()> {
    let paths = resolve_paths(
        &args.dir,
        args.config.as_deref(),
        [args.db_address_file, args.lb_address_file, args.credentials_file, args.response_file],
    )?;
    let env = EnvOverrides::capture();

    if args.dry_run {
        let merged = merge::preview(&paths)?;
        println!("{}", output::to_pretty(&merged)?);
        return Ok(());
    }

    merge::run(&paths, &env)
}

/// Config-file paths first, then CLI flags on top.
fn resolve_paths(
    dir: &Path,
    config: Option<&Path>,
    overrides: [Option<PathBuf>; 4],
) -> Result<Paths> {
    let mut paths = load_paths(dir, config)?;
    let [db, lb, credentials, response] = overrides;
    if let Some(p) = db {
        paths.db_address_file = p;
    }
    if let Some(p) = lb {
        paths.lb_address_file = p;
    }
    if let Some(p) = credentials {
        paths.credentials_file = p;
    }
    if let Some(p) = response {
        paths.response_file = p;
    }
    Ok(paths)
}
