//! Config file loading

use crate::config::Paths;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional path overrides from a `confmerge.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    db_address_file: Option<PathBuf>,
    lb_address_file: Option<PathBuf>,
    credentials_file: Option<PathBuf>,
    response_file: Option<PathBuf>,
}

/// Resolve the handoff paths for `dir`, applying overrides from a config file
/// when one is provided or discovered.
///
/// An explicitly provided config file that fails to read or parse is an error.
/// An auto-discovered one that fails only warns and falls back to the default
/// paths.
pub fn load_paths(dir: &Path, config_path: Option<&Path>) -> Result<Paths> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(dir),
    };

    let defaults = Paths::resolved_in(dir);

    let Some(config_file) = discovered else {
        return Ok(defaults);
    };

    let parsed = match read_file_config(&config_file) {
        Ok(cfg) => cfg,
        Err(e) => {
            if config_path_provided {
                return Err(e);
            }
            // Auto-discovered: warn and fall back to defaults
            tracing::warn!(
                "Failed to load auto-discovered config {}: {:#}",
                config_file.display(),
                e
            );
            return Ok(defaults);
        }
    };

    // Relative overrides resolve against `dir`, where the config file lives.
    let resolve = |override_path: Option<PathBuf>, default: PathBuf| match override_path {
        Some(p) if p.is_absolute() => p,
        Some(p) => dir.join(p),
        None => default,
    };

    Ok(Paths {
        db_address_file: resolve(parsed.db_address_file, defaults.db_address_file),
        lb_address_file: resolve(parsed.lb_address_file, defaults.lb_address_file),
        credentials_file: resolve(parsed.credentials_file, defaults.credentials_file),
        response_file: resolve(parsed.response_file, defaults.response_file),
    })
}

fn read_file_config(config_file: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

fn discover_config(dir: &Path) -> Option<PathBuf> {
    let candidates = ["confmerge.toml", ".confmerge.toml"];

    for candidate in candidates {
        let path = dir.join(candidate);
        if path.exists() {
            return Some(path);
        }
    }

    None
}
