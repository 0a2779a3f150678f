//! Config directory resolution.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Log file written while the terminal UI owns the screen.
const LOG_FILE_NAME: &str = "cinesearch.log";

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Otherwise returns `~/.config/cinesearch/config.toml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join("config.toml"));
    }

    let home = std::env::var("HOME").context("HOME environment variable is not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("cinesearch")
        .join("config.toml"))
}

/// Log file next to the config file.
#[must_use]
pub fn log_file_path(config_path: &Path) -> PathBuf {
    config_path.with_file_name(LOG_FILE_NAME)
}
