//! Configuration file resolution for the CLI.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use farmdash_core::{Config, Dashboard, default_config_path};
use tracing::debug;

/// Path given with `--config`, or the platform default.
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path)
}

/// Load and validate the configuration at `path`.
///
/// A missing file yields the defaults.
pub fn load(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    config.validate().context("Invalid configuration")?;
    debug!("Using configuration from {}", path.display());
    Ok(config)
}

/// Open the dashboard described by `config`.
pub fn open_dashboard(config: &Config) -> Result<Dashboard> {
    Dashboard::open(config).with_context(|| {
        format!(
            "Failed to open database at {}",
            config.storage.database.display()
        )
    })
}
