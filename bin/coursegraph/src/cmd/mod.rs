//! Command implementations.

pub mod check;
pub mod index;
pub mod schema;
pub mod serve;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use coursegraph_core::Config;

/// Load the layered configuration, optionally pointing it at another
/// content root.
pub fn load_config(config_path: &Path, root: Option<&Path>) -> Result<Config> {
    let mut config = Config::load_with_env(Some(config_path))
        .wrap_err_with(|| format!("Failed to load configuration from {}", config_path.display()))?;

    if let Some(root) = root {
        config.content.root = root.to_path_buf();
    }

    tracing::debug!(root = %config.content.root.display(), "configuration loaded");
    Ok(config)
}
