//! Index command - print the content index as JSON

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use coursegraph_store::ContentIndex;

use super::load_config;

/// Run the index command.
///
/// Always scans the content tree, so the output can itself be used as an
/// `index.provider`.
pub fn run(config_path: &Path, root: Option<&Path>) -> Result<()> {
    let config = load_config(config_path, root)?;
    tracing::info!(root = %config.content.root.display(), "Building content index");

    let index = ContentIndex::scan(&config.content.root).wrap_err("Failed to scan content")?;
    println!("{}", index.to_json_pretty()?);

    Ok(())
}
