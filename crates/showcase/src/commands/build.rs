//! Full site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use showcase_site::SiteBuilder;

use crate::config::load_config;

/// Run the build command.
pub async fn run(
    config_path: &Path,
    manifest: Option<PathBuf>,
    work_dir: Option<PathBuf>,
    skip_sync: bool,
) -> Result<()> {
    tracing::info!("Building showcase site...");

    let file_config = load_config(config_path)?;

    let mut config = file_config.site_config(manifest, work_dir);
    config.sync = !skip_sync;

    let result = SiteBuilder::load(config)?.build().await?;

    tracing::info!(
        "Built {} samples ({} builds) in {}ms",
        result.samples,
        result.builds,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.site_dir.display());

    Ok(())
}
