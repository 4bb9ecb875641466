//! Repository sync command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use showcase_manifest::Manifest;
use showcase_site::RepoSync;

use crate::config::load_config;

/// Run the sync command.
pub async fn run(config_path: &Path, manifest: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?.site_config(manifest, None);
    let manifest = Manifest::load(&config.manifest)?;
    let paths = config.paths()?;

    let repos = RepoSync::default();
    repos.sync_manifest(&manifest, &paths)?;

    for (label, dir) in [("Engine", &paths.engine_root), ("Samples", &paths.samples_root)] {
        tracing::info!("{} at {} ({})", label, dir.display(), repos.head(dir)?);
    }

    Ok(())
}
