//! Manifest check command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use showcase_manifest::Manifest;

use crate::config::load_config;

/// Run the check command.
pub async fn run(config_path: &Path, manifest: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?.site_config(manifest, None);

    let manifest = Manifest::load(&config.manifest)
        .with_context(|| format!("Invalid manifest {}", config.manifest.display()))?;

    tracing::info!("Engine: {} @ {}", manifest.repo, manifest.repo_ref);
    tracing::info!(
        "Samples: {} @ {}",
        manifest.samples_repo,
        manifest.samples_repo_ref
    );

    let mut builds = 0;
    for (sample, language) in manifest.tasks() {
        tracing::info!(
            "{} ({}) -> site/{}/ [output: {}]",
            sample.name,
            language.label(),
            sample.dir_name(language),
            sample.output_kind()
        );
        builds += 1;
    }

    tracing::info!(
        "Manifest OK: {} samples, {} builds",
        manifest.samples.len(),
        builds
    );

    Ok(())
}
