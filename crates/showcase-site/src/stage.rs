//! Moves build tool output into the site tree.

use std::fs;
use std::path::{Path, PathBuf};

use showcase_build::{BuildTask, OutputLease};

use crate::staging::{move_filtered, StageError};

/// File types that make up a web build.
pub const ARTIFACT_EXTENSIONS: &[&str] = &["html", "map", "wasm", "js", "data"];

/// Canonical entry page of every sample directory.
pub const ENTRY_PAGE: &str = "index.html";

/// Move the artifacts of `task` out of the leased output directory.
///
/// The artifacts land in `site_dir/<app>[-lua]/` and the tool's
/// `<app>.html` is renamed to `index.html`. Returns the sample directory.
pub fn stage_artifacts(
    lease: &OutputLease<'_>,
    site_dir: &Path,
    task: &BuildTask<'_>,
) -> Result<PathBuf, StageError> {
    let dst = site_dir.join(task.dir_name());

    let moved = move_filtered(lease.path(), &dst, ARTIFACT_EXTENSIONS)?;

    let produced = dst.join(task.produced_page());
    if !produced.is_file() {
        return Err(StageError::MissingEntryPage(produced));
    }

    let entry = dst.join(ENTRY_PAGE);
    fs::rename(&produced, &entry).map_err(|e| StageError::io("rename", &produced, e))?;

    tracing::debug!("Staged {} files into {}", moved, dst.display());

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use showcase_build::OutputSlot;
    use showcase_manifest::{Language, SampleEntry};
    use tempfile::tempdir;

    fn sample() -> SampleEntry {
        SampleEntry {
            name: "Hello".to_string(),
            desc: String::new(),
            path: "hello_world".to_string(),
            langs: vec![Language::Cpp, Language::Lua],
            output: None,
        }
    }

    #[tokio::test]
    async fn stages_into_language_directory() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("web");
        let site = temp.path().join("site");
        fs::create_dir_all(&out).unwrap();
        for file in [
            "hello-world.html",
            "hello-world.js",
            "hello-world.wasm",
            "hello-world.data",
            "hello-world.wasm.map",
            "hello-world.o",
        ] {
            fs::write(out.join(file), file).unwrap();
        }

        let sample = sample();
        let task = BuildTask::new(&sample, Language::Lua, temp.path(), "https://x");
        let slot = OutputSlot::new(&out);
        let lease = slot.acquire().await;

        let dir = stage_artifacts(&lease, &site, &task).unwrap();

        assert_eq!(dir, site.join("hello-world-lua"));
        assert!(dir.join("index.html").exists());
        assert!(!dir.join("hello-world.html").exists());
        assert!(dir.join("hello-world.wasm").exists());
        assert!(dir.join("hello-world.wasm.map").exists());
        assert!(!dir.join("hello-world.o").exists());
        assert!(out.join("hello-world.o").exists());
    }

    #[tokio::test]
    async fn missing_entry_page_is_an_error() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("web");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("other.html"), "x").unwrap();

        let sample = sample();
        let task = BuildTask::new(&sample, Language::Cpp, temp.path(), "https://x");
        let slot = OutputSlot::new(&out);
        let lease = slot.acquire().await;

        let result = stage_artifacts(&lease, &temp.path().join("site"), &task);

        assert!(matches!(result, Err(StageError::MissingEntryPage(_))));
    }

    #[tokio::test]
    async fn missing_output_directory_is_an_error() {
        let temp = tempdir().unwrap();

        let sample = sample();
        let task = BuildTask::new(&sample, Language::Cpp, temp.path(), "https://x");
        let slot = OutputSlot::new(temp.path().join("never-built"));
        let lease = slot.acquire().await;

        let result = stage_artifacts(&lease, &temp.path().join("site"), &task);

        assert!(matches!(result, Err(StageError::MissingSource(_))));
    }
}
