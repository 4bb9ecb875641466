//! Filesystem helpers shared by every pipeline stage.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Errors raised while copying or moving files.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("Source directory not found: {0}")]
    MissingSource(PathBuf),

    #[error("Build output has no entry page {0}")]
    MissingEntryPage(PathBuf),

    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StageError {
    pub(crate) fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Replace `dst` with a deep copy of `src`.
///
/// Does nothing when `src` does not exist, leaving `dst` untouched. Returns
/// whether a copy was made.
pub fn replace_directory(src: &Path, dst: &Path) -> Result<bool, StageError> {
    if !src.exists() {
        return Ok(false);
    }

    if dst.is_dir() {
        fs::remove_dir_all(dst).map_err(|e| StageError::io("remove", dst, e))?;
    }

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            StageError::io("read", &path, io::Error::other(e))
        })?;

        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| StageError::io("create", &target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| StageError::io("copy", entry.path(), e))?;
        }
    }

    Ok(true)
}

/// Move the entries of `src` whose extension is in `extensions` into a fresh `dst`.
///
/// `dst` is emptied first. Extensions are compared case-insensitively and
/// without the leading dot. Everything else stays in `src`. Returns the
/// number of entries moved.
pub fn move_filtered(src: &Path, dst: &Path, extensions: &[&str]) -> Result<usize, StageError> {
    if !src.is_dir() {
        return Err(StageError::MissingSource(src.to_path_buf()));
    }

    if dst.is_dir() {
        fs::remove_dir_all(dst).map_err(|e| StageError::io("remove", dst, e))?;
    }
    fs::create_dir_all(dst).map_err(|e| StageError::io("create", dst, e))?;

    let entries = fs::read_dir(src).map_err(|e| StageError::io("read", src, e))?;

    let mut moved = 0;
    for entry in entries {
        let entry = entry.map_err(|e| StageError::io("read", src, e))?;
        let path = entry.path();

        if !has_extension(&path, extensions) {
            continue;
        }

        let target = dst.join(entry.file_name());
        move_entry(&path, &target)?;
        tracing::debug!("Moved {} -> {}", path.display(), target.display());
        moved += 1;
    }

    Ok(moved)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|allowed| *allowed == ext))
}

/// Rename, falling back to copy and delete across filesystems.
fn move_entry(from: &Path, to: &Path) -> Result<(), StageError> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    if from.is_dir() {
        replace_directory(from, to)?;
        fs::remove_dir_all(from).map_err(|e| StageError::io("remove", from, e))
    } else {
        fs::copy(from, to).map_err(|e| StageError::io("copy", from, e))?;
        fs::remove_file(from).map_err(|e| StageError::io("remove", from, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    fn names(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn replace_copies_tree() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("css");
        fs::create_dir_all(src.join("fonts")).unwrap();
        fs::write(src.join("style.css"), "body {}").unwrap();
        fs::write(src.join("fonts/a.woff"), "font").unwrap();

        let dst = temp.path().join("site/css");
        assert!(replace_directory(&src, &dst).unwrap());

        assert_eq!(fs::read_to_string(dst.join("style.css")).unwrap(), "body {}");
        assert!(dst.join("fonts/a.woff").exists());
    }

    #[test]
    fn replace_removes_stale_files() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("img");
        let dst = temp.path().join("site/img");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("logo.png"), "new").unwrap();
        fs::write(dst.join("old.png"), "stale").unwrap();

        replace_directory(&src, &dst).unwrap();

        assert_eq!(names(&dst), BTreeSet::from(["logo.png".to_string()]));
    }

    #[test]
    fn replace_without_source_is_noop() {
        let temp = tempdir().unwrap();
        let dst = temp.path().join("site/js");
        fs::create_dir_all(&dst).unwrap();
        fs::write(dst.join("app.js"), "keep").unwrap();

        let copied = replace_directory(&temp.path().join("missing"), &dst).unwrap();

        assert!(!copied);
        assert_eq!(fs::read_to_string(dst.join("app.js")).unwrap(), "keep");
    }

    #[test]
    fn moves_only_allowed_extensions() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("web");
        let dst = temp.path().join("site/cube");
        fs::create_dir_all(&src).unwrap();
        for file in ["cube.html", "cube.JS", "cube.wasm", "cube.o", "Makefile"] {
            fs::write(src.join(file), file).unwrap();
        }

        let moved = move_filtered(&src, &dst, &["html", "js", "wasm"]).unwrap();

        assert_eq!(moved, 3);
        assert_eq!(
            names(&dst),
            BTreeSet::from([
                "cube.JS".to_string(),
                "cube.html".to_string(),
                "cube.wasm".to_string(),
            ])
        );
        assert_eq!(
            names(&src),
            BTreeSet::from(["Makefile".to_string(), "cube.o".to_string()])
        );
    }

    #[test]
    fn move_clears_previous_destination() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("web");
        let dst = temp.path().join("site/cube");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("cube.html"), "new").unwrap();
        fs::write(dst.join("stale.data"), "old").unwrap();

        move_filtered(&src, &dst, &["html", "data"]).unwrap();

        assert_eq!(names(&dst), BTreeSet::from(["cube.html".to_string()]));
    }

    #[test]
    fn move_is_repeatable() {
        let temp = tempdir().unwrap();
        let src = temp.path().join("web");
        let dst = temp.path().join("site/cube");

        let mut results = Vec::new();
        for _ in 0..2 {
            fs::create_dir_all(&src).unwrap();
            fs::write(src.join("cube.html"), "page").unwrap();
            fs::write(src.join("cube.wasm"), "bin").unwrap();

            move_filtered(&src, &dst, &["html", "wasm"]).unwrap();
            results.push(names(&dst));
        }

        assert_eq!(results[0], results[1]);
    }

    #[test]
    fn move_requires_source() {
        let temp = tempdir().unwrap();
        let result = move_filtered(
            &temp.path().join("missing"),
            &temp.path().join("dst"),
            &["html"],
        );

        assert!(matches!(result, Err(StageError::MissingSource(_))));
        assert!(!temp.path().join("dst").exists());
    }
}
