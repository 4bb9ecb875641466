//! Temporary shell file handed to the build tool.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A rendered shell file that is removed when dropped.
///
/// The build tool reads the file during its run; dropping the guard after the
/// invocation removes it whether the build succeeded or not.
#[derive(Debug)]
pub struct ShellFile {
    path: PathBuf,
}

impl ShellFile {
    /// Write `contents` to `path`, replacing any leftover file.
    pub fn create(path: impl Into<PathBuf>, contents: &str) -> io::Result<Self> {
        let path = path.into();
        fs::write(&path, contents)?;
        Ok(Self { path })
    }

    /// Location of the shell file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ShellFile {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Removed shell file {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                "Failed to remove shell file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn removes_file_on_drop() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sample_shell.html");

        {
            let shell = ShellFile::create(&path, "<html></html>").unwrap();
            assert_eq!(fs::read_to_string(shell.path()).unwrap(), "<html></html>");
        }

        assert!(!path.exists());
    }

    #[test]
    fn removes_file_on_error_path() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sample_shell.html");

        let run = || -> Result<(), String> {
            let _shell = ShellFile::create(&path, "shell").map_err(|e| e.to_string())?;
            Err("build failed".to_string())
        };

        assert!(run().is_err());
        assert!(!path.exists());
    }

    #[test]
    fn tolerates_file_removed_early() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("sample_shell.html");

        let shell = ShellFile::create(&path, "shell").unwrap();
        fs::remove_file(&path).unwrap();
        drop(shell);

        assert!(!path.exists());
    }
}
