//! Repository synchronization.
//!
//! Keeps a local clone of each upstream repository pinned to the manifest's
//! ref. An existing clone is reused: it is fetched, checked out and, when the
//! ref names a branch, fast-forwarded to the upstream tip. Submodules are
//! updated one level deep.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, info};

use showcase_manifest::{Manifest, RepositoryRef};

use crate::builder::SitePaths;

/// Errors that can occur while synchronizing a repository.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to clone {url}: {message}")]
    Clone { url: String, message: String },

    #[error("{0} exists but is not a git repository")]
    NotARepository(PathBuf),

    #[error("{0} has uncommitted changes; commit or discard them before syncing")]
    Dirty(PathBuf),

    #[error("Failed to fetch {path}: {message}")]
    Fetch { path: PathBuf, message: String },

    #[error("Failed to checkout '{rev}' in {path}: {message}")]
    Checkout {
        path: PathBuf,
        rev: String,
        message: String,
    },

    #[error("Failed to pull {path}: {message}")]
    Pull { path: PathBuf, message: String },

    #[error("Failed to update submodules in {path}: {message}")]
    Submodules { path: PathBuf, message: String },
}

/// Synchronizes local clones using the `git` command line.
#[derive(Debug, Clone)]
pub struct RepoSync {
    program: String,
}

impl Default for RepoSync {
    fn default() -> Self {
        Self::new("git")
    }
}

impl RepoSync {
    /// Use the given git executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Bring the engine and samples clones to the manifest's refs.
    pub fn sync_manifest(&self, manifest: &Manifest, paths: &SitePaths) -> Result<(), SyncError> {
        self.sync(&manifest.engine(), &paths.engine_root)?;
        self.sync(&manifest.samples_repository(), &paths.samples_root)?;
        Ok(())
    }

    /// Bring `local_dir` to `repo.rev`, cloning it first if needed.
    pub fn sync(&self, repo: &RepositoryRef, local_dir: &Path) -> Result<(), SyncError> {
        if !local_dir.exists() {
            info!(
                "Cloning {} into {} at {}",
                repo.url,
                local_dir.display(),
                repo.rev
            );
            if let Some(parent) = local_dir.parent() {
                fs::create_dir_all(parent).map_err(|source| SyncError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            let target = local_dir.to_string_lossy();
            self.run(None, &["clone", repo.url.as_str(), &*target], |message| {
                SyncError::Clone {
                    url: repo.url.clone(),
                    message,
                }
            })?;
        } else {
            info!("Checking out {} to {}", local_dir.display(), repo.rev);
            self.prepare_existing(local_dir)?;
        }

        self.run(Some(local_dir), &["checkout", repo.rev.as_str()], |message| {
            SyncError::Checkout {
                path: local_dir.to_path_buf(),
                rev: repo.rev.clone(),
                message,
            }
        })?;

        // Tags and commits are already exact; only branches can move upstream.
        if self.on_branch(local_dir)? {
            self.run(Some(local_dir), &["pull", "--ff-only", "origin"], |message| {
                SyncError::Pull {
                    path: local_dir.to_path_buf(),
                    message,
                }
            })?;
        }

        self.run(Some(local_dir), &["submodule", "update", "--init"], |message| {
            SyncError::Submodules {
                path: local_dir.to_path_buf(),
                message,
            }
        })?;

        Ok(())
    }

    /// Commit currently checked out in `local_dir`.
    pub fn head(&self, local_dir: &Path) -> Result<String, SyncError> {
        self.run(Some(local_dir), &["rev-parse", "HEAD"], |_| {
            SyncError::NotARepository(local_dir.to_path_buf())
        })
    }

    fn prepare_existing(&self, local_dir: &Path) -> Result<(), SyncError> {
        let not_a_repository = |_: String| SyncError::NotARepository(local_dir.to_path_buf());

        self.run(Some(local_dir), &["rev-parse", "--git-dir"], not_a_repository)?;

        let status = self.run(
            Some(local_dir),
            &["status", "--porcelain", "--untracked-files=no"],
            not_a_repository,
        )?;
        if !status.is_empty() {
            return Err(SyncError::Dirty(local_dir.to_path_buf()));
        }

        self.run(Some(local_dir), &["fetch", "--tags", "origin"], |message| {
            SyncError::Fetch {
                path: local_dir.to_path_buf(),
                message,
            }
        })?;

        Ok(())
    }

    fn on_branch(&self, local_dir: &Path) -> Result<bool, SyncError> {
        let output = self.output(Some(local_dir), &["symbolic-ref", "-q", "--short", "HEAD"])?;
        Ok(output.status.success())
    }

    /// Run git and return its trimmed stdout. A non-zero exit is mapped
    /// through `on_failure` with the trimmed stderr.
    fn run(
        &self,
        dir: Option<&Path>,
        args: &[&str],
        on_failure: impl FnOnce(String) -> SyncError,
    ) -> Result<String, SyncError> {
        let output = self.output(dir, args)?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(stderr = %stderr, "git command failed");
            Err(on_failure(stderr))
        }
    }

    fn output(&self, dir: Option<&Path>, args: &[&str]) -> Result<Output, SyncError> {
        let mut command = Command::new(&self.program);
        if let Some(dir) = dir {
            command.arg("-C").arg(dir);
        }
        command.args(args).env("GIT_TERMINAL_PROMPT", "0");

        debug!("git {:?} in {:?}", args, dir);

        command.output().map_err(SyncError::Spawn)
    }
}
