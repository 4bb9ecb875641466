//! Exclusive access to the build tool's output directory.

use std::path::{Path, PathBuf};

use tokio::sync::{Mutex, MutexGuard};

/// The fixed directory the build tool writes every build into.
///
/// Builds for different tasks overwrite each other there, so a lease must be
/// held from the tool invocation until its artifacts have been moved out.
#[derive(Debug)]
pub struct OutputSlot {
    dir: PathBuf,
    lock: Mutex<()>,
}

/// Exclusive access to an [`OutputSlot`], released on drop.
#[derive(Debug)]
pub struct OutputLease<'a> {
    dir: &'a Path,
    _guard: MutexGuard<'a, ()>,
}

impl OutputSlot {
    /// Wrap the tool's output directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    /// Wait for exclusive access to the directory.
    pub async fn acquire(&self) -> OutputLease<'_> {
        let guard = self.lock.lock().await;
        tracing::debug!("Acquired build output {}", self.dir.display());
        OutputLease {
            dir: &self.dir,
            _guard: guard,
        }
    }
}

impl OutputLease<'_> {
    /// The leased output directory.
    pub fn path(&self) -> &Path {
        self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lease_is_exclusive() {
        let slot = OutputSlot::new("/engine/tools/build/web");

        tokio_test::block_on(async {
            let lease = slot.acquire().await;
            assert_eq!(lease.path(), Path::new("/engine/tools/build/web"));
            assert!(slot.lock.try_lock().is_err());

            drop(lease);
            assert!(slot.lock.try_lock().is_ok());
        });
    }
}
