use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Scratch directory bound to a single extraction attempt.
///
/// `release` is the normal exit; `Drop` is the safety net for early returns
/// and panics, and warns when it has to clean up implicitly. Removal
/// failures are logged, never propagated: by the time cleanup runs the
/// attempt's outcome is already decided.
pub struct ScopedWorkspace {
    dir: PathBuf,
    released: bool,
}

impl ScopedWorkspace {
    /// Create a uniquely named directory under the system temp area.
    pub fn acquire() -> Result<Self> {
        Self::build(tempfile::Builder::new().prefix("kernex-").tempdir())
    }

    /// Create a uniquely named directory under `parent`.
    pub fn acquire_in(parent: impl AsRef<Path>) -> Result<Self> {
        Self::build(tempfile::Builder::new().prefix("kernex-").tempdir_in(parent))
    }

    fn build(dir: std::io::Result<tempfile::TempDir>) -> Result<Self> {
        let dir = dir.map_err(|source| Error::WorkspaceFailed { source })?;
        // cleanup responsibility moves from TempDir to this struct
        Ok(Self {
            dir: dir.keep(),
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.dir.join(name)
    }

    /// Recursively delete the directory and everything under it.
    pub fn release(mut self) {
        self.remove(false);
    }

    fn remove(&mut self, implicit: bool) {
        if self.released {
            return;
        }
        self.released = true;

        if let Err(e) = fs::remove_dir_all(&self.dir) {
            tracing::warn!(
                workspace = %self.dir.display(),
                error = %e,
                "failed to remove workspace",
            );
            return;
        }
        if implicit {
            tracing::warn!(
                workspace = %self.dir.display(),
                "workspace released implicitly on drop",
            );
        }
    }
}

impl Drop for ScopedWorkspace {
    fn drop(&mut self) {
        self.remove(true);
    }
}
