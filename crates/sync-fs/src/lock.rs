//! Advisory per-path sync lock.
//!
//! Overlapping `download()`/`upload()` invocations against the same data
//! directory would race on the shared working copy. The engine takes this
//! lock before provisioning and holds it until the operation finishes.
//! The lock is advisory: it only excludes other acquirers of the same
//! lock file, which is sufficient because every invocation goes through
//! the engine.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, Result};

/// An exclusive advisory lock on a data directory.
///
/// Released when dropped. The lock file itself is left in place.
#[derive(Debug)]
pub struct SyncLock {
    file: File,
    path: PathBuf,
}

impl SyncLock {
    /// Acquire the lock, blocking until any current holder releases it.
    pub fn acquire(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| Error::io(path, e))?;
        file.lock_exclusive().map_err(|_| Error::LockFailed {
            path: path.to_path_buf(),
        })?;
        tracing::debug!(path = %path.display(), "acquired sync lock");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Try to acquire the lock without blocking.
    ///
    /// Returns `Error::LockFailed` if another invocation holds it.
    pub fn try_acquire(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| Error::io(path, e))?;
        file.try_lock_exclusive().map_err(|_| Error::LockFailed {
            path: path.to_path_buf(),
        })?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// The lock file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SyncLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
        tracing::debug!(path = %self.path.display(), "released sync lock");
    }
}
