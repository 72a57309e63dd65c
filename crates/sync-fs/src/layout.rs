//! Fixed private-storage layout.
//!
//! Everything settings-sync persists lives under a single data directory:
//! the credential file, the working copy of the configuration repository,
//! and the advisory lock file. The root is injected so tests can point a
//! whole layout at a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Files tracked inside the configuration repository's working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedFile {
    /// The opaque editor settings document
    Settings,
    /// The declared extension manifest (JSON array of ids)
    Manifest,
}

impl TrackedFile {
    /// Get the file name inside the working copy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Settings => "settings.json",
            Self::Manifest => "extensions.json",
        }
    }
}

impl AsRef<Path> for TrackedFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for TrackedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The private data directory layout.
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    /// Create a layout rooted at `root`. Nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the data directory if it does not exist yet.
    pub fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| Error::io(&self.root, e))
    }

    /// Path of the configuration file (`config.toml`).
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Path of the persisted access credential (raw secret bytes).
    pub fn token_path(&self) -> PathBuf {
        self.root.join("github-token")
    }

    /// Path of the working copy of the configuration repository.
    pub fn repo_path(&self) -> PathBuf {
        self.root.join("source-repository")
    }

    /// Path of the advisory lock file serializing sync invocations.
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".sync.lock")
    }

    /// Path of a tracked file inside the working copy.
    pub fn tracked_path(&self, file: TrackedFile) -> PathBuf {
        self.repo_path().join(file.as_str())
    }
}
