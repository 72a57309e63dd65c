//! Editor settings storage seam.
//!
//! The settings document is opaque to the engine: download overwrites the
//! editor's copy in full, upload reads it back in full. No merging, no
//! schema validation.

use std::path::PathBuf;

use crate::{Error, Result};

/// Full-file access to the active settings document.
pub trait SettingsStore {
    /// Read the entire settings document.
    fn read(&self) -> Result<String>;

    /// Replace the entire settings document.
    fn write(&self, content: &str) -> Result<()>;
}

/// Settings storage backed by a file (the editor's user `settings.json`).
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsStore for FileSettingsStore {
    fn read(&self) -> Result<String> {
        sync_fs::io::read_text(&self.path).map_err(|e| Error::Settings {
            message: e.to_string(),
        })
    }

    fn write(&self, content: &str) -> Result<()> {
        sync_fs::io::write_text(&self.path, content).map_err(|e| Error::Settings {
            message: e.to_string(),
        })
    }
}
