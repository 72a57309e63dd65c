//! Error types for sync-core

use std::path::PathBuf;

/// Result type for sync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sync-core operations.
///
/// Every variant aborts the current sync attempt immediately; nothing is
/// retried beyond the provisioner's single recreate fallback, and no
/// cleanup or compensation runs on failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required configuration setting is absent.
    #[error("required setting '{key}' is not set")]
    MissingSetting { key: &'static str },

    /// The configuration file exists but could not be parsed.
    #[error("failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Credential resolution failed: the prompt was dismissed or yielded
    /// empty input.
    #[error("no access credential provided")]
    Auth,

    /// An empty secret must never be persisted.
    #[error("refusing to persist an empty credential")]
    EmptyCredential,

    /// The editor settings storage could not be read or written.
    #[error("settings storage failure: {message}")]
    Settings { message: String },

    // Transparent wrappers for underlying crate errors
    /// Provisioning or publishing failure from sync-git
    #[error(transparent)]
    Git(#[from] sync_git::Error),

    /// Manifest or reconciliation failure from sync-ext
    #[error(transparent)]
    Extensions(#[from] sync_ext::Error),

    /// Filesystem failure from sync-fs
    #[error(transparent)]
    Fs(#[from] sync_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
