//! Error types for sync-ext

use crate::reconcile::Phase;

/// Result type for sync-ext operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the extension system.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The manifest is not a JSON array of id strings.
    #[error("failed to parse extension manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    /// A specific extension failed to install or uninstall.
    ///
    /// Aborts the remaining reconciliation sequence; already-applied
    /// changes are not rolled back.
    #[error("failed to {phase} extension '{id}': {message}")]
    Apply {
        id: String,
        phase: Phase,
        message: String,
    },

    /// The extension host could not be queried or driven.
    #[error("extension host failure: {message}")]
    HostFailure { message: String },
}

impl Error {
    pub fn host(message: impl Into<String>) -> Self {
        Self::HostFailure {
            message: message.into(),
        }
    }
}
