//! Error types for sync-git

use std::path::PathBuf;

/// Result type for sync-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sync-git operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid repository reference '{value}': expected \"<owner>/<repo>\"")]
    InvalidRepoRef { value: String },

    #[error("Provisioning failed during {operation}: {message}")]
    Provision {
        operation: &'static str,
        message: String,
    },

    #[error("Remote has no '{branch}' branch")]
    BranchMissing { branch: String },

    #[error("Failed to stage {file}: {message}")]
    StageFailed { file: String, message: String },

    #[error("Commit failed: {message}")]
    CommitFailed { message: String },

    #[error("Push failed: {message}")]
    PushFailed { message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Remove every occurrence of the credential from a message.
///
/// git/libgit2 error text often echoes the remote URL verbatim, and our
/// remote URLs carry the credential as basic-auth. Applied to every message
/// built from a git error during a remote operation.
pub fn scrub(message: &str, secret: &str) -> String {
    if secret.is_empty() {
        return message.to_string();
    }
    message.replace(secret, "***")
}
