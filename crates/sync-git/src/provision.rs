//! Working-copy provisioning.
//!
//! [`Provisioner::prepare`] is the only place that transitions the working
//! copy between states. Strategy is idempotent repair: keep whatever is on
//! disk, repoint `origin`, fetch, and hard-reset to `origin/main`. If the
//! repair fails for a reason attributable to local corruption (rather than
//! network or auth), the directory is recreated from scratch exactly once
//! before giving up.

use std::fs;
use std::path::{Path, PathBuf};

use git2::build::CheckoutBuilder;
use git2::{ErrorCode, ObjectType, Repository, RepositoryInitOptions, ResetType};

use crate::error::scrub;
use crate::{Error, Result, SYNC_BRANCH};

/// Remote-tracking reference the working copy is reset to.
const REMOTE_MAIN: &str = "refs/remotes/origin/main";
/// Fetch refspec keeping the remote-tracking reference current.
const FETCH_REFSPEC: &str = "+refs/heads/main:refs/remotes/origin/main";

/// Observable state of the working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoState {
    /// The directory does not exist.
    Absent,
    /// The directory exists but is not a repository at `origin/main`,
    /// or carries local modifications.
    Stale,
    /// A working copy whose checked-out tree equals `origin/main`.
    Ready,
}

/// Provisions and publishes the working copy at an injected path.
#[derive(Debug, Clone)]
pub struct Provisioner {
    path: PathBuf,
}

/// A failed provisioning step, before credential scrubbing.
enum StepError {
    Git {
        operation: &'static str,
        source: git2::Error,
    },
    BranchMissing,
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StepError {
    fn git(operation: &'static str) -> impl FnOnce(git2::Error) -> Self {
        move |source| Self::Git { operation, source }
    }

    /// Whether recreating the directory could plausibly help.
    ///
    /// Network, TLS, and auth-callback failures will fail identically
    /// against a fresh directory; everything rooted in the local object
    /// store, index, references, or filesystem is worth one retry.
    fn recoverable(&self) -> bool {
        match self {
            Self::Git { source, .. } => is_local_fault(source),
            Self::BranchMissing => false,
            Self::Io { .. } => false,
        }
    }

    fn into_error(self, secret: &str) -> Error {
        match self {
            Self::Git { operation, source } => Error::Provision {
                operation,
                message: scrub(source.message(), secret),
            },
            Self::BranchMissing => Error::BranchMissing {
                branch: SYNC_BRANCH.to_string(),
            },
            Self::Io { path, source } => Error::Io { path, source },
        }
    }
}

fn is_local_fault(err: &git2::Error) -> bool {
    use git2::ErrorClass;
    matches!(
        err.class(),
        ErrorClass::Os
            | ErrorClass::Invalid
            | ErrorClass::Reference
            | ErrorClass::Repository
            | ErrorClass::Config
            | ErrorClass::Odb
            | ErrorClass::Index
            | ErrorClass::Object
            | ErrorClass::Tree
            | ErrorClass::Checkout
            | ErrorClass::FetchHead
            | ErrorClass::Filesystem
    )
}

impl Provisioner {
    /// Create a provisioner for the working copy at `path`.
    /// Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The working copy path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bring the working copy to [`RepoState::Ready`] against `url`.
    ///
    /// `secret` is the credential embedded in `url`; it is scrubbed from
    /// every surfaced error message. Local modifications to tracked files
    /// are discarded by the hard reset.
    pub fn prepare(&self, url: &str, secret: &str) -> Result<()> {
        match self.repair(url) {
            Ok(()) => Ok(()),
            Err(step) if step.recoverable() => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %scrub(&describe(&step), secret),
                    "in-place repair failed; recreating working copy"
                );
                self.recreate(url).map_err(|step| step.into_error(secret))
            }
            Err(step) => Err(step.into_error(secret)),
        }
    }

    /// Report which state the working copy is currently in.
    pub fn probe(&self) -> RepoState {
        if !self.path.exists() {
            return RepoState::Absent;
        }
        let Ok(repo) = Repository::open(&self.path) else {
            return RepoState::Stale;
        };
        let Ok(remote_tip) = repo
            .find_reference(REMOTE_MAIN)
            .and_then(|r| r.peel_to_commit())
        else {
            return RepoState::Stale;
        };
        let Ok(head_tip) = repo.head().and_then(|h| h.peel_to_commit()) else {
            return RepoState::Stale;
        };
        if head_tip.id() != remote_tip.id() {
            return RepoState::Stale;
        }
        match repo.statuses(None) {
            Ok(statuses) if statuses.is_empty() => RepoState::Ready,
            _ => RepoState::Stale,
        }
    }

    /// In-place repair: init-if-absent, repoint origin, fetch, hard reset.
    fn repair(&self, url: &str) -> std::result::Result<(), StepError> {
        let repo = if self.path.exists() {
            Repository::open(&self.path).map_err(StepError::git("open"))?
        } else {
            fs::create_dir_all(&self.path).map_err(|source| StepError::Io {
                path: self.path.clone(),
                source,
            })?;
            let mut opts = RepositoryInitOptions::new();
            opts.initial_head(SYNC_BRANCH);
            Repository::init_opts(&self.path, &opts).map_err(StepError::git("init"))?
        };

        // Repoint origin unconditionally; tolerate a missing remote.
        match repo.remote_delete("origin") {
            Ok(()) => {}
            Err(e) if e.code() == ErrorCode::NotFound => {}
            Err(e) => return Err(StepError::git("remote")(e)),
        }
        repo.remote("origin", url)
            .map_err(StepError::git("remote"))?;

        let mut remote = repo.find_remote("origin").map_err(StepError::git("fetch"))?;
        remote
            .fetch(&[FETCH_REFSPEC], None, None)
            .map_err(|e| match e.code() {
                // The remote exists but has no main branch
                ErrorCode::NotFound => StepError::BranchMissing,
                _ => StepError::git("fetch")(e),
            })?;
        drop(remote);

        let target = match repo.find_reference(REMOTE_MAIN) {
            Ok(reference) => reference
                .peel(ObjectType::Commit)
                .map_err(StepError::git("reset"))?,
            Err(_) => return Err(StepError::BranchMissing),
        };
        let mut checkout = CheckoutBuilder::new();
        checkout.force();
        repo.reset(&target, ResetType::Hard, Some(&mut checkout))
            .map_err(StepError::git("reset"))?;

        Ok(())
    }

    /// Destructive fallback: delete the directory and repair from scratch.
    fn recreate(&self, url: &str) -> std::result::Result<(), StepError> {
        match fs::remove_dir_all(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(StepError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        }
        self.repair(url)
    }
}

fn describe(step: &StepError) -> String {
    match step {
        StepError::Git { operation, source } => {
            format!("{operation}: {}", source.message())
        }
        StepError::BranchMissing => format!("remote has no '{SYNC_BRANCH}' branch"),
        StepError::Io { path, source } => format!("{}: {source}", path.display()),
    }
}
