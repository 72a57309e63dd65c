//! Staging, no-change detection, and forced publishing.
//!
//! Upload-side primitives on [`Provisioner`]: stage tracked files, decide
//! whether the staged content differs from the current commit, and publish
//! with a forced push. The force is deliberate — the remote is overwritten
//! unconditionally ("last writer wins"), never merged.

use std::path::Path;

use git2::{Commit, ErrorCode, Repository, Signature};

use crate::error::scrub;
use crate::provision::Provisioner;
use crate::{Error, Result};

/// Forced refspec for publishing `main`.
const PUSH_REFSPEC: &str = "+refs/heads/main:refs/heads/main";

impl Provisioner {
    /// Stage one file (path relative to the working copy root).
    pub fn stage(&self, relative: &Path) -> Result<()> {
        let file = relative.display().to_string();
        let stage_failed = |e: git2::Error| Error::StageFailed {
            file: file.clone(),
            message: e.message().to_string(),
        };

        let repo = Repository::open(self.path()).map_err(stage_failed)?;
        let mut index = repo.index().map_err(stage_failed)?;
        index.add_path(relative).map_err(stage_failed)?;
        index.write().map_err(stage_failed)?;
        Ok(())
    }

    /// Whether the staged index matches the current commit's tree.
    ///
    /// An unborn `main` with a non-empty index counts as a difference.
    pub fn staged_matches_head(&self) -> Result<bool> {
        let commit_failed = |e: git2::Error| Error::CommitFailed {
            message: e.message().to_string(),
        };

        let repo = Repository::open(self.path()).map_err(commit_failed)?;
        let index = repo.index().map_err(commit_failed)?;

        let head_tree = match repo.head() {
            Ok(head) => Some(head.peel_to_tree().map_err(commit_failed)?),
            Err(e) if e.code() == ErrorCode::UnbornBranch => None,
            Err(e) => return Err(commit_failed(e)),
        };

        match head_tree {
            Some(tree) => {
                let diff = repo
                    .diff_tree_to_index(Some(&tree), Some(&index), None)
                    .map_err(commit_failed)?;
                Ok(diff.deltas().len() == 0)
            }
            None => Ok(index.is_empty()),
        }
    }

    /// Commit the staged index with `message` and force-push `main`.
    ///
    /// `secret` is scrubbed from push errors, which echo the remote URL.
    pub fn commit_and_push(&self, message: &str, secret: &str) -> Result<()> {
        let commit_failed = |e: git2::Error| Error::CommitFailed {
            message: e.message().to_string(),
        };

        let repo = Repository::open(self.path()).map_err(commit_failed)?;
        let sig = repo
            .signature()
            .or_else(|_| Signature::now("Settings Sync", "settings-sync@localhost"))
            .map_err(commit_failed)?;

        let mut index = repo.index().map_err(commit_failed)?;
        let tree_id = index.write_tree().map_err(commit_failed)?;
        let tree = repo.find_tree(tree_id).map_err(commit_failed)?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit().map_err(commit_failed)?),
            Err(e) if e.code() == ErrorCode::UnbornBranch => None,
            Err(e) => return Err(commit_failed(e)),
        };
        let parents: Vec<&Commit> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .map_err(commit_failed)?;

        let mut remote = repo.find_remote("origin").map_err(|e| Error::PushFailed {
            message: scrub(e.message(), secret),
        })?;
        remote
            .push(&[PUSH_REFSPEC], None)
            .map_err(|e| Error::PushFailed {
                message: scrub(e.message(), secret),
            })?;

        tracing::info!(path = %self.path().display(), "published settings to origin/main");
        Ok(())
    }
}
