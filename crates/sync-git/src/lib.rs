//! Repository provisioning and publishing for settings-sync
//!
//! Brings the local working copy of the configuration repository into a
//! known-good state (checked-out tree equal to `origin/main`) before any
//! read or write, and publishes staged changes back with a forced push.
//!
//! The access credential is embedded in the remote URL, so every error
//! message that could echo the URL is scrubbed before it leaves this crate.

pub mod error;
pub mod provision;
pub mod publish;
pub mod remote;

pub use error::{Error, Result};
pub use provision::{Provisioner, RepoState};
pub use remote::{RemoteSpec, RepoRef};

/// The single branch settings-sync operates on.
pub const SYNC_BRANCH: &str = "main";
