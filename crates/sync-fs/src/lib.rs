//! Private-storage layout and safe I/O for settings-sync
//!
//! Provides the fixed data-directory layout (credential file, working copy,
//! lock file), atomic file writes, and the advisory lock that serializes
//! overlapping sync invocations against the same data directory.

pub mod error;
pub mod io;
pub mod layout;
pub mod lock;

pub use error::{Error, Result};
pub use layout::{DataLayout, TrackedFile};
pub use lock::SyncLock;
