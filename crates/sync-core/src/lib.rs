//! Settings synchronization engine
//!
//! Keeps the editor's configuration (an opaque settings document plus a
//! declared extension set) synchronized with a user-owned git-hosted
//! repository acting as the single source of truth.
//!
//! # Architecture
//!
//! `sync-core` orchestrates the leaf crates and sits below the CLI:
//!
//! ```text
//!            CLI
//!             |
//!         sync-core
//!             |
//!     +-------+-------+
//!     |       |       |
//!  sync-fs sync-git sync-ext
//! ```
//!
//! [`SyncEngine::download`] mirrors the repository's `main` branch into
//! the editor; [`SyncEngine::upload`] force-pushes the editor's current
//! state over it. Host collaborators (settings storage, extension host,
//! masked credential prompt) are injected as trait objects.

pub mod config;
pub mod engine;
pub mod error;
pub mod settings;
pub mod token;

pub use config::SyncConfig;
pub use engine::{COMMIT_MESSAGE, SyncEngine, UploadOutcome};
pub use error::{Error, Result};
pub use settings::{FileSettingsStore, SettingsStore};
pub use token::{Credential, CredentialPrompt, TokenStore};
