//! Extension manifest and reconciliation for settings-sync
//!
//! This crate provides the manifest codec (the serialized declared
//! extension set), the host seam for listing/installing/uninstalling
//! extensions, and the reconciler that computes and applies the diff
//! between the declared and the actually-installed set.

pub mod error;
pub mod host;
pub mod manifest;
pub mod reconcile;

pub use error::{Error, Result};
pub use host::{ExtensionHost, InstalledExtension};
pub use reconcile::{Phase, ReconcilePlan};
