//! Shared test fixtures for the settings-sync workspace.
//!
//! Provides standardised git remote fixtures so crate test suites do not
//! each reimplement bare-repository setup. Dev-dependency only — never
//! published.

pub mod remote;

pub use remote::{RemoteFixture, manifest_json};
