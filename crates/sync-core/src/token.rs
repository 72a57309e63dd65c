//! Access credential storage and lazy resolution.
//!
//! The credential is an opaque secret persisted as raw bytes at a fixed
//! path in private storage. It is created on the first prompt, kept until
//! overwritten, and never expires. No caching beyond the file itself.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// The opaque access secret.
///
/// `Debug` is redacted so the secret cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret, for embedding into the remote URL.
    pub fn secret(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(***)")
    }
}

/// Masked-input collaborator shown when no credential is stored yet.
///
/// Dismissal yields an empty string, which the engine treats as an
/// authentication failure.
pub trait CredentialPrompt {
    fn ask(&self, label: &str) -> Result<String>;
}

/// Persists and retrieves the credential at an injected path.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored credential. A missing file or empty content means
    /// no credential is stored.
    pub fn read(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let secret = sync_fs::io::read_text(&self.path)?;
        if secret.is_empty() {
            return Ok(None);
        }
        Ok(Some(Credential::new(secret)))
    }

    /// Persist the credential (raw bytes, atomic write).
    pub fn write(&self, credential: &Credential) -> Result<()> {
        sync_fs::io::write_text(&self.path, credential.secret())?;
        Ok(())
    }

    /// Persist the credential, refusing an empty secret.
    pub fn write_guarded(&self, credential: &Credential) -> Result<()> {
        if credential.is_empty() {
            return Err(Error::EmptyCredential);
        }
        self.write(credential)
    }

    /// Remove the stored credential, if any.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Lazy resolution: stored value, or prompt once and persist.
    ///
    /// An empty prompt result (dismissal included) is [`Error::Auth`];
    /// nothing is persisted in that case.
    pub fn resolve(&self, prompt: &dyn CredentialPrompt) -> Result<Credential> {
        if let Some(credential) = self.read()? {
            return Ok(credential);
        }
        let input = prompt.ask("GitHub Personal Access Token")?;
        if input.is_empty() {
            return Err(Error::Auth);
        }
        let credential = Credential::new(input);
        self.write_guarded(&credential)?;
        tracing::debug!(path = %self.path.display(), "stored new access credential");
        Ok(credential)
    }
}
