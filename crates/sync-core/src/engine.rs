//! Download/upload orchestration.
//!
//! Both operations run the same fixed prologue — resolve the remote from
//! configuration, resolve the credential (prompting once if needed), take
//! the per-path sync lock, provision the working copy to `origin/main` —
//! and then move content in one direction. Failure at any step aborts the
//! attempt; a partially-reconciled extension set is left for the next
//! attempt to repair.
//!
//! Upload force-pushes unconditionally. Two machines syncing concurrently
//! overwrite each other silently — an accepted "last writer wins" policy,
//! not an oversight.

use sync_ext::{ExtensionHost, ReconcilePlan, manifest};
use sync_fs::{DataLayout, SyncLock, TrackedFile, io};
use sync_git::{Provisioner, RemoteSpec};

use crate::config::SyncConfig;
use crate::settings::SettingsStore;
use crate::token::{Credential, CredentialPrompt, TokenStore};
use crate::{Error, Result};

/// Fixed message used for every upload commit.
pub const COMMIT_MESSAGE: &str = "Save Settings";

/// What an upload attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Staged content matched the current commit; no commit, no push.
    NoChanges,
    /// A commit was created and force-pushed to `main`.
    Pushed,
}

/// Orchestrates `download()` and `upload()` over injected collaborators.
pub struct SyncEngine {
    layout: DataLayout,
    config: SyncConfig,
    tokens: TokenStore,
    settings: Box<dyn SettingsStore>,
    extensions: Box<dyn ExtensionHost>,
    prompt: Box<dyn CredentialPrompt>,
}

impl SyncEngine {
    pub fn new(
        layout: DataLayout,
        config: SyncConfig,
        settings: Box<dyn SettingsStore>,
        extensions: Box<dyn ExtensionHost>,
        prompt: Box<dyn CredentialPrompt>,
    ) -> Self {
        let tokens = TokenStore::new(layout.token_path());
        Self {
            layout,
            config,
            tokens,
            settings,
            extensions,
            prompt,
        }
    }

    /// The credential store this engine persists through.
    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Steps shared by both operations: configuration first (so a missing
    /// setting fails before anything touches the filesystem or network),
    /// then credential resolution.
    fn resolve(&self) -> Result<(RemoteSpec, Credential)> {
        let remote = self.config.remote_spec()?;
        let credential = self.tokens.resolve(self.prompt.as_ref())?;
        Ok((remote, credential))
    }

    /// Provision the working copy to `origin/main`.
    ///
    /// Caller must hold the sync lock.
    fn prepare(&self, remote: &RemoteSpec, credential: &Credential) -> Result<Provisioner> {
        let provisioner = Provisioner::new(self.layout.repo_path());
        let url = remote.authenticated_url(credential.secret());
        provisioner.prepare(&url, credential.secret())?;
        Ok(provisioner)
    }

    /// Mirror the repository's `main` branch into the editor.
    ///
    /// On success the local settings document and extension set exactly
    /// equal the remote state. Extensions changed before a reconciliation
    /// failure are not rolled back.
    pub fn download(&self) -> Result<()> {
        let (remote, credential) = self.resolve()?;
        self.layout.ensure_root()?;
        let _lock = SyncLock::acquire(&self.layout.lock_path())?;
        self.prepare(&remote, &credential)?;

        tracing::info!("applying settings document");
        let settings_text = io::read_text(&self.layout.tracked_path(TrackedFile::Settings))?;
        self.settings.write(&settings_text)?;

        let manifest_text = io::read_text(&self.layout.tracked_path(TrackedFile::Manifest))?;
        let declared = manifest::parse_set(&manifest_text)?;
        let installed = self.extensions.list()?;
        let plan = ReconcilePlan::new(&declared, &installed);
        tracing::info!(
            install = plan.to_install.len(),
            uninstall = plan.to_uninstall.len(),
            "reconciling extensions"
        );
        plan.apply(self.extensions.as_ref())?;

        Ok(())
    }

    /// Force-push the editor's current state over the repository's `main`.
    pub fn upload(&self) -> Result<UploadOutcome> {
        let (remote, credential) = self.resolve()?;
        self.layout.ensure_root()?;
        let _lock = SyncLock::acquire(&self.layout.lock_path())?;
        let provisioner = self.prepare(&remote, &credential)?;

        let settings_text = self.settings.read()?;
        io::write_text(
            &self.layout.tracked_path(TrackedFile::Settings),
            &settings_text,
        )?;
        provisioner.stage(TrackedFile::Settings.as_ref())?;

        let ids: Vec<String> = self
            .extensions
            .list()?
            .into_iter()
            .filter(|ext| !ext.builtin)
            .map(|ext| ext.id)
            .collect();
        io::write_text(
            &self.layout.tracked_path(TrackedFile::Manifest),
            &manifest::serialize(&ids),
        )?;
        provisioner.stage(TrackedFile::Manifest.as_ref())?;

        if provisioner.staged_matches_head()? {
            tracing::info!("nothing to upload");
            return Ok(UploadOutcome::NoChanges);
        }

        provisioner.commit_and_push(COMMIT_MESSAGE, credential.secret())?;
        Ok(UploadOutcome::Pushed)
    }
}

impl std::fmt::Debug for SyncEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncEngine")
            .field("layout", &self.layout)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
