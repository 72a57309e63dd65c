//! Typed configuration.
//!
//! One required setting, `source_repository = "<owner>/<repo>"`, names the
//! git-hosted configuration repository. Absence is a hard error at the
//! start of every sync, before anything touches the filesystem or the
//! network. `remote_url` optionally overrides the hosted URL for
//! self-hosted remotes (still exactly one remote, one branch).

use std::path::Path;

use serde::{Deserialize, Serialize};
use sync_git::RemoteSpec;

use crate::{Error, Result};

/// Parsed `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// `"<owner>/<repo>"` on the hosted service. Required unless
    /// `remote_url` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_repository: Option<String>,

    /// Literal remote URL override (self-hosted remotes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
}

impl SyncConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file is an empty configuration; the missing setting is
    /// reported when the engine tries to use it.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = sync_fs::io::read_text(path)?;
        toml::from_str(&text).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Resolve the remote this configuration points at.
    pub fn remote_spec(&self) -> Result<RemoteSpec> {
        if let Some(url) = &self.remote_url
            && !url.trim().is_empty()
        {
            return Ok(RemoteSpec::Url(url.clone()));
        }
        match &self.source_repository {
            Some(value) if !value.trim().is_empty() => Ok(RemoteSpec::GitHub(value.parse()?)),
            _ => Err(Error::MissingSetting {
                key: "source_repository",
            }),
        }
    }
}
