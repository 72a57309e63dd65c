//! Extension-set reconciliation.
//!
//! [`ReconcilePlan::new`] computes the install/uninstall diff between the
//! declared set and the actually-installed set; [`ReconcilePlan::apply`]
//! drives the host through it sequentially. A single failure aborts the
//! remaining sequence with the offending id and phase; already-applied
//! changes are left in place for the next attempt to repair.

use std::collections::BTreeSet;
use std::fmt;

use crate::host::{ExtensionHost, InstalledExtension};
use crate::{Error, Result};

/// Which half of the reconciliation a failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Install,
    Uninstall,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Uninstall => write!(f, "uninstall"),
        }
    }
}

/// The computed install/uninstall diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub to_install: BTreeSet<String>,
    pub to_uninstall: BTreeSet<String>,
}

impl ReconcilePlan {
    /// Diff the declared set against what the host reports as installed.
    ///
    /// Bundled (builtin) extensions are excluded from the actual set
    /// before diffing: they are never uninstalled and never satisfy a
    /// declared id.
    pub fn new(declared: &BTreeSet<String>, installed: &[InstalledExtension]) -> Self {
        let actual: BTreeSet<&str> = installed
            .iter()
            .filter(|ext| !ext.builtin)
            .map(|ext| ext.id.as_str())
            .collect();

        let to_install = declared
            .iter()
            .filter(|id| !actual.contains(id.as_str()))
            .cloned()
            .collect();
        let to_uninstall = actual
            .iter()
            .filter(|id| !declared.contains(**id))
            .map(|id| (*id).to_string())
            .collect();

        Self {
            to_install,
            to_uninstall,
        }
    }

    /// Whether the actual set already equals the declared set.
    pub fn is_empty(&self) -> bool {
        self.to_install.is_empty() && self.to_uninstall.is_empty()
    }

    /// Install then uninstall, sequentially, aborting on the first failure.
    pub fn apply(&self, host: &dyn ExtensionHost) -> Result<()> {
        for id in &self.to_install {
            tracing::info!(extension = %id, "installing extension");
            host.install(id).map_err(|e| tag(e, id, Phase::Install))?;
        }
        for id in &self.to_uninstall {
            tracing::info!(extension = %id, "uninstalling extension");
            host.uninstall(id).map_err(|e| tag(e, id, Phase::Uninstall))?;
        }
        Ok(())
    }
}

/// Attach the offending id and phase to a host failure.
fn tag(error: Error, id: &str, phase: Phase) -> Error {
    match error {
        Error::HostFailure { message } => Error::Apply {
            id: id.to_string(),
            phase,
            message,
        },
        already_tagged => already_tagged,
    }
}
