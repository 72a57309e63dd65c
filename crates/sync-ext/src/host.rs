//! The editor-side extension host seam.

use crate::Result;

/// One installed extension as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledExtension {
    /// Extension identifier (e.g. `publisher.name`).
    pub id: String,
    /// Whether the extension ships with the editor. Bundled extensions are
    /// never reconciled: not uninstalled, not counted as actual.
    pub builtin: bool,
}

impl InstalledExtension {
    pub fn new(id: impl Into<String>, builtin: bool) -> Self {
        Self {
            id: id.into(),
            builtin,
        }
    }
}

/// Installs, uninstalls, and lists extensions in the running editor.
///
/// Each operation is independently fallible; implementations map their
/// failure details into [`Error::HostFailure`](crate::Error::HostFailure).
pub trait ExtensionHost {
    /// List currently installed extensions, bundled ones included.
    fn list(&self) -> Result<Vec<InstalledExtension>>;

    /// Install the extension with the given id.
    fn install(&self, id: &str) -> Result<()>;

    /// Uninstall the extension with the given id.
    fn uninstall(&self, id: &str) -> Result<()>;
}
