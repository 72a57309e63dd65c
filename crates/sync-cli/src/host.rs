//! Editor host adapters.
//!
//! The engine only knows the host collaborator traits; this module binds
//! them to a real editor through its CLI (`code --list-extensions` and
//! friends) and to a masked terminal prompt for the access token.

use std::process::Command;

use dialoguer::Password;
use sync_core::CredentialPrompt;
use sync_ext::{Error as ExtError, ExtensionHost, InstalledExtension};

/// Extension host backed by the editor's command-line interface.
///
/// `--list-extensions` reports only non-bundled extensions, which matches
/// the reconciler's contract: bundled extensions never enter the actual
/// set.
#[derive(Debug, Clone)]
pub struct EditorCli {
    binary: String,
}

impl EditorCli {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, args: &[&str]) -> sync_ext::Result<String> {
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|e| ExtError::host(format!("failed to run {}: {e}", self.binary)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtError::host(format!(
                "{} {} exited with {}: {}",
                self.binary,
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ExtensionHost for EditorCli {
    fn list(&self) -> sync_ext::Result<Vec<InstalledExtension>> {
        let stdout = self.run(&["--list-extensions"])?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|id| InstalledExtension::new(id, false))
            .collect())
    }

    fn install(&self, id: &str) -> sync_ext::Result<()> {
        self.run(&["--install-extension", id])?;
        Ok(())
    }

    fn uninstall(&self, id: &str) -> sync_ext::Result<()> {
        self.run(&["--uninstall-extension", id])?;
        Ok(())
    }
}

/// Masked terminal prompt for the access token.
///
/// Dismissal (or a non-interactive terminal) yields an empty string, which
/// the engine reports as an authentication failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaskedPrompt;

impl CredentialPrompt for MaskedPrompt {
    fn ask(&self, label: &str) -> sync_core::Result<String> {
        let input = Password::new()
            .with_prompt(label)
            .allow_empty_password(true)
            .interact()
            .unwrap_or_default();
        Ok(input)
    }
}
