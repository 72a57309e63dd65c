//! In-memory host collaborators and engine wiring for end-to-end tests.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sync_core::{CredentialPrompt, SettingsStore, SyncConfig, SyncEngine};
use sync_ext::{Error as ExtError, ExtensionHost, InstalledExtension};
use sync_fs::DataLayout;
use sync_test_utils::RemoteFixture;
use tempfile::TempDir;

/// Editor settings storage held in memory, shared with the test body.
#[derive(Clone, Default)]
pub struct MemorySettings {
    content: Arc<Mutex<String>>,
}

impl MemorySettings {
    pub fn with_content(content: &str) -> Self {
        Self {
            content: Arc::new(Mutex::new(content.to_string())),
        }
    }

    pub fn content(&self) -> String {
        self.content.lock().unwrap().clone()
    }
}

impl SettingsStore for MemorySettings {
    fn read(&self) -> sync_core::Result<String> {
        Ok(self.content())
    }

    fn write(&self, content: &str) -> sync_core::Result<()> {
        *self.content.lock().unwrap() = content.to_string();
        Ok(())
    }
}

#[derive(Default)]
struct HostState {
    installed: BTreeSet<String>,
    builtin: BTreeSet<String>,
    calls: Vec<String>,
    fail_install: Option<String>,
}

/// Extension host held in memory, shared with the test body.
#[derive(Clone, Default)]
pub struct MemoryHost {
    state: Arc<Mutex<HostState>>,
}

impl MemoryHost {
    pub fn with_installed(ids: &[&str]) -> Self {
        let host = Self::default();
        {
            let mut state = host.state.lock().unwrap();
            state.installed = ids.iter().map(|s| s.to_string()).collect();
        }
        host
    }

    pub fn add_builtin(&self, id: &str) {
        let mut state = self.state.lock().unwrap();
        state.installed.insert(id.to_string());
        state.builtin.insert(id.to_string());
    }

    pub fn fail_install_of(&self, id: &str) {
        self.state.lock().unwrap().fail_install = Some(id.to_string());
    }

    /// Installed ids, bundled included.
    pub fn installed(&self) -> BTreeSet<String> {
        self.state.lock().unwrap().installed.clone()
    }

    /// Installed non-bundled ids (the actual set).
    pub fn actual(&self) -> BTreeSet<String> {
        let state = self.state.lock().unwrap();
        state
            .installed
            .iter()
            .filter(|id| !state.builtin.contains(*id))
            .cloned()
            .collect()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl ExtensionHost for MemoryHost {
    fn list(&self) -> sync_ext::Result<Vec<InstalledExtension>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .installed
            .iter()
            .map(|id| InstalledExtension::new(id.clone(), state.builtin.contains(id)))
            .collect())
    }

    fn install(&self, id: &str) -> sync_ext::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("install {id}"));
        if state.fail_install.as_deref() == Some(id) {
            return Err(ExtError::host("marketplace unavailable"));
        }
        state.installed.insert(id.to_string());
        Ok(())
    }

    fn uninstall(&self, id: &str) -> sync_ext::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("uninstall {id}"));
        state.installed.remove(id);
        Ok(())
    }
}

/// Prompt returning a fixed value; counts how often it was shown.
#[derive(Clone)]
pub struct CountingPrompt {
    value: &'static str,
    asked: Arc<AtomicUsize>,
}

impl CountingPrompt {
    pub fn new(value: &'static str) -> Self {
        Self {
            value,
            asked: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl CredentialPrompt for CountingPrompt {
    fn ask(&self, _label: &str) -> sync_core::Result<String> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        Ok(self.value.to_string())
    }
}

/// One fully-wired engine against a local bare remote.
pub struct TestEnv {
    pub data: TempDir,
    pub remote: RemoteFixture,
    pub settings: MemorySettings,
    pub host: MemoryHost,
    pub prompt: CountingPrompt,
}

impl TestEnv {
    pub fn new(remote: RemoteFixture, settings: MemorySettings, host: MemoryHost) -> Self {
        Self {
            data: TempDir::new().unwrap(),
            remote,
            settings,
            host,
            prompt: CountingPrompt::new("test-token"),
        }
    }

    pub fn layout(&self) -> DataLayout {
        DataLayout::new(self.data.path())
    }

    /// Engine pointed at the fixture remote.
    pub fn engine(&self) -> SyncEngine {
        let config = SyncConfig {
            source_repository: None,
            remote_url: Some(self.remote.url()),
        };
        self.engine_with_config(config)
    }

    /// Engine with explicit configuration (e.g. none at all).
    pub fn engine_with_config(&self, config: SyncConfig) -> SyncEngine {
        SyncEngine::new(
            self.layout(),
            config,
            Box::new(self.settings.clone()),
            Box::new(self.host.clone()),
            Box::new(self.prompt.clone()),
        )
    }
}
