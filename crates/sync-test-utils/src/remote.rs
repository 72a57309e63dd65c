//! Local git remote fixtures.
//!
//! A [`RemoteFixture`] is a bare repository on the local filesystem that
//! stands in for the user's git-hosted configuration repository. Provisioner
//! and engine tests fetch from and force-push to it over the local
//! transport, so no network or credentials are involved.

use std::path::{Path, PathBuf};

use git2::{Commit, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// Serialize extension ids the way the sync engine writes the manifest
/// (JSON array, 2-space indent).
pub fn manifest_json(ids: &[&str]) -> String {
    serde_json::to_string_pretty(ids).expect("ids serialize as a JSON array")
}

/// A bare repository with a `main` branch, seeded with the two tracked
/// configuration files.
pub struct RemoteFixture {
    _dir: TempDir,
    bare_path: PathBuf,
}

impl RemoteFixture {
    /// Create a remote whose `main` holds empty-ish defaults.
    pub fn new() -> Self {
        Self::with_files("{}\n", &[])
    }

    /// Create a remote whose `main` holds the given settings text and
    /// declared extension ids.
    pub fn with_files(settings: &str, extension_ids: &[&str]) -> Self {
        let dir = TempDir::new().expect("create fixture tempdir");
        let bare_path = dir.path().join("remote.git");

        let mut opts = RepositoryInitOptions::new();
        opts.bare(true);
        opts.initial_head("main");
        Repository::init_opts(&bare_path, &opts).expect("init bare remote");

        let fixture = Self {
            _dir: dir,
            bare_path,
        };
        fixture.commit_files(
            &[
                ("settings.json", settings),
                ("extensions.json", &manifest_json(extension_ids)),
            ],
            "Initial settings",
        );
        fixture
    }

    /// The path of the bare repository, usable directly as a remote URL.
    pub fn path(&self) -> &Path {
        &self.bare_path
    }

    /// The remote URL clients should use (local transport).
    pub fn url(&self) -> String {
        self.bare_path.display().to_string()
    }

    /// Commit the given `(name, content)` files on top of `main`.
    ///
    /// Files not named keep their current content.
    pub fn commit_files(&self, files: &[(&str, &str)], message: &str) {
        let repo = Repository::open_bare(&self.bare_path).expect("open bare remote");

        let base_tree = repo
            .head()
            .ok()
            .map(|head| head.peel_to_tree().expect("peel HEAD to tree"));
        let mut builder = repo
            .treebuilder(base_tree.as_ref())
            .expect("create tree builder");
        for (name, content) in files {
            let blob = repo.blob(content.as_bytes()).expect("write blob");
            builder
                .insert(name, blob, 0o100_644)
                .expect("insert tree entry");
        }
        let tree_id = builder.write().expect("write tree");
        let tree = repo.find_tree(tree_id).expect("find tree");

        let sig = Signature::now("Fixture", "fixture@localhost").expect("signature");
        let parent = repo.head().ok().map(|h| h.peel_to_commit().expect("peel"));
        let parents: Vec<&Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("commit to remote");
    }

    /// Number of commits reachable from `main`.
    pub fn commit_count(&self) -> usize {
        let repo = Repository::open_bare(&self.bare_path).expect("open bare remote");
        let mut walk = repo.revwalk().expect("revwalk");
        walk.push_head().expect("push HEAD");
        walk.count()
    }

    /// The id of the commit `main` points at.
    pub fn head_id(&self) -> git2::Oid {
        let repo = Repository::open_bare(&self.bare_path).expect("open bare remote");
        repo.head()
            .expect("HEAD")
            .peel_to_commit()
            .expect("peel HEAD")
            .id()
    }

    /// Read a file's content out of the `main` tip, if present.
    pub fn head_file(&self, name: &str) -> Option<String> {
        let repo = Repository::open_bare(&self.bare_path).expect("open bare remote");
        let tree = repo.head().ok()?.peel_to_tree().ok()?;
        let entry = tree.get_name(name)?;
        let blob = repo.find_blob(entry.id()).ok()?;
        Some(String::from_utf8_lossy(blob.content()).into_owned())
    }

    /// The message of the commit `main` points at.
    pub fn head_message(&self) -> String {
        let repo = Repository::open_bare(&self.bare_path).expect("open bare remote");
        repo.head()
            .expect("HEAD")
            .peel_to_commit()
            .expect("peel HEAD")
            .message()
            .unwrap_or_default()
            .to_string()
    }
}

impl Default for RemoteFixture {
    fn default() -> Self {
        Self::new()
    }
}
