//! End-to-end engine tests against local bare remotes.

mod support;

use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use support::{MemoryHost, MemorySettings, TestEnv};
use sync_core::{Error, SettingsStore, SyncConfig, UploadOutcome};
use sync_test_utils::{RemoteFixture, manifest_json};

fn ids(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_download_mirrors_remote_state() {
    let remote = RemoteFixture::with_files("{\"theme\": \"dark\"}", &["a.one", "b.two"]);
    let env = TestEnv::new(
        remote,
        MemorySettings::with_content("{\"stale\": true}"),
        MemoryHost::with_installed(&["b.two", "c.extra"]),
    );

    env.engine().download().unwrap();

    assert_eq!(env.settings.content(), "{\"theme\": \"dark\"}");
    assert_eq!(env.host.actual(), ids(&["a.one", "b.two"]));
}

#[test]
fn test_download_twice_is_idempotent() {
    let remote = RemoteFixture::with_files("content", &["a.one"]);
    let env = TestEnv::new(
        remote,
        MemorySettings::default(),
        MemoryHost::with_installed(&[]),
    );

    env.engine().download().unwrap();
    let settings_after_first = env.settings.content();
    let extensions_after_first = env.host.actual();

    env.engine().download().unwrap();

    assert_eq!(env.settings.content(), settings_after_first);
    assert_eq!(env.host.actual(), extensions_after_first);
    // The second pass had an empty diff: exactly one install ever ran.
    assert_eq!(env.host.calls(), vec!["install a.one"]);
}

#[test]
fn test_upload_then_download_round_trips() {
    let remote = RemoteFixture::new();
    let settings_text = "{\n  \"editor.fontSize\": 14,\n}\n// keep me\n";
    let env = TestEnv::new(
        remote,
        MemorySettings::with_content(settings_text),
        MemoryHost::with_installed(&["z.last", "a.first"]),
    );

    assert_eq!(env.engine().upload().unwrap(), UploadOutcome::Pushed);

    // Wipe local state, then pull everything back.
    env.settings.write("").unwrap();
    env.engine().download().unwrap();

    assert_eq!(env.settings.content(), settings_text);
    assert_eq!(env.host.actual(), ids(&["a.first", "z.last"]));
}

#[test]
fn test_upload_with_no_changes_skips_commit_and_push() {
    let remote = RemoteFixture::with_files("same", &["a.one"]);
    let env = TestEnv::new(
        remote,
        MemorySettings::with_content("same"),
        MemoryHost::with_installed(&["a.one"]),
    );
    let head_before = env.remote.head_id();

    assert_eq!(env.engine().upload().unwrap(), UploadOutcome::NoChanges);

    assert_eq!(env.remote.head_id(), head_before);
    assert_eq!(env.remote.commit_count(), 1);
}

#[test]
fn test_upload_pushes_settings_and_sorted_manifest() {
    let remote = RemoteFixture::new();
    let env = TestEnv::new(
        remote,
        MemorySettings::with_content("{\"a\": 1}"),
        MemoryHost::with_installed(&["z.last", "a.first"]),
    );

    assert_eq!(env.engine().upload().unwrap(), UploadOutcome::Pushed);

    assert_eq!(env.remote.head_file("settings.json").unwrap(), "{\"a\": 1}");
    assert_eq!(
        env.remote.head_file("extensions.json").unwrap(),
        manifest_json(&["a.first", "z.last"])
    );
    assert_eq!(env.remote.head_message().trim_end(), "Save Settings");
}

#[test]
fn test_missing_configuration_fails_before_any_io() {
    let remote = RemoteFixture::new();
    let env = TestEnv::new(
        remote,
        MemorySettings::default(),
        MemoryHost::with_installed(&[]),
    );

    let engine = env.engine_with_config(SyncConfig::default());
    let err = engine.download().unwrap_err();

    assert!(
        matches!(
            err,
            Error::MissingSetting {
                key: "source_repository"
            }
        ),
        "got: {err}"
    );
    // Nothing was prompted, provisioned, or written.
    assert_eq!(env.prompt.times_asked(), 0);
    assert!(!env.layout().repo_path().exists());
    assert!(!env.layout().token_path().exists());
}

#[test]
fn test_credential_is_prompted_once_across_syncs() {
    let remote = RemoteFixture::with_files("content", &[]);
    let env = TestEnv::new(
        remote,
        MemorySettings::default(),
        MemoryHost::with_installed(&[]),
    );

    env.engine().download().unwrap();
    env.engine().upload().unwrap();
    env.engine().download().unwrap();

    assert_eq!(env.prompt.times_asked(), 1);
}

#[test]
fn test_partial_reconciliation_is_not_rolled_back() {
    let remote = RemoteFixture::with_files("{}", &["a.one", "b.two"]);
    let env = TestEnv::new(
        remote,
        MemorySettings::default(),
        MemoryHost::with_installed(&[]),
    );
    env.host.fail_install_of("b.two");

    let err = env.engine().download().unwrap_err();
    assert!(
        matches!(err, Error::Extensions(sync_ext::Error::Apply { ref id, .. }) if id == "b.two"),
        "got: {err}"
    );
    // a.one was installed before the abort and stays installed.
    assert!(env.host.installed().contains("a.one"));
}

#[test]
fn test_bundled_extensions_survive_download_and_skip_upload() {
    let remote = RemoteFixture::with_files("{}", &["a.one"]);
    let env = TestEnv::new(
        remote,
        MemorySettings::default(),
        MemoryHost::with_installed(&[]),
    );
    env.host.add_builtin("editor.builtin-git");

    env.engine().download().unwrap();
    // Never uninstalled, even though it is not declared.
    assert!(env.host.installed().contains("editor.builtin-git"));

    env.settings.write("changed").unwrap();
    assert_eq!(env.engine().upload().unwrap(), UploadOutcome::Pushed);
    // Never serialized into the manifest.
    assert_eq!(
        env.remote.head_file("extensions.json").unwrap(),
        manifest_json(&["a.one"])
    );
}

#[test]
fn test_remote_changes_win_on_next_download() {
    let remote = RemoteFixture::with_files("v1", &[]);
    let env = TestEnv::new(
        remote,
        MemorySettings::default(),
        MemoryHost::with_installed(&[]),
    );

    env.engine().download().unwrap();
    env.remote
        .commit_files(&[("settings.json", "v2")], "Save Settings");
    env.engine().download().unwrap();

    assert_eq!(env.settings.content(), "v2");
}
