//! Staging and forced publishing against local bare remotes.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use sync_git::Provisioner;
use sync_test_utils::RemoteFixture;
use tempfile::tempdir;

fn ready_copy(remote: &RemoteFixture) -> (tempfile::TempDir, Provisioner) {
    let data = tempdir().unwrap();
    let provisioner = Provisioner::new(data.path().join("source-repository"));
    provisioner.prepare(&remote.url(), "token").unwrap();
    (data, provisioner)
}

#[test]
fn test_staged_matches_head_after_prepare() {
    let remote = RemoteFixture::with_files("content", &[]);
    let (_data, provisioner) = ready_copy(&remote);
    assert!(provisioner.staged_matches_head().unwrap());
}

#[test]
fn test_staging_same_content_is_no_change() {
    let remote = RemoteFixture::with_files("unchanged", &[]);
    let (_data, provisioner) = ready_copy(&remote);

    fs::write(provisioner.path().join("settings.json"), "unchanged").unwrap();
    provisioner.stage(Path::new("settings.json")).unwrap();

    assert!(provisioner.staged_matches_head().unwrap());
}

#[test]
fn test_staging_new_content_differs_from_head() {
    let remote = RemoteFixture::with_files("old", &[]);
    let (_data, provisioner) = ready_copy(&remote);

    fs::write(provisioner.path().join("settings.json"), "new").unwrap();
    provisioner.stage(Path::new("settings.json")).unwrap();

    assert!(!provisioner.staged_matches_head().unwrap());
}

#[test]
fn test_commit_and_push_updates_remote() {
    let remote = RemoteFixture::with_files("old", &[]);
    let (_data, provisioner) = ready_copy(&remote);
    assert_eq!(remote.commit_count(), 1);

    fs::write(provisioner.path().join("settings.json"), "new").unwrap();
    provisioner.stage(Path::new("settings.json")).unwrap();
    provisioner.commit_and_push("Save Settings", "token").unwrap();

    assert_eq!(remote.commit_count(), 2);
    assert_eq!(remote.head_file("settings.json").unwrap(), "new");
    assert_eq!(remote.head_message().trim_end(), "Save Settings");
}

#[test]
fn test_force_push_overwrites_divergent_remote() {
    let remote = RemoteFixture::with_files("base", &[]);
    let (_data, provisioner) = ready_copy(&remote);

    // Another machine pushed in the meantime.
    remote.commit_files(&[("settings.json", "other machine")], "Save Settings");
    let divergent_head = remote.head_id();

    fs::write(provisioner.path().join("settings.json"), "this machine").unwrap();
    provisioner.stage(Path::new("settings.json")).unwrap();
    provisioner.commit_and_push("Save Settings", "token").unwrap();

    // Last writer wins: the divergent commit is gone from main.
    assert_ne!(remote.head_id(), divergent_head);
    assert_eq!(remote.head_file("settings.json").unwrap(), "this machine");
    assert_eq!(remote.commit_count(), 2);
}
