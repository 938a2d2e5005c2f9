//! End-to-end tests for the reconciliation commands that can run without a
//! live forge: argument validation and the per-repository failures that are
//! decided locally, before any network call.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

fn repoherd_cmd() -> Command {
    let mut cmd = Command::cargo_bin("repoherd").unwrap();
    cmd.env_remove("REPOHERD_ROOT")
        .env_remove("REPOHERD_GITHUB_TOKEN")
        .env_remove("GITHUB_TOKEN");
    cmd
}

#[test]
fn test_clone_rejects_malformed_identifier() {
    let temp = TempDir::new().unwrap();

    repoherd_cmd()
        .arg("clone")
        .arg("--root")
        .arg(temp.path())
        .arg("no-slash")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid repository identifier"));
}

#[test]
fn test_clone_reports_occupied_folder() {
    let temp = TempDir::new().unwrap();
    // a folder without a .git marker occupies the target path
    temp.child("octo/herd").create_dir_all().unwrap();
    temp.child("octo/herd/notes.txt").write_str("x").unwrap();

    repoherd_cmd()
        .arg("clone")
        .arg("--root")
        .arg(temp.path())
        .arg("octo/herd")
        .assert()
        .success()
        .stdout(predicate::str::contains("✖ octo/herd"))
        .stdout(predicate::str::contains("Folder already in use"));
}

#[test]
fn test_sync_reports_missing_local_repository() {
    let temp = TempDir::new().unwrap();

    repoherd_cmd()
        .arg("sync")
        .arg("--root")
        .arg(temp.path())
        .arg("octo/absent")
        .assert()
        .success()
        .stdout(predicate::str::contains("✖ octo/absent"))
        .stdout(predicate::str::contains("Repository not found"));
}

#[test]
fn test_publish_reports_missing_local_repository() {
    let temp = TempDir::new().unwrap();

    repoherd_cmd()
        .arg("publish")
        .arg("--root")
        .arg(temp.path())
        .arg("octo/absent")
        .assert()
        .success()
        .stdout(predicate::str::contains("✖ octo/absent"))
        .stdout(predicate::str::contains("Repository not found"));
}

#[test]
fn test_sync_wildcard_over_empty_inventory() {
    let temp = TempDir::new().unwrap();

    repoherd_cmd()
        .arg("sync")
        .arg("--root")
        .arg(temp.path())
        .arg("octo/*")
        .assert()
        .success()
        .stdout("");
}
