//! End-to-end tests for the `repoherd sh` command, which also exercise the
//! batch executor through the CLI: settle-all semantics and the
//! failures-before-successes report.

#![cfg(unix)]

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

fn add_repo(root: &TempDir, owner: &str, name: &str) {
    root.child(format!("{}/{}/.git", owner, name))
        .create_dir_all()
        .unwrap();
}

#[test]
fn test_sh_help() {
    repoherd_cmd()
        .arg("sh")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Execute a shell command in all known repositories",
        ));
}

#[test]
fn test_sh_runs_in_every_repository() {
    let temp = TempDir::new().unwrap();
    add_repo(&temp, "octo", "one");
    add_repo(&temp, "octo", "two");

    repoherd_cmd()
        .arg("sh")
        .arg("--root")
        .arg(temp.path())
        .arg("echo hi")
        .assert()
        .success()
        .stdout(predicate::str::contains("octo/one"))
        .stdout(predicate::str::contains("octo/two"))
        .stdout(predicate::str::contains("hi"));
}

#[test]
fn test_sh_one_failure_does_not_cancel_siblings() {
    let temp = TempDir::new().unwrap();
    add_repo(&temp, "aaa", "ok");
    add_repo(&temp, "zzz", "bad");
    temp.child("aaa/ok/marker").write_str("x").unwrap();

    // fails only where marker is absent; the failing repository sorts last
    // but is reported first
    repoherd_cmd()
        .arg("sh")
        .arg("--root")
        .arg(temp.path())
        .arg("test -f marker")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)✖ zzz/bad.*✔ aaa/ok").unwrap());
}

#[test]
fn test_sh_failure_output_carries_stderr() {
    let temp = TempDir::new().unwrap();
    add_repo(&temp, "octo", "herd");

    repoherd_cmd()
        .arg("sh")
        .arg("--root")
        .arg(temp.path())
        .arg("echo broken >&2; exit 1")
        .assert()
        .success()
        .stdout(predicate::str::contains("✖ octo/herd"))
        .stdout(predicate::str::contains("broken"));
}

#[test]
fn test_sh_respects_include_filter() {
    let temp = TempDir::new().unwrap();
    add_repo(&temp, "octo", "herd");
    add_repo(&temp, "acme", "herd");

    repoherd_cmd()
        .arg("sh")
        .arg("--root")
        .arg(temp.path())
        .arg("--include")
        .arg("octo/*")
        .arg("echo hi")
        .assert()
        .success()
        .stdout(predicate::str::contains("octo/herd"))
        .stdout(predicate::str::contains("acme").not());
}
