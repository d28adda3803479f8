//! CLI surface tests for the crudify binary.
//!
//! Nothing here touches the network: every case fails (or prints help)
//! before the first GitHub call.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Helper to create a crudify Command with no ambient credential.
fn crudify() -> Command {
    let mut cmd = cargo_bin_cmd!("crudify");
    cmd.env_remove("GITHUB_TOKEN");
    cmd
}

#[test]
fn test_crudify_help() {
    crudify()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate Django REST Framework CRUD code"));
}

#[test]
fn test_crudify_version() {
    crudify().arg("--version").assert().success();
}

#[test]
fn test_run_help_lists_flags() {
    crudify()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--framework"));
}

#[test]
fn test_run_without_token_reports_no_credential() {
    crudify()
        .args(["run", "octo/demo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No GitHub access token"));
}

#[test]
fn test_run_rejects_unsupported_framework() {
    // Framework validation happens before credential resolution.
    crudify()
        .args(["run", "octo/demo", "--framework", "rails"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only Django is supported"));
}

#[test]
fn test_run_rejects_malformed_repo_slug() {
    crudify()
        .args(["run", "not-a-slug", "--token", "ghp_testtoken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected owner/repo"));
}

#[test]
fn test_repos_without_token_reports_no_credential() {
    crudify()
        .arg("repos")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No GitHub access token"));
}
