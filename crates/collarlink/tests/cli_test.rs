//! Integration tests for the `collarlink` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `collarlink` binary with env isolation.
///
/// Clears all `COLLARLINK_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration
/// or persisted session.
fn collarlink_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("collarlink");
    cmd.env("HOME", "/tmp/collarlink-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/collarlink-cli-test-nonexistent")
        .env_remove("COLLARLINK_SERVER")
        .env_remove("COLLARLINK_OUTPUT")
        .env_remove("COLLARLINK_TIMEOUT")
        .env_remove("COLLARLINK_TOKEN");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = collarlink_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    collarlink_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("pet tracking")
            .and(predicate::str::contains("login"))
            .and(predicate::str::contains("pet"))
            .and(predicate::str::contains("device"))
            .and(predicate::str::contains("geofence")),
    );
}

#[test]
fn test_version_flag() {
    collarlink_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("collarlink"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    collarlink_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    collarlink_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    collarlink_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = collarlink_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_pet_list_not_signed_in() {
    // No persisted session: the store fails fast before any HTTP call.
    let output = collarlink_cmd().args(["pet", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("signed in") || text.contains("login"),
        "Expected sign-in hint:\n{text}"
    );
}

#[test]
fn test_whoami_not_signed_in() {
    let output = collarlink_cmd().arg("whoami").output().unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("signed in") || text.contains("login"),
        "Expected sign-in hint:\n{text}"
    );
}

#[test]
fn test_logout_without_session_succeeds() {
    // Signing out twice is not an error.
    collarlink_cmd().arg("logout").assert().success();
}

#[test]
fn test_invalid_output_format() {
    let output = collarlink_cmd()
        .args(["--output", "invalid", "pet", "list"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values") || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_gender_rejected() {
    let output = collarlink_cmd()
        .args([
            "pet", "add", "Rex", "--species", "dog", "--breed", "mutt", "--gender", "unknown",
            "--age", "3",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success(), "Expected failure for bad gender");
    let text = combined_output(&output);
    assert!(
        text.contains("possible values") || text.contains("invalid"),
        "Expected gender value error:\n{text}"
    );
}

#[test]
fn test_global_flags_parsing() {
    // All flags should parse correctly — the failure should be the
    // missing session, not argument parsing.
    let output = collarlink_cmd()
        .args([
            "--output",
            "json",
            "--verbose",
            "--timeout",
            "60",
            "--server",
            "http://localhost:9",
            "pet",
            "list",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_pet_subcommands_exist() {
    collarlink_cmd()
        .args(["pet", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("update"))
                .and(predicate::str::contains("rm"))
                .and(predicate::str::contains("set-collar")),
        );
}

#[test]
fn test_device_subcommands_exist() {
    collarlink_cmd()
        .args(["device", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("rm"))
                .and(predicate::str::contains("assign")),
        );
}

#[test]
fn test_geofence_subcommands_exist() {
    collarlink_cmd()
        .args(["geofence", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("update"))
                .and(predicate::str::contains("rm")),
        );
}
