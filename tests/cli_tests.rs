//! Integration tests for the marksheet CLI
//!
//! These tests run the marksheet binary against throwaway stores.

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use tempfile::tempdir;

mod cli;

fn marksheet() -> Command {
    cargo_bin_cmd!("marksheet")
}

// ============================================================================
// Help and Version tests
// ============================================================================

#[test]
fn test_help_flag() {
    marksheet()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: marksheet"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("apportion"));
}

#[test]
fn test_version_flag() {
    marksheet()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("marksheet"));
}

#[test]
fn test_no_command_prints_usage_hint() {
    let dir = tempdir().unwrap();
    marksheet()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("--help"));
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    marksheet().arg("grade").assert().code(2);
}

#[test]
fn test_json_envelope_for_parse_errors() {
    marksheet()
        .args(["--format", "json", "import"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("usage_error"));
}

#[test]
fn test_debug_logs_stay_off_stdout() {
    let dir = tempdir().unwrap();
    marksheet()
        .current_dir(dir.path())
        .args(["--log-level", "debug", "weights"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PHASE - I REVIEW - I"))
        .stdout(predicate::str::contains("DEBUG").not());
}
