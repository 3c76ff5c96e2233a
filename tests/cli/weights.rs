use crate::cli::support::{marksheet, run_json};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_weights_without_store_uses_builtins() {
    let dir = tempdir().unwrap();

    let json = run_json(dir.path(), &["weights"]);
    assert_eq!(json.as_array().unwrap().len(), 4);
    assert_eq!(json[0]["total"], 50);
}

#[test]
fn test_weights_single_config() {
    let dir = tempdir().unwrap();

    marksheet()
        .current_dir(dir.path())
        .args(["weights", "--phase", "2", "--review", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PHASE - II REVIEW - I"))
        .stdout(predicate::str::contains("Execution & Result Analysis"))
        .stdout(predicate::str::contains("Marks allotted by Project Guide"));
}

#[test]
fn test_weights_phase_requires_review() {
    let dir = tempdir().unwrap();

    marksheet()
        .current_dir(dir.path())
        .args(["weights", "--phase", "1"])
        .assert()
        .code(2);
}

#[test]
fn test_weights_unknown_config() {
    let dir = tempdir().unwrap();

    marksheet()
        .current_dir(dir.path())
        .args(["weights", "--phase", "9", "--review", "9"])
        .assert()
        .code(3);
}

#[test]
fn test_weights_rejects_zero_phase_or_review() {
    let dir = tempdir().unwrap();

    marksheet()
        .current_dir(dir.path())
        .args(["weights", "-p", "0", "-r", "0"])
        .assert()
        .code(2);
}
