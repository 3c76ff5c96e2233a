use crate::cli::support::{marksheet, run_json};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_apportion_json() {
    let dir = tempdir().unwrap();

    let json = run_json(dir.path(), &["apportion", "46"]);
    let marks: Vec<u64> = json["criteria"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["marks"].as_u64().unwrap())
        .collect();
    assert_eq!(marks, vec![19, 9, 9, 9]);
    assert_eq!(json["criteria"][0]["quota"], 18.4);
}

#[test]
fn test_apportion_human() {
    let dir = tempdir().unwrap();

    marksheet()
        .current_dir(dir.path())
        .args(["apportion", "33", "--phase", "2", "--review", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("33 -> PHASE - II REVIEW - II"))
        .stdout(predicate::str::contains("6.60"));
}

#[test]
fn test_apportion_above_ceiling_is_usage_error() {
    let dir = tempdir().unwrap();

    marksheet()
        .current_dir(dir.path())
        .args(["apportion", "51"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("exceeds the ceiling"));
}
