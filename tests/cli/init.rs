use crate::cli::support::marksheet;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_init_creates_store() {
    let dir = tempdir().unwrap();

    marksheet()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized marksheet store"));

    assert!(dir.path().join(".marksheet/config.toml").exists());
    assert!(dir.path().join(".marksheet/marksheet.db").exists());
}

#[test]
fn test_init_idempotent() {
    let dir = tempdir().unwrap();

    marksheet().current_dir(dir.path()).arg("init").assert().success();
    std::fs::write(
        dir.path().join(".marksheet/config.toml"),
        "default_phase = 2\n",
    )
    .unwrap();

    marksheet().current_dir(dir.path()).arg("init").assert().success();

    let config = std::fs::read_to_string(dir.path().join(".marksheet/config.toml")).unwrap();
    assert_eq!(config, "default_phase = 2\n");
}

#[test]
fn test_init_json_output() {
    let dir = tempdir().unwrap();

    marksheet()
        .current_dir(dir.path())
        .args(["init", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"ok\""));
}

#[test]
fn test_init_explicit_store_path() {
    let dir = tempdir().unwrap();

    marksheet()
        .current_dir(dir.path())
        .args(["--store", "reviews-2024", "init"])
        .assert()
        .success();

    assert!(dir.path().join("reviews-2024/config.toml").exists());

    marksheet()
        .current_dir(dir.path())
        .args(["--store", "reviews-2024", "list"])
        .assert()
        .success();
}

#[test]
fn test_commands_without_store_fail_with_data_code() {
    let dir = tempdir().unwrap();

    marksheet()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("store not found"));
}
