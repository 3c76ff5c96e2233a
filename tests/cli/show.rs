use crate::cli::support::{init_store, marksheet, write_sheet, THREE_EVALUATOR_SHEET};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_show_breakdown() {
    let dir = tempdir().unwrap();
    init_store(dir.path());
    write_sheet(dir.path(), "p1r1.csv", THREE_EVALUATOR_SHEET);
    marksheet()
        .current_dir(dir.path())
        .args(["import", "p1r1.csv"])
        .assert()
        .success();

    marksheet()
        .current_dir(dir.path())
        .args(["show", "1XX20CS001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Asha (1XX20CS001)"))
        .stdout(predicate::str::contains("guide:   Dr. Rao"))
        .stdout(predicate::str::contains("canonical"))
        .stdout(predicate::str::contains("PHASE - I REVIEW - I"));
}

#[test]
fn test_show_unknown_student() {
    let dir = tempdir().unwrap();
    init_store(dir.path());

    marksheet()
        .current_dir(dir.path())
        .args(["show", "NOPE"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("student not found: NOPE"));
}
