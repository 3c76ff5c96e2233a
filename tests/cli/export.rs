use crate::cli::support::{init_store, marksheet, write_sheet, THREE_EVALUATOR_SHEET};
use predicates::prelude::*;
use tempfile::tempdir;

fn seeded() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    init_store(dir.path());
    write_sheet(dir.path(), "p1r1.csv", THREE_EVALUATOR_SHEET);
    marksheet()
        .current_dir(dir.path())
        .args(["import", "p1r1.csv"])
        .assert()
        .success();
    dir
}

#[test]
fn test_export_to_stdout() {
    let dir = seeded();

    marksheet()
        .current_dir(dir.path())
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "group_no,project_title,seat_no,name,phase,review,member1_c1",
        ))
        .stdout(predicate::str::contains(
            "G1,Smart Irrigation,1XX20CS001,Asha,1,1,18,9,9,9,45,19,9,9,9,46,20,10,10,10,50,19,9,9,9,46",
        ));
}

#[test]
fn test_export_to_file() {
    let dir = seeded();

    marksheet()
        .current_dir(dir.path())
        .args(["export", "--output", "out.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 row(s)"));

    let text = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
    assert_eq!(text.lines().count(), 4);
}
