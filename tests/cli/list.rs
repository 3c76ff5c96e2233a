use crate::cli::support::{init_store, marksheet, run_json, write_sheet, THREE_EVALUATOR_SHEET};
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
fn test_list_human_table() {
    let dir = seeded();

    marksheet()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("PHASE - I REVIEW - I (out of 50)"))
        .stdout(predicate::str::contains("c1 = Literature Survey (20) [guide]"))
        .stdout(predicate::str::contains("1XX20CS001"))
        .stdout(predicate::str::contains("Meera"));
}

#[test]
fn test_list_json_is_ordered_by_group_then_name() {
    let dir = seeded();

    let json = run_json(dir.path(), &["list"]);
    assert_eq!(json["count"], 3);
    let names: Vec<&str> = json["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["student"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Asha", "Ravi", "Meera"]);
}

#[test]
fn test_list_by_guide() {
    let dir = seeded();

    let json = run_json(dir.path(), &["list", "--by", "guide"]);
    assert_eq!(json["groups"]["Dr. Rao"].as_array().unwrap().len(), 2);
    assert_eq!(json["groups"]["Dr. Iyer"].as_array().unwrap().len(), 1);

    marksheet()
        .current_dir(dir.path())
        .args(["list", "--by", "group"])
        .assert()
        .success()
        .stdout(predicate::str::contains("== G1 =="))
        .stdout(predicate::str::contains("== G2 =="));
}

#[test]
fn test_list_other_slice_is_empty() {
    let dir = seeded();

    marksheet()
        .current_dir(dir.path())
        .args(["list", "--phase", "2", "--review", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No evaluations for phase 2 review 2"));
}
