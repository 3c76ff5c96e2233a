use crate::cli::support::{init_store, marksheet, run_json, write_sheet, THREE_EVALUATOR_SHEET};
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_import_three_evaluator_totals() {
    let dir = tempdir().unwrap();
    init_store(dir.path());
    write_sheet(dir.path(), "p1r1.csv", THREE_EVALUATOR_SHEET);

    let json = run_json(dir.path(), &["import", "p1r1.csv", "--phase", "1", "--review", "1"]);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["report"]["shape"], "three_evaluator_totals");
    assert_eq!(json["report"]["created"], 3);
    assert_eq!(json["report"]["new_students"], 3);
    assert_eq!(json["report"]["failures"].as_array().unwrap().len(), 0);

    let show = run_json(dir.path(), &["show", "1XX20CS001"]);
    let evaluation = &show["evaluations"][0];
    assert_eq!(evaluation["member1"], serde_json::json!([18, 9, 9, 9]));
    assert_eq!(evaluation["member2"], serde_json::json!([19, 9, 9, 9]));
    assert_eq!(evaluation["guide"], serde_json::json!([20, 10, 10, 10]));
    assert_eq!(evaluation["criteria"], serde_json::json!([19, 9, 9, 9]));
    assert_eq!(evaluation["total_marks"], 46);

    // Absent evaluators do not pull the canonical marks down
    let meera = run_json(dir.path(), &["show", "1XX20CS003"]);
    assert_eq!(meera["evaluations"][0]["total_marks"], 47);
}

#[test]
fn test_import_per_criterion_marks() {
    let dir = tempdir().unwrap();
    init_store(dir.path());
    write_sheet(
        dir.path(),
        "p1r2.csv",
        "USN,Student Name,Objectives,Methodology,Presentation,QA\nS1,Ravi,9,8,14,13\n",
    );

    let json = run_json(dir.path(), &["import", "p1r2.csv", "-p", "1", "-r", "2"]);
    assert_eq!(json["report"]["shape"], "per_criterion_marks");

    let show = run_json(dir.path(), &["show", "S1", "--phase", "1", "--review", "2"]);
    assert_eq!(show["evaluations"][0]["criteria"], serde_json::json!([9, 8, 14, 13]));
    assert_eq!(show["evaluations"][0]["total_marks"], 44);
}

#[test]
fn test_import_aggregate_total_semicolon_file() {
    let dir = tempdir().unwrap();
    init_store(dir.path());
    write_sheet(dir.path(), "totals.csv", "Name;Seat No;Total\nAsha;S1;90\n");

    let json = run_json(dir.path(), &["import", "totals.csv"]);
    assert_eq!(json["report"]["shape"], "aggregate_total");
    assert_eq!(json["report"]["phase"], 1);
    assert_eq!(json["report"]["review"], 1);

    let show = run_json(dir.path(), &["show", "S1"]);
    assert_eq!(show["evaluations"][0]["total_marks"], 45);
}

#[test]
fn test_reimport_overwrites_slice() {
    let dir = tempdir().unwrap();
    init_store(dir.path());
    write_sheet(dir.path(), "first.csv", "Name,Seat No,Total\nAsha,S1,40\nRavi,S2,30\n");
    write_sheet(dir.path(), "second.csv", "Name,Seat No,Total\nAsha,S1,44\n");

    run_json(dir.path(), &["import", "first.csv"]);
    let json = run_json(dir.path(), &["import", "second.csv"]);
    assert_eq!(json["report"]["deleted"], 2);
    assert_eq!(json["report"]["created"], 1);

    let list = run_json(dir.path(), &["list"]);
    assert_eq!(list["count"], 1);
    assert_eq!(list["rows"][0]["evaluation"]["total_marks"], 44);
}

#[test]
fn test_malformed_rows_warn_but_succeed() {
    let dir = tempdir().unwrap();
    init_store(dir.path());
    write_sheet(
        dir.path(),
        "marks.csv",
        "Name,Seat No,Total\nAsha,S1,40\nRavi,S2,absent\n",
    );

    marksheet()
        .current_dir(dir.path())
        .args(["import", "marks.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 evaluation(s)"))
        .stderr(predicate::str::contains("warning: skipped 1 row(s)"))
        .stderr(predicate::str::contains("row 3 (S2)"));
}

#[test]
fn test_missing_columns_exit_code() {
    let dir = tempdir().unwrap();
    init_store(dir.path());
    write_sheet(dir.path(), "bad.csv", "Student,Remarks\nAsha,good\n");

    marksheet()
        .current_dir(dir.path())
        .args(["import", "bad.csv"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("missing required columns"))
        .stderr(predicate::str::contains("seat_no"));
}

#[test]
fn test_missing_columns_json_envelope() {
    let dir = tempdir().unwrap();
    init_store(dir.path());
    write_sheet(dir.path(), "bad.csv", "Name,Seat No,Remarks\nAsha,S1,good\n");

    let output = marksheet()
        .current_dir(dir.path())
        .args(["import", "bad.csv", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));

    let json: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(json["error"]["type"], "missing_required_columns");
    assert_eq!(json["error"]["missing"].as_array().unwrap().len(), 1);
}

#[test]
fn test_unknown_weight_config_exit_code() {
    let dir = tempdir().unwrap();
    init_store(dir.path());
    write_sheet(dir.path(), "marks.csv", "Name,Seat No,Total\nAsha,S1,40\n");

    marksheet()
        .current_dir(dir.path())
        .args(["import", "marks.csv", "--phase", "3", "--review", "1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "no weight configuration for phase 3 review 1",
        ));
}

#[test]
fn test_missing_file_exit_code() {
    let dir = tempdir().unwrap();
    init_store(dir.path());

    marksheet()
        .current_dir(dir.path())
        .args(["import", "nowhere.csv"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("spreadsheet not found"));
}

#[test]
fn test_configured_weights_are_used() {
    let dir = tempdir().unwrap();
    init_store(dir.path());
    std::fs::write(
        dir.path().join(".marksheet/config.toml"),
        r#"
default_phase = 3

[[weights]]
phase = 3
review = 1
title = "PHASE - III REVIEW - I"
total = 100
criteria = [
    { name = "Implementation", max_marks = 40, guide_only = true },
    { name = "Testing", max_marks = 20, guide_only = true },
    { name = "Project presentation skill", max_marks = 20 },
    { name = "Question and answer session", max_marks = 20 },
]
"#,
    )
    .unwrap();
    write_sheet(dir.path(), "p3.csv", "Name,Seat No,Total\nAsha,S1,75\n");

    let json = run_json(dir.path(), &["import", "p3.csv"]);
    assert_eq!(json["report"]["phase"], 3);

    let show = run_json(dir.path(), &["show", "S1"]);
    assert_eq!(show["evaluations"][0]["criteria"], serde_json::json!([30, 15, 15, 15]));
}

#[test]
fn test_import_workbook() {
    let dir = tempdir().unwrap();
    init_store(dir.path());

    let mut workbook = rust_xlsxwriter::Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        let header = ["Name", "Seat No", "Group", "Member 1", "Member 2", "Internal Guide"];
        for (col, title) in header.iter().enumerate() {
            worksheet.write_string(0, col as u16, *title).unwrap();
        }
        worksheet.write_string(1, 0, "Asha").unwrap();
        worksheet.write_string(1, 1, "1XX20CS001").unwrap();
        worksheet.write_string(1, 2, "G1").unwrap();
        worksheet.write_number(1, 3, 45.0).unwrap();
        worksheet.write_number(1, 4, 46.0).unwrap();
        worksheet.write_number(1, 5, 50.0).unwrap();
    }
    workbook.save(dir.path().join("p1r1.xlsx")).unwrap();

    marksheet()
        .current_dir(dir.path())
        .args(["import", "p1r1.xlsx"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 evaluation(s)"));

    let json = run_json(dir.path(), &["show", "1XX20CS001"]);
    let evaluation = &json["evaluations"][0];
    assert_eq!(evaluation["total_marks"], 46);
    assert_eq!(evaluation["member2"], serde_json::json!([19, 9, 9, 9]));
}
