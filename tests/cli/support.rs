use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

/// Get a Command for marksheet
pub fn marksheet() -> Command {
    cargo_bin_cmd!("marksheet")
}

/// Run `marksheet init` in `dir`
pub fn init_store(dir: &Path) {
    marksheet()
        .current_dir(dir)
        .arg("init")
        .assert()
        .success();
}

/// Write a spreadsheet fixture next to the store
pub fn write_sheet(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Run a command with `--format json` and parse its stdout
pub fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let output = marksheet()
        .current_dir(dir)
        .args(args)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "command {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

pub const THREE_EVALUATOR_SHEET: &str = "\
Name,Seat No,Group,Project Title,Project Guide,Member 1,Member 2,Internal Guide
Asha,1XX20CS001,G1,Smart Irrigation,Dr. Rao,45,46,50
Ravi,1XX20CS002,G1,Smart Irrigation,Dr. Rao,40,38,44
Meera,1XX20CS003,G2,Campus Navigator,Dr. Iyer,0,0,47
";
