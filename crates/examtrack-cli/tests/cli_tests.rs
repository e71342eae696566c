//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn examtrack() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("examtrack").unwrap()
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    examtrack()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created banks/gs-sample.toml"))
        .stdout(predicate::str::contains("Created sample-attempt.json"));

    assert!(dir.path().join("banks/gs-sample.toml").exists());
    assert!(dir.path().join("sample-attempt.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    examtrack()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    examtrack()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));
}

#[test]
fn validate_generated_bank() {
    let dir = TempDir::new().unwrap();

    examtrack()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    examtrack()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("banks/gs-sample.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 questions"))
        .stdout(predicate::str::contains("All test banks valid"));
}

#[test]
fn validate_flags_missing_answer_key() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("bad.toml"),
        r#"
[test]
id = "bad"
name = "Bad Bank"

[[questions]]
id = "q1"
text = "?"
options = ["a", "b"]
subject = "Maths"
"#,
    )
    .unwrap();

    examtrack()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("bad.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("no correct_option"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    examtrack()
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn stats_with_no_data_reports_empty() {
    let dir = TempDir::new().unwrap();

    examtrack()
        .current_dir(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Questions answered: 0"))
        .stdout(predicate::str::contains("No practice recorded yet"));
}

#[test]
fn history_with_no_data_reports_empty() {
    let dir = TempDir::new().unwrap();

    examtrack()
        .current_dir(dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No attempts recorded"));
}

#[test]
fn submit_rejects_unknown_test() {
    let dir = TempDir::new().unwrap();

    examtrack()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    std::fs::write(
        dir.path().join("orphan.json"),
        r#"{
  "id": "orphan-1",
  "test_id": "no-such-test",
  "started_at": "2025-06-10T09:00:00Z",
  "finished_at": null,
  "completed": true,
  "custom_name": null,
  "answers": {}
}"#,
    )
    .unwrap();

    examtrack()
        .current_dir(dir.path())
        .arg("submit")
        .arg("--bank")
        .arg("banks/gs-sample.toml")
        .arg("--attempt")
        .arg("orphan.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("test not found"));
}
