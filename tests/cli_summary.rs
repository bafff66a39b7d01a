// Drives the compiled binary in its non-interactive `--summary` mode, so it
// runs without a TTY. HOME and XDG_CONFIG_HOME point into a temp dir to keep
// the real config and history untouched.

use assert_cmd::Command;
use std::fs;
use tempfile::tempdir;

fn summary_cmd(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("schedyulah").unwrap();
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn summary_with_no_history() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("sessions.json");

    let assert = summary_cmd(dir.path())
        .arg("--summary")
        .arg("--data-file")
        .arg(&data)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("Total sessions:     0"));
    assert!(stdout.contains("No sessions yet"));
    assert!(!data.exists(), "summary must not create the history file");
}

#[test]
fn summary_reads_history_and_skips_bad_records() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("sessions.json");
    fs::write(
        &data,
        r#"[
  {"id":"1","activity":"Piano","startTime":1709280000000,"endTime":1709280600000,
   "duration":540000,"pausedTime":60000,"date":"2024-03-01"},
  {"id":"2","activity":"Piano","startTime":1709290000000,"endTime":1709280000000,
   "duration":0,"pausedTime":0,"date":"2024-03-01"},
  {"id":"3","activity":"Chess","startTime":1709300000000,"endTime":1709301200000,
   "duration":600000,"pausedTime":600000,"date":"2024-03-01"}
]"#,
    )
    .unwrap();

    let assert = summary_cmd(dir.path())
        .args(["--summary", "--data-file"])
        .arg(&data)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("Total sessions:     2"));
    assert!(stdout.contains("Total active time:  19m"));
    assert!(stdout.contains("Avg productivity:   63%"));
    assert!(stdout.contains("1. Chess - 10m (1 sessions)"));
    assert!(stdout.contains("2. Piano - 9m (1 sessions)"));
}

#[test]
fn summary_rejects_non_array_history() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("sessions.json");
    fs::write(&data, r#"{"not":"a list"}"#).unwrap();

    summary_cmd(dir.path())
        .args(["--summary", "--data-file"])
        .arg(&data)
        .assert()
        .failure();
}
