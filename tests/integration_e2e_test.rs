//! End-to-end tests running the `ccstats` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

mod common;

fn ccstats(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ccstats").unwrap();
    cmd.env("TZ", "UTC")
        .env("NO_COLOR", "1")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("CCSTATS_CONFIG")
        .env_remove("CCSTATS_DATA_PATH")
        .env_remove("LOG_LEVEL")
        .env_remove("LOG_OUTPUT");
    cmd
}

/// Two projects, three sessions, one malformed line
fn create_mock_claude_structure() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let s1 = common::session_dir(root, "web", "s1").unwrap();
    common::create_test_jsonl(&s1, "api_requests.jsonl", &common::lines(&[
        common::assistant_line("2024-01-01T10:00:00Z", 10, 5, 0, 0, 0.01),
        common::assistant_line("2024-01-01T11:00:00Z", 3, 2, 0, 0, 0.002),
        "{broken json line that should be skipped}".to_string(),
        common::user_line("2024-01-01T11:30:00Z"),
    ]))
    .unwrap();

    let s2 = common::session_dir(root, "web", "s2").unwrap();
    common::create_test_jsonl(&s2, "api_requests.jsonl", &common::lines(&[
        common::assistant_line("2024-01-02T09:00:00Z", 100, 50, 10, 20, 0.5),
    ]))
    .unwrap();

    let s3 = common::session_dir(root, "api", "s3").unwrap();
    common::create_test_jsonl(&s3, "api_requests.jsonl", &common::lines(&[
        common::assistant_line("2024-01-03T09:00:00Z", 1, 1, 1, 1, 0.25),
    ]))
    .unwrap();

    temp_dir
}

#[test]
fn test_daily_json_report() {
    let temp_dir = create_mock_claude_structure();
    let output = ccstats(temp_dir.path())
        .args(["daily", "--json", "--path"])
        .arg(temp_dir.path().join("projects"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["Date"], "2024-01-01");
    assert_eq!(rows[0]["InputTokens"], 13);
    assert_eq!(rows[0]["OutputTokens"], 7);
    assert_eq!(rows[0]["TotalTokens"], 20);
    assert_eq!(rows[1]["Date"], "2024-01-02");
    assert_eq!(rows[2]["Date"], "2024-01-03");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipping malformed JSON"));
    assert!(stderr.contains("api_requests.jsonl:3"));
}

#[test]
fn test_session_table_report() {
    let temp_dir = create_mock_claude_structure();
    ccstats(temp_dir.path())
        .arg("session")
        .arg("--path")
        .arg(temp_dir.path().join("projects"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Last Activity"))
        .stdout(predicate::str::contains("TOTAL"))
        .stdout(predicate::str::contains("$0.7620"));
}

#[test]
fn test_session_json_is_most_recent_first() {
    let temp_dir = create_mock_claude_structure();
    let output = ccstats(temp_dir.path())
        .args(["session", "--json", "--path"])
        .arg(temp_dir.path().join("projects"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let sessions: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["Session"].as_str().unwrap())
        .collect();
    assert_eq!(sessions, vec!["s3", "s2", "s1"]);
}

#[test]
fn test_date_filters_and_limit() {
    let temp_dir = create_mock_claude_structure();
    let output = ccstats(temp_dir.path())
        .args(["daily", "--json", "--since", "20240101", "--until", "20240103", "--limit", "1", "--path"])
        .arg(temp_dir.path().join("projects"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Date"], "2024-01-02");
}

#[test]
fn test_until_stops_at_midnight_of_named_day() {
    let temp_dir = create_mock_claude_structure();
    let output = ccstats(temp_dir.path())
        .args(["session", "--json", "--until", "20240103", "--path"])
        .arg(temp_dir.path().join("projects"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let sessions: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["Session"].as_str().unwrap())
        .collect();
    // s3's only record is at 09:00 on the 3rd, after the bound.
    assert_eq!(sessions, vec!["s2", "s1"]);
}

#[test]
fn test_empty_directory_is_clean_exit() {
    let temp_dir = TempDir::new().unwrap();
    ccstats(temp_dir.path())
        .arg("daily")
        .arg("--path")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No usage records found"));
}

#[test]
fn test_invalid_date_is_fatal() {
    let temp_dir = create_mock_claude_structure();
    ccstats(temp_dir.path())
        .args(["daily", "--since", "2024-01-01", "--path"])
        .arg(temp_dir.path().join("projects"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid since date"));
}

#[test]
fn test_missing_root_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    ccstats(temp_dir.path())
        .arg("session")
        .arg("--path")
        .arg(temp_dir.path().join("nope"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_default_path_comes_from_claude_home() {
    let temp_dir = create_mock_claude_structure();
    let output = ccstats(temp_dir.path())
        .env("CLAUDE_HOME", temp_dir.path())
        .args(["daily", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 3);
}
