//! Command-line surface of the demo binary
//!
//! Only paths that exit before the terminal is taken over are exercised here.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn demo() -> Command {
    Command::cargo_bin("autosuggest-demo").unwrap()
}

#[test]
fn test_help_lists_options() {
    demo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--suggestions"))
        .stdout(predicate::str::contains("--latency-ms"))
        .stdout(predicate::str::contains("--fuzzy"));
}

#[test]
fn test_version() {
    demo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("autosuggest-demo"));
}

#[test]
fn test_missing_suggestions_file_fails() {
    demo()
        .args(["--suggestions", "/nonexistent/suburbs.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read suggestions"));
}

#[test]
fn test_invalid_suggestions_file_fails() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[\"Mill Park\",").unwrap();

    demo()
        .arg("--suggestions")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid suggestions file"));
}

#[test]
fn test_non_array_suggestions_file_fails() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{\"items\": []}}").unwrap();

    demo()
        .arg("--suggestions")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid suggestions file"));
}

#[test]
fn test_invalid_config_fails() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[suggestions]\nmatch_mode = \"regex\"\n").unwrap();

    demo()
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_bad_latency_is_rejected() {
    demo()
        .args(["--latency-ms", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--latency-ms"));
}
