//! Integration tests for CLI commands.
//!
//! These tests use `assert_cmd` against the offline catalog fixture so no
//! network access is needed:
//! - systems listing and catalog export
//! - fuzzy resolution and its failure output
//! - lookup failures and exit codes

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Path to the catalog fixture.
fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/systems.json")
}

/// CLI command pinned to the fixture catalog and isolated from the environment.
fn cli() -> Command {
    let mut cmd = Command::cargo_bin("passio-cli").expect("binary exists");
    cmd.env_remove("PASSIO_CATALOG")
        .env_remove("PASSIO_MIN_SCORE")
        .env_remove("PASSIO_TIMEOUT_SECS")
        .env_remove("PASSIO_BASE_URL")
        .env("NO_COLOR", "1")
        .arg("--catalog")
        .arg(fixture_path());
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("passio-cli")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("mcp"))
        .stdout(predicate::str::contains("route-stops"))
        .stdout(predicate::str::contains("vehicles"));
}

#[test]
fn test_systems_lists_catalog() {
    cli()
        .arg("systems")
        .assert()
        .success()
        .stdout(predicate::str::contains("University of Arkansas [1068]"))
        .stdout(predicate::str::contains("Tech Trolley Express [2001]"));
}

#[test]
fn test_systems_export_round_trips() {
    let temp = TempDir::new().expect("create temp dir");
    let exported = temp.path().join("catalog.json");

    cli()
        .args(["systems", "--output"])
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 5 systems"));

    let contents = fs::read_to_string(&exported).expect("export written");
    let value: serde_json::Value = serde_json::from_str(&contents).expect("valid JSON");
    assert_eq!(value.as_array().map(Vec::len), Some(5));

    // The export is itself a valid catalog.
    Command::cargo_bin("passio-cli")
        .expect("binary exists")
        .env("NO_COLOR", "1")
        .arg("--catalog")
        .arg(&exported)
        .args(["resolve", "Chapel Hil"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Chapel Hill Transit [3]"));
}

#[test]
fn test_resolve_near_miss() {
    cli()
        .args(["resolve", "Georgia Tec"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Georgia Tech [1083]"));
}

#[test]
fn test_resolve_json_output() {
    let output = cli()
        .args(["--format", "json", "resolve", "arkansas"])
        .output()
        .expect("command runs");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("JSON stdout");
    assert_eq!(value["name"], "University of Arkansas");
    assert_eq!(value["id"], "1068");
}

#[test]
fn test_resolve_unknown_system_fails() {
    cli()
        .args(["resolve", "Nonexistent University"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "no transportation system matches 'Nonexistent University'",
        ));
}

#[test]
fn test_min_score_zero_accepts_anything() {
    cli()
        .args(["--min-score", "0", "resolve", "Nonexistent University"])
        .assert()
        .success();
}

#[test]
fn test_invalid_min_score_is_rejected() {
    cli()
        .args(["--min-score", "2", "resolve", "Georgia Tech"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--min-score"));
}

#[test]
fn test_lookup_unknown_system_fails_before_network() {
    cli()
        .args(["--base-url", "http://127.0.0.1:9", "routes", "Nonexistent University"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "transportation system 'Nonexistent University' not found",
        ));
}

#[test]
fn test_lookup_reports_unreachable_provider() {
    cli()
        .args([
            "--base-url",
            "http://127.0.0.1:9",
            "--timeout",
            "5",
            "stops",
            "Georgia Tech",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_catalog_file_fails() {
    let temp = TempDir::new().expect("create temp dir");
    Command::cargo_bin("passio-cli")
        .expect("binary exists")
        .arg("--catalog")
        .arg(temp.path().join("missing.json"))
        .arg("systems")
        .assert()
        .failure()
        .stderr(predicate::str::contains("catalog"));
}
