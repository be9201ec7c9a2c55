//! Integration tests for the cmmc-query CLI
//!
//! Every test runs the real binary against the shipped catalog with a
//! throwaway home directory and bridge file.


use assert_cmd::cargo;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Helper to create a cmmc-query command isolated under `home`
fn cmmc_query(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("cmmc-query"));
    cmd.env("HOME", home)
        .env("RUST_LOG", "warn")
        .arg("--data-dir")
        .arg(data_dir())
        .arg("--bridge")
        .arg(home.join("bridge.json"));
    cmd
}

fn data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

// =============================================================================
// TOOL LISTING
// =============================================================================

#[test]
fn test_tools_json() {
    let home = TempDir::new().unwrap();
    cmmc_query(home.path())
        .args(["tools", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"get_control_info\""))
        .stdout(predicate::str::contains("\"write_assessment_bridge\""))
        .stdout(predicate::str::contains("inputSchema"));
}

#[test]
fn test_tools_human() {
    let home = TempDir::new().unwrap();
    cmmc_query(home.path())
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::contains("calculate_sprs_impact"));
}

// =============================================================================
// CALL
// =============================================================================

#[test]
fn test_call_control_info() {
    let home = TempDir::new().unwrap();
    cmmc_query(home.path())
        .args(["call", "get_control_info", "--json", "-p", r#"{"controlId":"3.1.1"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\":true"))
        .stdout(predicate::str::contains("\"objectiveCount\":6"));
}

#[test]
fn test_call_rev3_alias() {
    let home = TempDir::new().unwrap();
    cmmc_query(home.path())
        .args([
            "call",
            "get_control_info",
            "--json",
            "--params",
            r#"{"controlId":"03.01.01","revision":"rev3"}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"revision\":\"r3\""));
}

#[test]
fn test_call_unknown_tool_fails() {
    let home = TempDir::new().unwrap();
    cmmc_query(home.path())
        .args(["call", "get_everything", "--json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("UNKNOWN_TOOL"));
}

#[test]
fn test_call_not_found_succeeds() {
    let home = TempDir::new().unwrap();
    cmmc_query(home.path())
        .args(["call", "get_crosswalk", "--json", "-p", r#"{"rev2Id":"9.9.9"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"found\":false"));
}

#[test]
fn test_call_invalid_params_fails() {
    let home = TempDir::new().unwrap();
    cmmc_query(home.path())
        .args(["call", "get_control_info", "-p", "{controlId"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--params must be a JSON object"));
}

#[test]
fn test_call_human_error_on_stderr() {
    let home = TempDir::new().unwrap();
    cmmc_query(home.path())
        .args(["call", "list_families", "-p", r#"{"revision":"r9"}"#])
        .assert()
        .failure()
        .stderr(predicate::str::contains("list_families"));
}

#[test]
fn test_sprs_impact() {
    let home = TempDir::new().unwrap();
    cmmc_query(home.path())
        .args(["call", "calculate_sprs_impact", "--json", "-p", r#"{"notMet":"3.1.1, 3.5.3"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"score\":100"))
        .stdout(predicate::str::contains("cannot be deferred"));
}

// =============================================================================
// SERVE
// =============================================================================

#[test]
fn test_serve_answers_each_line() {
    let home = TempDir::new().unwrap();
    let input = concat!(
        r#"{"tool":"get_sprs_score_info","params":{"controlId":"3.5.3"}}"#,
        "\n\n",
        "garbage\n",
        r#"{"tool":"list_families","params":{"revision":"r3"}}"#,
        "\n",
    );

    let output = cmmc_query(home.path()).arg("serve").write_stdin(input).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("\"neverDeferrable\":true"));
    assert!(lines[1].contains("BAD_REQUEST"));
    assert!(lines[2].contains("\"revision\":\"r3\""));
}

// =============================================================================
// STATS / VERSION
// =============================================================================

#[test]
fn test_stats_json() {
    let home = TempDir::new().unwrap();
    cmmc_query(home.path())
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sourcesLoaded\": 6"))
        .stdout(predicate::str::contains("bridge.json"));
}

#[test]
fn test_stats_lists_rejected_source() {
    let home = TempDir::new().unwrap();
    let data = TempDir::new().unwrap();
    std::fs::write(data.path().join("10-broken.toml"), "families_r2 = [[[").unwrap();

    assert_cmd::Command::new(cargo::cargo_bin!("cmmc-query"))
        .env("HOME", home.path())
        .arg("--data-dir")
        .arg(data.path())
        .args(["stats", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sourcesLoaded\": 0"))
        .stdout(predicate::str::contains("10-broken.toml"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    cmmc_query(home.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_data_dir_still_answers() {
    let home = TempDir::new().unwrap();
    assert_cmd::Command::new(cargo::cargo_bin!("cmmc-query"))
        .env("HOME", home.path())
        .args(["call", "get_sprs_score_info", "--json", "-p", r#"{"controlId":"3.1.1"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"points\":5"));
}
