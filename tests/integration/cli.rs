//! Command-line smoke tests
//!
//! These tests run the genesis binary end to end with the simulated
//! generation service and zero latency.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a Command instance for the genesis binary, isolated in a temp dir
#[allow(deprecated)]
fn genesis_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("genesis").expect("Failed to find genesis binary");
    cmd.current_dir(dir.path())
        .env("WORKSPACE_DIR", dir.path())
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_constraints_for_known_platform() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    genesis_cmd(&temp_dir)
        .arg("constraints")
        .arg("TikTok")
        .assert()
        .success()
        .stdout(predicate::str::contains("9:16"))
        .stdout(predicate::str::contains("\"bottom\": \"20%\""));
}

#[test]
fn test_constraints_for_unknown_platform_is_neutral() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    genesis_cmd(&temp_dir)
        .arg("constraints")
        .arg("MySpace")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tone\": \"Neutral\""));
}

#[test]
fn test_run_prints_json_event_log() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let output = genesis_cmd(&temp_dir)
        .arg("run")
        .arg("--goal")
        .arg("Launch offer")
        .arg("--platform")
        .arg("TikTok")
        .arg("--persona")
        .arg("Streamer")
        .arg("--latency-ms")
        .arg("0")
        .arg("--json")
        .timeout(std::time::Duration::from_secs(10))
        .output()
        .expect("Failed to run genesis");

    assert!(output.status.success());
    let events: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    let events = events.as_array().expect("event log is an array");
    assert!(events.len() >= 6);
    assert_eq!(events[0]["message"], "Campaign assets ready for deployment.");
    assert!(events
        .iter()
        .any(|e| e["message"] == "Workflow built using flux_dev_fp8.safetensors. Cost: $0.04"));
}

#[test]
fn test_run_prints_cfo_report() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    genesis_cmd(&temp_dir)
        .arg("run")
        .arg("--latency-ms")
        .arg("0")
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .success()
        .stdout(predicate::str::contains("Campaign assets ready for deployment."))
        .stdout(predicate::str::contains("## CFO Report"));
}

#[test]
fn test_run_rejects_unknown_platform() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    genesis_cmd(&temp_dir)
        .arg("run")
        .arg("--platform")
        .arg("MySpace")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid platform"));
}

#[test]
fn test_config_reads_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(&config_path, "[budget]\nupsell_value = 120.0\n").expect("Failed to write config");

    genesis_cmd(&temp_dir)
        .arg("--config")
        .arg(&config_path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("upsell_value = 120.0"))
        .stdout(predicate::str::contains("baseline_hourly = 7.0"));
}

#[test]
fn test_config_env_override() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    genesis_cmd(&temp_dir)
        .env("GENESIS__SERVER__BIND", "0.0.0.0:9000")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("bind = \"0.0.0.0:9000\""));
}

#[test]
fn test_missing_config_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    genesis_cmd(&temp_dir)
        .arg("--config")
        .arg(temp_dir.path().join("absent.toml"))
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_negative_upsell_from_env_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    genesis_cmd(&temp_dir)
        .env("GENESIS__BUDGET__UPSELL_VALUE", "-75.0")
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("budget.upsell_value"));
}
