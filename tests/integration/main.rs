//! Integration tests for the fieldmatch CLI
//!
//! These tests run the binary against a snapshot file in a temp directory,
//! covering the read-only queries and the full assign cycle.

mod assign_test;

use assert_cmd::cargo;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Evaluation instant passed to every command
pub const NOW: &str = "2025-06-01T12:00:00Z";

/// Helper function to create a fieldmatch command
pub fn fieldmatch() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("fieldmatch"));
    cmd.env_remove("FIELDMATCH_CONFIG").env("NO_COLOR", "1");
    cmd
}

/// A temp directory holding `fieldmatch.json`
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Seed the standard snapshot
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("fieldmatch.json"), SNAPSHOT).unwrap();
        Self { dir }
    }

    /// Snapshot path
    pub fn snapshot(&self) -> PathBuf {
        self.dir.path().join("fieldmatch.json")
    }

    /// Command running inside the workspace with a pinned clock
    pub fn cmd(&self) -> assert_cmd::Command {
        let mut cmd = fieldmatch();
        cmd.current_dir(self.dir.path()).args(["--now", NOW]);
        cmd
    }

    /// Parsed snapshot contents
    pub fn read(&self) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(self.snapshot()).unwrap()).unwrap()
    }
}

/// Two collectors near Khartoum, one far away and overloaded, one coordinator
const SNAPSHOT: &str = r#"{
  "agents": [
    { "id": "near", "name": "Near", "role": "dataCollector",
      "location": { "latitude": 15.6000, "longitude": 32.5300, "lastUpdated": "2025-06-01T11:45:00Z" } },
    { "id": "local", "name": "Local", "role": "data_collector", "stateId": "Khartoum",
      "location": { "latitude": 15.7000, "longitude": 32.5300, "lastUpdated": "2025-06-01T10:00:00Z" } },
    { "id": "busy", "name": "Busy", "role": "DataCollector",
      "location": { "latitude": 15.6240, "longitude": 32.5340, "lastUpdated": "2025-06-01T11:59:00Z" } },
    { "id": "boss", "name": "Boss", "role": "coordinator" }
  ],
  "tasks": [
    { "id": "t1", "name": "Bahri clinic", "state": "Khartoum", "status": "pending", "priority": "high",
      "coordinates": { "latitude": 15.6245, "longitude": 32.5342 } },
    { "id": "t2", "name": "Remote well", "status": "permitVerified", "priority": "low" },
    { "id": "done", "status": "completed", "assignedTo": "near", "dueDate": "2025-05-01T00:00:00Z" },
    { "id": "b1", "status": "assigned", "assignedTo": "busy" },
    { "id": "b2", "status": "inProgress", "assignedTo": "busy", "dueDate": "2025-05-30T00:00:00Z" }
  ]
}"#;

// =============================================================================
// BASICS
// =============================================================================

#[test]
fn test_version() {
    fieldmatch()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fieldmatch v"));
}

#[test]
fn test_missing_snapshot_fails_with_status_1() {
    let dir = TempDir::new().unwrap();
    fieldmatch()
        .current_dir(dir.path())
        .args(["rank-agents", "t1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read snapshot"));
}

#[test]
fn test_unknown_task_fails() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["rank-agents", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("task not found: nope"));
}

#[test]
fn test_config_prints_defaults() {
    let ws = Workspace::new();
    ws.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("[matching]"))
        .stdout(predicate::str::contains("max_workload = 20"));
}

#[test]
fn test_config_file_overrides() {
    let ws = Workspace::new();
    let path = ws.dir.path().join("tuned.toml");
    fs::write(&path, "[matching]\nmax_workload = 2\n").unwrap();

    let output = ws
        .cmd()
        .args(["--json", "--config"])
        .arg(&path)
        .arg("overloaded")
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["maxWorkload"], 2);
    assert_eq!(json["agents"][0]["agent"]["id"], "busy");
    assert_eq!(json["agents"][0]["active"], 2);
}

// =============================================================================
// QUERIES
// =============================================================================

#[test]
fn test_rank_agents_json() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["--json", "rank-agents", "t1"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = json["candidates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["agent"]["id"].as_str().unwrap())
        .collect();
    // coordinator has no location; all three collectors are nearby
    assert_eq!(ids, vec!["local", "busy", "near"]);
    assert_eq!(json["candidates"][0]["isLocalityMatch"], true);
    assert!(json["candidates"][0]["score"]["composite"].is_number());
}

#[test]
fn test_rank_agents_human() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["rank-agents", "t1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Candidates for task t1"))
        .stdout(predicate::str::contains("local"));
}

#[test]
fn test_rank_tasks_puts_located_task_first() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["--json", "rank-tasks", "near"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tasks"][0]["task"]["id"], "t1");
    assert_eq!(json["tasks"][0]["isNearby"], true);
    assert_eq!(json["tasks"][1]["task"]["id"], "t2");
    assert!(json["tasks"][1]["distanceKm"].is_null());
}

#[test]
fn test_nearest_limit_and_freshness() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["--json", "nearest", "t1", "-n", "2"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let agents = json["agents"].as_array().unwrap();
    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0]["agent"]["id"], "busy");
    assert_eq!(agents[0]["isFresh"], true);
    assert_eq!(agents[1]["agent"]["id"], "near");
}

#[test]
fn test_nearest_rejects_zero_limit() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["nearest", "t1", "-n", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("limit must be at least 1"));
}

fn nearby_ids(output: &std::process::Output) -> Vec<String> {
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    json["agents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_nearby_uses_configured_radius() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["--json", "nearby", "t1"]).output().unwrap();
    assert_eq!(nearby_ids(&output), vec!["near", "local", "busy"]);

    let path = ws.dir.path().join("tight.toml");
    fs::write(&path, "[matching]\nsearch_radius_km = 1.0\n").unwrap();
    let output = ws
        .cmd()
        .args(["--json", "--config"])
        .arg(&path)
        .args(["nearby", "t1"])
        .output()
        .unwrap();
    assert_eq!(nearby_ids(&output), vec!["busy"]);
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["radiusKm"], 1.0);
}

#[test]
fn test_nearby_radius_flag_overrides_config() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["--json", "nearby", "t1", "--radius", "5"]).output().unwrap();
    assert_eq!(nearby_ids(&output), vec!["near", "busy"]);

    ws.cmd()
        .args(["nearby", "t1", "--radius=-1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("radius must be a non-negative"));
}

#[test]
fn test_nearby_task_without_coordinates_is_empty() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["nearby", "t2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data collectors within 30.0 km of task t2"));
}

#[test]
fn test_workload_reports_overdue() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["workload", "busy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Active:    2"))
        .stdout(predicate::str::contains("Overdue:   1"))
        .stdout(predicate::str::contains("b2"));
}

#[test]
fn test_completed_past_due_not_overdue() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["--json", "workload", "near"]).output().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["workload"]["completed"], 1);
    assert_eq!(json["workload"]["overdue"], 0);
}
