//! Assign command tests
//!
//! Full cycle: rank, assign, re-assign refused, ranking reflects the change.

use std::process::{Command, Stdio};

use assert_cmd::cargo;
use predicates::prelude::*;

use super::{NOW, Workspace};

#[test]
fn test_assign_writes_snapshot() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["assign", "t1", "near", "--by", "dispatcher"])
        .assert()
        .success()
        .stdout(predicate::str::contains("task t1 to agent near"));

    let snapshot = ws.read();
    let task = snapshot["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["id"] == "t1")
        .unwrap()
        .clone();
    assert_eq!(task["status"], "assigned");
    assert_eq!(task["assignedTo"], "near");
    assert_eq!(task["assignedBy"], "dispatcher");
    assert_eq!(task["assignedAt"], "2025-06-01T12:00:00Z");
}

#[test]
fn test_assign_json_output() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["--json", "assign", "t2", "local"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["taskId"], "t2");
    assert_eq!(json["agentId"], "local");
    assert_eq!(json["assignedBy"], "system");
    assert_eq!(json["previousStatus"], "permitVerified");
}

#[test]
fn test_second_assign_exits_with_status_2() {
    let ws = Workspace::new();
    ws.cmd().args(["assign", "t1", "near"]).assert().success();

    ws.cmd()
        .args(["assign", "t1", "local"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("task t1 is already assigned to near"));

    assert_eq!(
        ws.read()["tasks"][0]["assignedTo"],
        "near",
        "losing attempt must not overwrite the winner"
    );
}

#[test]
fn test_assign_refusals_exit_with_status_2() {
    let ws = Workspace::new();
    for (task, agent, message) in [
        ("missing", "near", "task not found: missing"),
        ("t1", "ghost", "agent not found: ghost"),
        ("done", "near", "already assigned"),
    ] {
        ws.cmd()
            .args(["assign", task, agent])
            .assert()
            .code(2)
            .stderr(predicate::str::contains(message));
    }
}

#[test]
fn test_assigned_task_leaves_rank_tasks() {
    let ws = Workspace::new();
    ws.cmd().args(["assign", "t1", "near"]).assert().success();

    let output = ws.cmd().args(["--json", "rank-tasks", "near"]).output().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = json["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["task"]["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["t2"]);
}

#[test]
fn test_pinned_clock_is_recorded() {
    let ws = Workspace::new();
    ws.cmd().args(["assign", "t2", "busy"]).assert().success();
    assert_eq!(ws.read()["tasks"][1]["assignedAt"], NOW);
}

#[test]
fn test_concurrent_processes_have_one_winner() {
    let ws = Workspace::new();
    let children: Vec<_> = ["near", "local", "busy"]
        .iter()
        .map(|agent| {
            Command::new(cargo::cargo_bin!("fieldmatch"))
                .current_dir(ws.snapshot().parent().unwrap())
                .env_remove("FIELDMATCH_CONFIG")
                .env("NO_COLOR", "1")
                .args(["--now", NOW, "assign", "t1", agent])
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .unwrap()
        })
        .collect();

    let codes: Vec<i32> =
        children.into_iter().map(|mut c| c.wait().unwrap().code().unwrap()).collect();
    assert_eq!(codes.iter().filter(|c| **c == 0).count(), 1, "{codes:?}");
    assert!(codes.iter().all(|c| *c == 0 || *c == 2), "{codes:?}");

    let snapshot = ws.read();
    let winner = snapshot["tasks"][0]["assignedTo"].as_str().unwrap();
    assert!(["near", "local", "busy"].contains(&winner));
}
