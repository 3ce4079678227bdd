//! Shared test fixtures and helpers
//!
//! Builders for agents, tasks and snapshots used across the unit tests.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use fieldmatch::core::models::{Agent, AgentRole, Task, TaskStatus};

/// Fixed evaluation instant so every test is deterministic
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// `now()` shifted by a number of minutes (negative = earlier)
pub fn minutes_from_now(minutes: i64) -> DateTime<Utc> {
    now() + TimeDelta::minutes(minutes)
}

/// An active data collector seen at `now()`
pub fn collector(id: &str, lat: f64, lon: f64) -> Agent {
    Agent::new(id, AgentRole::DataCollector).with_location(lat, lon, Some(now()))
}

/// An open site visit at the given coordinates
pub fn site(id: &str, lat: f64, lon: f64) -> Task {
    Task::new(id, TaskStatus::Pending).with_coordinates(lat, lon)
}

/// `n` tasks in `status` held by `agent`
pub fn held_tasks(agent: &str, status: TaskStatus, n: usize) -> Vec<Task> {
    (0..n)
        .map(|i| Task::new(format!("{agent}-{status}-{i}"), status).assigned_to(agent))
        .collect()
}
