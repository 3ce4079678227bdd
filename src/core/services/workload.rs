//! Workload tracker - aggregates an agent's task counts from a snapshot
//!
//! This module contains pure aggregation logic with no I/O dependencies.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use crate::core::models::{Task, TaskStatus};

/// Task counts for one agent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkloadSnapshot {
    /// Tasks in `assigned` or `inProgress`
    pub active: usize,
    /// Tasks in `pending` or `permitVerified`
    pub pending: usize,
    /// Tasks in `completed`
    pub completed: usize,
    /// Tasks past their due date and not completed
    pub overdue: usize,
}

impl WorkloadSnapshot {
    /// Build a snapshot from externally reported counts
    ///
    /// Negative counts are an upstream anomaly; they are clamped to zero and
    /// logged rather than propagated.
    #[must_use]
    pub fn from_counts(active: i64, pending: i64, completed: i64, overdue: i64) -> Self {
        Self {
            active: clamp_count("active", active),
            pending: clamp_count("pending", pending),
            completed: clamp_count("completed", completed),
            overdue: clamp_count("overdue", overdue),
        }
    }

    /// Whether the active count meets or exceeds `max_workload`
    #[must_use]
    pub const fn is_overloaded(&self, max_workload: usize) -> bool {
        self.active >= max_workload
    }

    fn record(&mut self, task: &Task, now: DateTime<Utc>) {
        match task.status {
            TaskStatus::Assigned | TaskStatus::InProgress => self.active += 1,
            TaskStatus::Pending | TaskStatus::PermitVerified => self.pending += 1,
            TaskStatus::Completed => self.completed += 1,
            TaskStatus::Cancelled => {},
        }
        if task.is_overdue(now) {
            self.overdue += 1;
        }
    }
}

fn clamp_count(field: &str, value: i64) -> usize {
    usize::try_from(value).unwrap_or_else(|_| {
        if value < 0 {
            log::warn!("negative {field} workload count {value} clamped to 0");
            0
        } else {
            usize::MAX
        }
    })
}

/// Compute the workload of one agent over a task snapshot
///
/// An agent with no tasks gets all-zero counts.
#[must_use]
pub fn compute_workload(agent_id: &str, tasks: &[Task], now: DateTime<Utc>) -> WorkloadSnapshot {
    tasks.iter().filter(|t| t.is_assigned_to(agent_id)).fold(
        WorkloadSnapshot::default(),
        |mut snapshot, task| {
            snapshot.record(task, now);
            snapshot
        },
    )
}

/// Count of tasks in `assigned` or `inProgress` for one agent
#[must_use]
pub fn active_workload(agent_id: &str, tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.is_assigned_to(agent_id) && t.status.is_active()).count()
}

/// Workloads for every assignee in a snapshot, computed in one pass
#[derive(Debug, Clone, Default)]
pub struct WorkloadIndex {
    by_agent: HashMap<String, WorkloadSnapshot>,
}

impl WorkloadIndex {
    /// Index every assigned task in `tasks`
    #[must_use]
    pub fn build(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let mut by_agent: HashMap<String, WorkloadSnapshot> = HashMap::new();
        for task in tasks {
            if let Some(agent_id) = &task.assigned_to {
                by_agent.entry(agent_id.clone()).or_default().record(task, now);
            }
        }
        Self { by_agent }
    }

    /// Workload of `agent_id`, all zeros if it holds no tasks
    #[must_use]
    pub fn get(&self, agent_id: &str) -> WorkloadSnapshot {
        self.by_agent.get(agent_id).copied().unwrap_or_default()
    }
}

/// Upcoming and missed deadlines for one agent
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DueReminders<'a> {
    /// Due between now and the reminder window end
    pub due_soon: Vec<&'a Task>,
    /// Due date already passed
    pub overdue: Vec<&'a Task>,
}

/// Collect due-soon and overdue tasks held by `agent_id`
///
/// Only tasks the agent is still expected to work on are considered
/// (`assigned`, `permitVerified`, `inProgress`).
#[must_use]
pub fn due_reminders<'a>(
    agent_id: &str,
    tasks: &'a [Task],
    now: DateTime<Utc>,
    due_soon_days: u32,
) -> DueReminders<'a> {
    let window_end = now + TimeDelta::days(i64::from(due_soon_days));
    let mut reminders = DueReminders::default();

    for task in tasks.iter().filter(|t| t.is_assigned_to(agent_id)) {
        if !matches!(
            task.status,
            TaskStatus::Assigned | TaskStatus::PermitVerified | TaskStatus::InProgress
        ) {
            continue;
        }
        let Some(due) = task.due_date else { continue };
        if due < now {
            reminders.overdue.push(task);
        } else if due <= window_end {
            reminders.due_soon.push(task);
        }
    }
    reminders
}
