//! Output formatting for human and JSON modes
//!
//! Each report can be rendered either as human-readable text or as
//! machine-parseable JSON.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::config::MatchingConfig;
use crate::core::models::{Agent, AssignedTask, Task};
use crate::core::services::{
    DueReminders, MatchResult, NearestAgentResult, TaskMatchResult, WorkloadSnapshot,
};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Anything that can be printed in both modes
pub trait Render: Serialize {
    /// Human-readable text
    fn human(&self) -> String;

    /// Print in the requested mode
    fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => print!("{}", self.human()),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}

/// Ranked agents for one task
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRanking<'a> {
    /// Task being staffed
    pub task_id: &'a str,
    /// Candidates, best first
    pub candidates: Vec<MatchResult<'a>>,
}

impl Render for AgentRanking<'_> {
    fn human(&self) -> String {
        let mut out = String::new();
        if self.candidates.is_empty() {
            let _ = writeln!(out, "No eligible agents for task {}.", self.task_id);
            return out;
        }

        let _ = writeln!(out, "Candidates for task {}:\n", self.task_id.bold());
        for (rank, m) in self.candidates.iter().enumerate() {
            let mut flags = Vec::new();
            if m.is_overloaded {
                flags.push("overloaded".red().to_string());
            }
            if m.is_nearby {
                flags.push("nearby".green().to_string());
            }
            if m.is_locality_match {
                flags.push("local".cyan().to_string());
            }
            let _ = writeln!(
                out,
                "  {:>2}. {} ({})  {}  active {}  score {:.1}  {}",
                rank + 1,
                m.agent.id.bold(),
                agent_label(m.agent),
                distance_label(m.distance_km.map(|d| d.km())),
                m.workload.active,
                m.score.composite,
                flags.join(" ")
            );
        }
        out
    }
}

/// Ranked tasks for one agent
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRanking<'a> {
    /// Agent the tasks are ranked for
    pub agent_id: &'a str,
    /// Candidate tasks, best first
    pub tasks: Vec<TaskMatchResult<'a>>,
}

impl Render for TaskRanking<'_> {
    fn human(&self) -> String {
        let mut out = String::new();
        if self.tasks.is_empty() {
            let _ = writeln!(out, "No assignable tasks for agent {}.", self.agent_id);
            return out;
        }

        let _ = writeln!(out, "Assignable tasks for agent {}:\n", self.agent_id.bold());
        for (rank, m) in self.tasks.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:>2}. {} [{}] {}  {}",
                rank + 1,
                m.task.id.bold(),
                m.task.priority,
                task_region(m.task),
                distance_label(m.distance_km.map(|d| d.km()))
            );
        }
        out
    }
}

/// Nearest data collectors around one task
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestAgents<'a> {
    /// Task at the centre of the query
    pub task_id: &'a str,
    /// Agents, closest first
    pub agents: Vec<NearestAgentResult<'a>>,
}

impl Render for NearestAgents<'_> {
    fn human(&self) -> String {
        let mut out = String::new();
        if self.agents.is_empty() {
            let _ = writeln!(out, "No data collectors with a known location near task {}.", self.task_id);
            return out;
        }

        let _ = writeln!(out, "Nearest data collectors to task {}:\n", self.task_id.bold());
        for r in &self.agents {
            let freshness = if r.is_fresh {
                "live".green()
            } else {
                "stale".yellow()
            };
            let _ = writeln!(
                out,
                "  {} ({})  {}  ~{}  {}",
                r.agent.id.bold(),
                agent_label(r.agent),
                r.distance_km,
                r.estimated_arrival,
                freshness
            );
        }
        out
    }
}

/// Data collectors inside a search radius around one task
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyAgents<'a> {
    /// Task at the centre of the search
    pub task_id: &'a str,
    /// Radius applied
    pub radius_km: f64,
    /// Agents within the radius, in directory order
    pub agents: Vec<&'a Agent>,
}

impl Render for NearbyAgents<'_> {
    fn human(&self) -> String {
        let mut out = String::new();
        if self.agents.is_empty() {
            let _ = writeln!(
                out,
                "No data collectors within {:.1} km of task {}.",
                self.radius_km, self.task_id
            );
            return out;
        }

        let _ = writeln!(
            out,
            "Data collectors within {:.1} km of task {}:\n",
            self.radius_km,
            self.task_id.bold()
        );
        for agent in &self.agents {
            let _ = writeln!(out, "  {} ({})", agent.id.bold(), agent_label(agent));
        }
        out
    }
}

/// Workload and reminders for one agent
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadReport<'a> {
    /// Agent reported on
    pub agent_id: &'a str,
    /// Task counts
    pub workload: WorkloadSnapshot,
    /// Whether the active count meets the ceiling
    pub is_overloaded: bool,
    /// Upcoming and missed deadlines
    pub reminders: DueReminders<'a>,
}

impl Render for WorkloadReport<'_> {
    fn human(&self) -> String {
        let mut out = String::new();
        let w = &self.workload;
        let _ = writeln!(out, "Workload for agent {}:", self.agent_id.bold());
        let _ = writeln!(out, "  Active:    {}", w.active);
        let _ = writeln!(out, "  Pending:   {}", w.pending);
        let _ = writeln!(out, "  Completed: {}", w.completed);
        let _ = writeln!(out, "  Overdue:   {}", w.overdue);
        if self.is_overloaded {
            let _ = writeln!(out, "  {}", "OVERLOADED".red().bold());
        }
        for (label, tasks) in
            [("Overdue", &self.reminders.overdue), ("Due soon", &self.reminders.due_soon)]
        {
            if tasks.is_empty() {
                continue;
            }
            let _ = writeln!(out, "\n{label}:");
            for task in tasks {
                let _ = writeln!(out, "  {}  due {}", task.id, due_label(task.due_date));
            }
        }
        out
    }
}

/// Data collectors at or over the workload ceiling
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverloadedReport<'a> {
    /// Ceiling applied
    pub max_workload: usize,
    /// Agents with their active counts
    pub agents: Vec<OverloadedAgent<'a>>,
}

/// One overloaded agent
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverloadedAgent<'a> {
    /// The agent
    pub agent: &'a Agent,
    /// Its active task count
    pub active: usize,
}

impl Render for OverloadedReport<'_> {
    fn human(&self) -> String {
        let mut out = String::new();
        if self.agents.is_empty() {
            let _ = writeln!(out, "No data collectors at or above {} active tasks.", self.max_workload);
            return out;
        }
        let _ = writeln!(out, "Overloaded data collectors (>= {} active):\n", self.max_workload);
        for a in &self.agents {
            let _ = writeln!(out, "  {} ({})  active {}", a.agent.id.bold(), agent_label(a.agent), a.active);
        }
        out
    }
}

impl Render for AssignedTask {
    fn human(&self) -> String {
        format!(
            "{} task {} to agent {} (was {}, by {})\n",
            "Assigned".green().bold(),
            self.task_id,
            self.agent_id,
            self.previous_status,
            self.assigned_by
        )
    }
}

impl Render for MatchingConfig {
    fn human(&self) -> String {
        self.to_toml_string().unwrap_or_default()
    }
}

fn agent_label(agent: &Agent) -> String {
    if agent.name.is_empty() {
        agent.role.to_string()
    } else {
        format!("{}, {}", agent.name, agent.role)
    }
}

fn task_region(task: &Task) -> String {
    match (task.locality.as_deref(), task.state.as_deref()) {
        (Some(l), Some(s)) => format!("{l}, {s}"),
        (Some(x), None) | (None, Some(x)) => x.to_string(),
        (None, None) => String::new(),
    }
}

fn distance_label(km: Option<f64>) -> String {
    km.map_or_else(|| "distance unknown".dimmed().to_string(), |km| format!("{km:.1} km"))
}

fn due_label(due: Option<DateTime<Utc>>) -> String {
    due.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d %H:%M").to_string())
}
