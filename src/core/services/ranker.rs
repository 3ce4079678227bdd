//! Candidate ranker - orders agents for a task and tasks for an agent
//!
//! Ranking is a pure pass over a caller-supplied snapshot. Results borrow
//! from the snapshot and must be recomputed whenever it changes.
//!
//! ## Agent ordering
//!
//! First differing criterion wins, ties keep input order:
//!
//! 1. Not overloaded before overloaded
//! 2. Nearby before not nearby
//! 3. Locality match before no match
//! 4. Closer before farther, unknown distance last

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::geo::{Distance, cmp_known_first, distance_between_opt};
use super::scorer::{MatchScore, is_locality_match, score_match};
use super::workload::{WorkloadIndex, WorkloadSnapshot};
use crate::config::MatchingConfig;
use crate::core::models::{Agent, AgentRole, Availability, Task};

/// An (agent, task) pairing with every derived ranking input
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult<'a> {
    /// The candidate agent
    pub agent: &'a Agent,
    /// The task being staffed
    #[serde(skip)]
    pub task: &'a Task,
    /// Distance from agent to site, `None` when either position is missing
    pub distance_km: Option<Distance>,
    /// The agent's current task counts
    pub workload: WorkloadSnapshot,
    /// Active workload at or above the ceiling
    pub is_overloaded: bool,
    /// Within the nearby threshold
    pub is_nearby: bool,
    /// Agent affiliation matches the task's state or locality
    pub is_locality_match: bool,
    /// Explanatory score, lower is better
    pub score: MatchScore,
}

/// A task ranked for a single agent
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMatchResult<'a> {
    /// The candidate task
    pub task: &'a Task,
    /// Distance from the agent, `None` when either position is missing
    pub distance_km: Option<Distance>,
    /// Within the nearby threshold
    pub is_nearby: bool,
}

/// Whether an agent may be ranked for field work at all
///
/// Requires a field role, an active account and a usable position.
#[must_use]
pub fn is_rankable_agent(agent: &Agent, config: &MatchingConfig) -> bool {
    agent.role.is_field_role()
        && agent.is_active()
        && agent.position().is_some()
        && !(config.exclude_offline && agent.availability == Availability::Offline)
}

/// Derive the match result for one pair
#[must_use]
pub fn build_match<'a>(
    agent: &'a Agent,
    task: &'a Task,
    workload: WorkloadSnapshot,
    config: &MatchingConfig,
) -> MatchResult<'a> {
    let distance_km = distance_between_opt(agent.position(), task.position());
    let is_locality_match = is_locality_match(agent, task);

    MatchResult {
        agent,
        task,
        distance_km,
        workload,
        is_overloaded: workload.is_overloaded(config.max_workload),
        is_nearby: is_within(distance_km, config.nearby_threshold_km),
        is_locality_match,
        score: score_match(distance_km, workload.active, is_locality_match, config),
    }
}

/// Multi-criteria comparator for agent candidates
#[must_use]
pub fn compare_matches(a: &MatchResult<'_>, b: &MatchResult<'_>) -> Ordering {
    a.is_overloaded
        .cmp(&b.is_overloaded)
        .then_with(|| b.is_nearby.cmp(&a.is_nearby))
        .then_with(|| b.is_locality_match.cmp(&a.is_locality_match))
        .then_with(|| cmp_known_first(a.distance_km, b.distance_km))
}

/// Rank eligible agents for `task`
///
/// `all_tasks` is the snapshot used to compute each agent's workload.
#[must_use]
pub fn rank_candidate_agents<'a>(
    task: &'a Task,
    agents: &'a [Agent],
    all_tasks: &[Task],
    now: DateTime<Utc>,
    config: &MatchingConfig,
) -> Vec<MatchResult<'a>> {
    let workloads = WorkloadIndex::build(all_tasks, now);

    let mut matches: Vec<MatchResult<'a>> = agents
        .iter()
        .filter(|agent| is_rankable_agent(agent, config))
        .map(|agent| build_match(agent, task, workloads.get(&agent.id), config))
        .collect();

    matches.sort_by(compare_matches);
    log::debug!("ranked {} of {} agents for task {}", matches.len(), agents.len(), task.id);
    matches
}

/// Re-sort results by composite score alone, lowest first
///
/// For callers that want a single-number ranking instead of the
/// multi-criteria order. Ties keep their current relative order.
pub fn rank_by_composite_score(matches: &mut [MatchResult<'_>]) {
    matches.sort_by(|a, b| a.score.composite.total_cmp(&b.score.composite));
}

/// Comparator for task candidates
///
/// Known distances first and ascending; among tasks with no distance,
/// higher priority first.
#[must_use]
pub fn compare_task_matches(a: &TaskMatchResult<'_>, b: &TaskMatchResult<'_>) -> Ordering {
    match (a.distance_km, b.distance_km) {
        (None, None) => b.task.priority.cmp(&a.task.priority),
        (x, y) => cmp_known_first(x, y),
    }
}

/// Rank assignable tasks (`pending` / `permitVerified`) for `agent`
#[must_use]
pub fn rank_candidate_tasks<'a>(
    agent: &Agent,
    tasks: &'a [Task],
    config: &MatchingConfig,
) -> Vec<TaskMatchResult<'a>> {
    let origin = agent.position();

    let mut ranked: Vec<TaskMatchResult<'a>> = tasks
        .iter()
        .filter(|t| t.status.is_assignable())
        .map(|task| {
            let distance_km = distance_between_opt(origin, task.position());
            TaskMatchResult {
                task,
                distance_km,
                is_nearby: is_within(distance_km, config.nearby_threshold_km),
            }
        })
        .collect();

    ranked.sort_by(compare_task_matches);
    ranked
}

/// Data collectors whose active workload meets the ceiling
#[must_use]
pub fn find_overloaded_agents<'a>(
    agents: &'a [Agent],
    tasks: &[Task],
    now: DateTime<Utc>,
    config: &MatchingConfig,
) -> Vec<&'a Agent> {
    let workloads = WorkloadIndex::build(tasks, now);
    agents
        .iter()
        .filter(|a| a.role == AgentRole::DataCollector)
        .filter(|a| workloads.get(&a.id).is_overloaded(config.max_workload))
        .collect()
}

/// Whether the agent is within `radius_km` of the task
///
/// False whenever either position is missing.
#[must_use]
pub fn is_agent_near_task(agent: &Agent, task: &Task, radius_km: f64) -> bool {
    is_within(distance_between_opt(agent.position(), task.position()), radius_km)
}

/// Data collectors within `radius_km` of the task, in input order
#[must_use]
pub fn find_nearby_agents<'a>(task: &Task, agents: &'a [Agent], radius_km: f64) -> Vec<&'a Agent> {
    agents
        .iter()
        .filter(|a| a.role == AgentRole::DataCollector)
        .filter(|a| is_agent_near_task(a, task, radius_km))
        .collect()
}

fn is_within(distance: Option<Distance>, threshold_km: f64) -> bool {
    distance.is_some_and(|d| d.km() <= threshold_km)
}
