//! Match scorer - single-number score for an (agent, task) pair
//!
//! Lower is better. The score is explanatory: the default ordering is the
//! multi-criteria comparator in [`super::ranker`], not this number.

use serde::Serialize;

use super::geo::Distance;
use crate::config::MatchingConfig;
use crate::core::models::{Agent, Task};

/// Kilometres per distance point
const KM_PER_POINT: f64 = 5.0;

/// Active tasks per workload point
const TASKS_PER_POINT: f64 = 2.0;

/// Cap on the distance and workload components
pub const MAX_COMPONENT_SCORE: f64 = 10.0;

/// Bonus (negative) for a locality match
pub const LOCALITY_BONUS: f64 = -5.0;

/// Penalty for an overloaded agent
pub const OVERLOAD_PENALTY: f64 = 20.0;

/// Score breakdown for one pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    /// `min(km / 5, 10)`; unknown distance scores the cap
    pub distance_score: f64,
    /// `min(active / 2, 10)`
    pub workload_score: f64,
    /// `-5` on locality match, else `0`
    pub locality_bonus: f64,
    /// `20` when overloaded, else `0`
    pub overload_penalty: f64,
    /// Sum of the four components
    pub composite: f64,
}

/// Score a pair from its derived inputs
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_match(
    distance: Option<Distance>,
    active_workload: usize,
    locality_match: bool,
    config: &MatchingConfig,
) -> MatchScore {
    let distance_score =
        distance.map_or(MAX_COMPONENT_SCORE, |d| (d.km() / KM_PER_POINT).min(MAX_COMPONENT_SCORE));
    let workload_score = (active_workload as f64 / TASKS_PER_POINT).min(MAX_COMPONENT_SCORE);
    let locality_bonus = if locality_match { LOCALITY_BONUS } else { 0.0 };
    let overload_penalty = if active_workload >= config.max_workload {
        OVERLOAD_PENALTY
    } else {
        0.0
    };

    MatchScore {
        distance_score,
        workload_score,
        locality_bonus,
        overload_penalty,
        composite: distance_score + workload_score + locality_bonus + overload_penalty,
    }
}

/// Whether the agent's affiliation matches the task's state or locality
///
/// Both sides must carry the label; comparison ignores case and surrounding
/// whitespace.
#[must_use]
pub fn is_locality_match(agent: &Agent, task: &Task) -> bool {
    labels_match(agent.state_id.as_deref(), task.state.as_deref())
        || labels_match(agent.locality_id.as_deref(), task.locality.as_deref())
}

fn labels_match(a: Option<&str>, b: Option<&str>) -> bool {
    match (a.map(str::trim), b.map(str::trim)) {
        (Some(a), Some(b)) if !a.is_empty() => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}
