//! Nearest-agent query - pure proximity view of data collectors around a site
//!
//! Ordering is by distance only. Workload and overload are deliberately
//! ignored here; use the ranker for staffing decisions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::freshness::FreshnessPolicy;
use super::geo::{Distance, Eta, distance_between, estimated_arrival};
use crate::config::MatchingConfig;
use crate::core::models::{Agent, AgentRole, Task};

/// One data collector near a site
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestAgentResult<'a> {
    /// The agent
    pub agent: &'a Agent,
    /// Distance to the site
    pub distance_km: Distance,
    /// Travel time at the configured average speed
    pub estimated_arrival: Eta,
    /// Whether the position sample is recent enough to trust
    pub is_fresh: bool,
    /// When the position sample was taken
    pub last_location_update: Option<DateTime<Utc>>,
}

/// Up to `max_results` active data collectors closest to `task`
///
/// Returns an empty list when the task has no usable coordinates or no
/// eligible agent has a position.
#[must_use]
pub fn nearest_agents<'a>(
    task: &Task,
    agents: &'a [Agent],
    max_results: usize,
    now: DateTime<Utc>,
    config: &MatchingConfig,
) -> Vec<NearestAgentResult<'a>> {
    let Some(site) = task.position() else {
        log::debug!("task {} has no coordinates, no nearest agents", task.id);
        return Vec::new();
    };
    let freshness = FreshnessPolicy::new(config.freshness_threshold_minutes);

    let mut results: Vec<NearestAgentResult<'a>> = agents
        .iter()
        .filter(|a| a.role == AgentRole::DataCollector && a.is_active())
        .filter_map(|agent| {
            let distance_km = distance_between(agent.position()?, site);
            let last_location_update = agent.last_location_update();
            Some(NearestAgentResult {
                agent,
                distance_km,
                estimated_arrival: estimated_arrival(distance_km, config.average_speed_kmh),
                is_fresh: freshness.is_fresh(last_location_update, now),
                last_location_update,
            })
        })
        .collect();

    results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    results.truncate(max_results);
    results
}
