//! Matching services
//!
//! Everything here except [`coordinator`] is pure: it operates on a
//! caller-supplied snapshot, performs no I/O, reads no clock and owns no
//! shared state, so any number of callers may run it concurrently.
//!
//! - [`geo`] - Great-circle distance and arrival estimates
//! - [`freshness`] - Location sample staleness
//! - [`workload`] - Per-agent task counts and due reminders
//! - [`scorer`] - Composite score for one (agent, task) pair
//! - [`ranker`] - Multi-criteria ordering of agents and tasks
//! - [`nearest`] - Proximity-only view of agents around a site
//! - [`coordinator`] - The single mutating operation: assignment

pub mod coordinator;
pub mod freshness;
pub mod geo;
pub mod nearest;
pub mod ranker;
pub mod scorer;
pub mod workload;

pub use coordinator::{AssignmentCoordinator, AssignmentError};
pub use freshness::{FreshnessPolicy, is_location_fresh};
pub use geo::{Distance, Eta, estimated_arrival, haversine};
pub use nearest::{NearestAgentResult, nearest_agents};
pub use ranker::{
    MatchResult, TaskMatchResult, find_nearby_agents, find_overloaded_agents, rank_by_composite_score,
    rank_candidate_agents, rank_candidate_tasks,
};
pub use scorer::{MatchScore, score_match};
pub use workload::{DueReminders, WorkloadSnapshot, compute_workload, due_reminders};
