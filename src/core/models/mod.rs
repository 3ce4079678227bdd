//! Domain models for fieldmatch
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Agent`] - A field worker with a role, status and last known position
//! - [`Task`] - A site visit with a target location and lifecycle status
//! - [`Coordinates`] - A validated latitude/longitude pair
//! - [`AssignedTask`] - The outcome of a successful assignment

mod agent;
mod assignment;
mod task;

pub use agent::{Agent, AgentRole, AgentStatus, Availability, Location};
pub use assignment::AssignedTask;
pub use task::{Coordinates, Priority, Task, TaskStatus};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Errors raised when an enumerated field cannot be parsed from a string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unknown agent status
    #[error("invalid agent status: {0}. Use: active, inactive")]
    AgentStatus(String),

    /// Unknown availability
    #[error("invalid availability: {0}. Use: online, busy, offline")]
    Availability(String),

    /// Unknown task status
    #[error(
        "invalid task status: {0}. Use: pending, permitVerified, assigned, inProgress, completed, cancelled"
    )]
    TaskStatus(String),

    /// Unknown priority
    #[error("invalid priority: {0}. Use: low, medium, high")]
    Priority(String),
}

/// Reduce a label to lowercase alphanumerics so `In-Progress`, `in_progress`
/// and `inProgress` all compare equal.
pub(crate) fn canonical(raw: &str) -> String {
    raw.chars().filter(|c| c.is_alphanumeric()).flat_map(char::to_lowercase).collect()
}

/// Read a coordinate component leniently
///
/// Null, missing or non-numeric values become NaN, which position validation
/// then treats as an absent location rather than a load failure.
pub(crate) fn lenient_degrees<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(serde_json::Value::as_f64).unwrap_or(f64::NAN))
}

/// Default for a coordinate component missing from the record
pub(crate) const fn unknown_degrees() -> f64 {
    f64::NAN
}
