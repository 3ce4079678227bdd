//! Assignment outcome
//!
//! Returned by the coordinator when a task has been handed to an agent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TaskStatus;

/// Record of a successful assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedTask {
    /// The task that was assigned
    pub task_id: String,

    /// The agent now responsible for it
    pub agent_id: String,

    /// Who performed the assignment
    pub assigned_by: String,

    /// When the assignment took effect
    pub assigned_at: DateTime<Utc>,

    /// Status the task had before it moved to `assigned`
    pub previous_status: TaskStatus,
}
