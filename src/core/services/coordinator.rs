//! Assignment coordinator - the only component that mutates task state
//!
//! Validates preconditions against fresh reads, then relies on the store's
//! conditional write to decide races. No retries: a caller that loses a race
//! gets [`AssignmentError::TaskAlreadyAssigned`] and decides what to do.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::core::models::{AgentStatus, AssignedTask, TaskStatus};
use crate::core::ports::{AgentDirectory, AssignmentWrite, TaskStore};

/// Actor recorded when none is configured
pub const DEFAULT_ACTOR: &str = "system";

/// Why an assignment did not happen
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// No task with this ID
    #[error("task not found: {0}")]
    TaskNotFound(String),

    /// No agent with this ID
    #[error("agent not found: {0}")]
    AgentNotFound(String),

    /// The agent exists but may not receive work
    #[error("agent {agent_id} is not eligible for assignment (status: {status})")]
    AgentIneligible {
        /// Agent that was rejected
        agent_id: String,
        /// Its current status
        status: AgentStatus,
    },

    /// The task already has an assignee, or another writer won the race
    #[error("task {task_id} is already assigned{}", assignee_suffix(.assignee))]
    TaskAlreadyAssigned {
        /// Task that was contested
        task_id: String,
        /// Current assignee, when known
        assignee: Option<String>,
    },

    /// The task is in a status that can never be assigned
    #[error("task {task_id} cannot be assigned from status {status}")]
    TaskNotAssignable {
        /// Task that was rejected
        task_id: String,
        /// Its current status
        status: TaskStatus,
    },

    /// The store failed; nothing was written
    #[error("persistence error: {0}")]
    PersistenceError(String),
}

impl AssignmentError {
    /// Whether re-querying and retrying (possibly with another agent) may help
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::TaskAlreadyAssigned { .. } | Self::PersistenceError(_))
    }
}

fn assignee_suffix(assignee: &Option<String>) -> String {
    assignee.as_deref().map(|a| format!(" to {a}")).unwrap_or_default()
}

fn persistence(err: &anyhow::Error) -> AssignmentError {
    AssignmentError::PersistenceError(format!("{err:#}"))
}

/// Performs the `pending`/`permitVerified` → `assigned` transition
#[derive(Debug)]
pub struct AssignmentCoordinator<A, T> {
    agents: A,
    tasks: T,
    actor: String,
}

impl<A: AgentDirectory, T: TaskStore> AssignmentCoordinator<A, T> {
    /// Create a coordinator over an agent directory and a task store
    pub fn new(agents: A, tasks: T) -> Self {
        Self {
            agents,
            tasks,
            actor: DEFAULT_ACTOR.to_string(),
        }
    }

    /// Record `actor` as the `assignedBy` of every assignment
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = actor.into();
        self
    }

    /// Assign `task_id` to `agent_id`, stamped with the current time
    pub fn assign(&self, task_id: &str, agent_id: &str) -> Result<AssignedTask, AssignmentError> {
        self.assign_at(task_id, agent_id, Utc::now())
    }

    /// Assign `task_id` to `agent_id`, stamped with `at`
    pub fn assign_at(
        &self,
        task_id: &str,
        agent_id: &str,
        at: DateTime<Utc>,
    ) -> Result<AssignedTask, AssignmentError> {
        let task = self
            .tasks
            .task(task_id)
            .map_err(|e| persistence(&e))?
            .ok_or_else(|| AssignmentError::TaskNotFound(task_id.to_string()))?;

        if task.assigned_to.is_some() || task.status.is_active() {
            return Err(AssignmentError::TaskAlreadyAssigned {
                task_id: task_id.to_string(),
                assignee: task.assigned_to,
            });
        }
        if !task.status.is_assignable() {
            return Err(AssignmentError::TaskNotAssignable {
                task_id: task_id.to_string(),
                status: task.status,
            });
        }

        let agent = self
            .agents
            .agent(agent_id)
            .map_err(|e| persistence(&e))?
            .ok_or_else(|| AssignmentError::AgentNotFound(agent_id.to_string()))?;
        if !agent.is_active() {
            return Err(AssignmentError::AgentIneligible {
                agent_id: agent_id.to_string(),
                status: agent.status,
            });
        }

        let write = AssignmentWrite {
            task_id: task_id.to_string(),
            agent_id: agent_id.to_string(),
            assigned_by: self.actor.clone(),
            assigned_at: at,
        };

        if !self.tasks.assign_if_unassigned(&write).map_err(|e| persistence(&e))? {
            log::warn!("lost assignment race for task {task_id} (agent {agent_id})");
            return Err(AssignmentError::TaskAlreadyAssigned {
                task_id: task_id.to_string(),
                assignee: None,
            });
        }

        log::info!("assigned task {task_id} to agent {agent_id} by {}", self.actor);
        Ok(AssignedTask {
            task_id: write.task_id,
            agent_id: write.agent_id,
            assigned_by: write.assigned_by,
            assigned_at: write.assigned_at,
            previous_status: task.status,
        })
    }
}
