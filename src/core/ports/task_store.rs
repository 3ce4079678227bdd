//! Task store port
//!
//! Read access to site visits plus the one conditional write the
//! assignment coordinator relies on.

use chrono::{DateTime, Utc};

use super::super::models::Task;

/// The fields written when a task is assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentWrite {
    /// Task to update
    pub task_id: String,
    /// New assignee
    pub agent_id: String,
    /// Actor performing the assignment
    pub assigned_by: String,
    /// Timestamp recorded on the task
    pub assigned_at: DateTime<Utc>,
}

/// Storage backend for site visits
///
/// `assign_if_unassigned` must be atomic with respect to every other writer
/// of the same store: of any number of concurrent calls for one task, at most
/// one may return `Ok(true)`.
#[cfg_attr(test, mockall::automock)]
pub trait TaskStore: Send + Sync {
    /// List every task
    fn tasks(&self) -> anyhow::Result<Vec<Task>>;

    /// Look up one task by ID
    fn task(&self, id: &str) -> anyhow::Result<Option<Task>> {
        Ok(self.tasks()?.into_iter().find(|t| t.id == id))
    }

    /// Set assignee and status to `assigned` iff the task is currently
    /// unassigned and `pending` or `permitVerified`
    ///
    /// Returns whether the write took effect. An error means nothing was
    /// written.
    fn assign_if_unassigned(&self, write: &AssignmentWrite) -> anyhow::Result<bool>;
}

impl<T: TaskStore + ?Sized> TaskStore for &T {
    fn tasks(&self) -> anyhow::Result<Vec<Task>> {
        (**self).tasks()
    }

    fn task(&self, id: &str) -> anyhow::Result<Option<Task>> {
        (**self).task(id)
    }

    fn assign_if_unassigned(&self, write: &AssignmentWrite) -> anyhow::Result<bool> {
        (**self).assign_if_unassigned(write)
    }
}
