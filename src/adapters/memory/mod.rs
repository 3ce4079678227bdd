//! In-memory store
//!
//! Implements `AgentDirectory` and `TaskStore` over mutex-guarded vectors.
//! The conditional write runs entirely under the task lock, which makes it
//! atomic for every caller sharing the same instance.

use std::sync::{Mutex, MutexGuard};

use crate::core::models::{Agent, Task};
use crate::core::ports::{AgentDirectory, AssignmentWrite, TaskStore};

/// Agent directory and task store held in process memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    agents: Mutex<Vec<Agent>>,
    tasks: Mutex<Vec<Task>>,
}

impl InMemoryStore {
    /// Create a store seeded with a snapshot
    #[must_use]
    pub const fn new(agents: Vec<Agent>, tasks: Vec<Task>) -> Self {
        Self {
            agents: Mutex::new(agents),
            tasks: Mutex::new(tasks),
        }
    }

    /// Insert or replace an agent
    pub fn upsert_agent(&self, agent: Agent) -> anyhow::Result<()> {
        let mut agents = lock(&self.agents)?;
        match agents.iter_mut().find(|a| a.id == agent.id) {
            Some(existing) => *existing = agent,
            None => agents.push(agent),
        }
        Ok(())
    }

    /// Insert or replace a task
    pub fn upsert_task(&self, task: Task) -> anyhow::Result<()> {
        let mut tasks = lock(&self.tasks)?;
        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => tasks.push(task),
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> anyhow::Result<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| anyhow::anyhow!("in-memory store lock poisoned"))
}

impl AgentDirectory for InMemoryStore {
    fn agents(&self) -> anyhow::Result<Vec<Agent>> {
        Ok(lock(&self.agents)?.clone())
    }

    fn agent(&self, id: &str) -> anyhow::Result<Option<Agent>> {
        Ok(lock(&self.agents)?.iter().find(|a| a.id == id).cloned())
    }
}

impl TaskStore for InMemoryStore {
    fn tasks(&self) -> anyhow::Result<Vec<Task>> {
        Ok(lock(&self.tasks)?.clone())
    }

    fn task(&self, id: &str) -> anyhow::Result<Option<Task>> {
        Ok(lock(&self.tasks)?.iter().find(|t| t.id == id).cloned())
    }

    fn assign_if_unassigned(&self, write: &AssignmentWrite) -> anyhow::Result<bool> {
        let mut tasks = lock(&self.tasks)?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == write.task_id) else {
            return Ok(false);
        };
        if !task.is_open_for_assignment() {
            return Ok(false);
        }
        task.apply_assignment(&write.agent_id, &write.assigned_by, write.assigned_at);
        Ok(true)
    }
}
