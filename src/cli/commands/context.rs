//! Shared state for every command that reads the snapshot

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, Utc};

use fieldmatch::adapters::{JsonSnapshotStore, Snapshot};
use fieldmatch::config::MatchingConfig;
use fieldmatch::core::models::{Agent, Task};
use fieldmatch::output::OutputMode;
use fieldmatch::paths;

/// Resolved configuration, store and evaluation instant
#[derive(Debug)]
pub struct Context {
    /// Effective matching configuration
    pub config: MatchingConfig,
    /// Snapshot file store
    pub store: JsonSnapshotStore,
    /// Instant used for freshness, overdue and assignment stamps
    pub now: DateTime<Utc>,
    /// Requested output mode
    pub mode: OutputMode,
}

impl Context {
    /// Resolve config and snapshot location
    pub fn load(
        snapshot: Option<PathBuf>,
        config: Option<&Path>,
        now: Option<DateTime<Utc>>,
        mode: OutputMode,
    ) -> anyhow::Result<Self> {
        let config = MatchingConfig::load(config)?;
        let store = JsonSnapshotStore::new(snapshot.unwrap_or_else(paths::default_snapshot));
        Ok(Self {
            config,
            store,
            now: now.unwrap_or_else(Utc::now),
            mode,
        })
    }

    /// Read the current snapshot
    pub fn snapshot(&self) -> anyhow::Result<Snapshot> {
        self.store.load()
    }
}

/// Find a task in a loaded snapshot
pub fn find_task<'a>(snapshot: &'a Snapshot, task_id: &str) -> anyhow::Result<&'a Task> {
    snapshot
        .tasks
        .iter()
        .find(|t| t.id == task_id)
        .with_context(|| format!("task not found: {task_id}"))
}

/// Find an agent in a loaded snapshot
pub fn find_agent<'a>(snapshot: &'a Snapshot, agent_id: &str) -> anyhow::Result<&'a Agent> {
    snapshot
        .agents
        .iter()
        .find(|a| a.id == agent_id)
        .with_context(|| format!("agent not found: {agent_id}"))
}
