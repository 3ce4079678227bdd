//! Snapshot file store
//!
//! Reads are plain file loads. Writes hold an exclusive OS lock on a sidecar
//! `<snapshot>.lock` file, so the conditional write's read, check and replace
//! run as one step across threads and processes. The file is replaced through
//! a uniquely named temp file + rename so readers never see a half-written
//! snapshot.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::core::models::{Agent, Task};
use crate::core::ports::{AgentDirectory, AssignmentWrite, TaskStore};

/// On-disk snapshot layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Agent directory contents
    #[serde(default)]
    pub agents: Vec<Agent>,
    /// Task directory contents
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Snapshot-file backed agent directory and task store
#[derive(Debug, Clone)]
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Create a store for the snapshot at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the sidecar file writers lock
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    /// Load the whole snapshot
    pub fn load(&self) -> anyhow::Result<Snapshot> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            anyhow::anyhow!("failed to read snapshot {}: {e}", self.path.display())
        })?;
        let snapshot: Snapshot = serde_json::from_str(&content).map_err(|e| {
            anyhow::anyhow!("failed to parse snapshot {}: {e}", self.path.display())
        })?;
        log::debug!(
            "loaded {} agents and {} tasks from {}",
            snapshot.agents.len(),
            snapshot.tasks.len(),
            self.path.display()
        );
        Ok(snapshot)
    }

    /// Replace the snapshot on disk
    pub fn save(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let _lock = self.lock()?;
        self.replace(snapshot)
    }

    /// Take the exclusive writer lock, released when the handle drops
    fn lock(&self) -> anyhow::Result<File> {
        self.ensure_parent()?;
        let path = self.lock_path();
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| anyhow::anyhow!("failed to open lock file {}: {e}", path.display()))?;
        file.lock_exclusive()
            .map_err(|e| anyhow::anyhow!("failed to lock {}: {e}", path.display()))?;
        log::trace!("locked {}", path.display());
        Ok(file)
    }

    /// Write through a temp file in the same directory, then rename over the
    /// snapshot. The temp file is removed if anything before the rename fails.
    fn replace(&self, snapshot: &Snapshot) -> anyhow::Result<()> {
        let dir = self.ensure_parent()?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(snapshot)?.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn ensure_parent(&self) -> anyhow::Result<&Path> {
        match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                Ok(parent)
            },
            None => Ok(Path::new(".")),
        }
    }
}

impl AgentDirectory for JsonSnapshotStore {
    fn agents(&self) -> anyhow::Result<Vec<Agent>> {
        Ok(self.load()?.agents)
    }
}

impl TaskStore for JsonSnapshotStore {
    fn tasks(&self) -> anyhow::Result<Vec<Task>> {
        Ok(self.load()?.tasks)
    }

    fn assign_if_unassigned(&self, write: &AssignmentWrite) -> anyhow::Result<bool> {
        let _lock = self.lock()?;

        let mut snapshot = self.load()?;
        let Some(task) = snapshot.tasks.iter_mut().find(|t| t.id == write.task_id) else {
            return Ok(false);
        };
        if !task.is_open_for_assignment() {
            return Ok(false);
        }
        task.apply_assignment(&write.agent_id, &write.assigned_by, write.assigned_at);
        self.replace(&snapshot)?;
        Ok(true)
    }
}
