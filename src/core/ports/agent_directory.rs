//! Agent directory port
//!
//! Read access to the external agent directory.

use super::super::models::Agent;

/// Source of agent snapshots
///
/// Implementations read from whatever directory service owns agents
/// (a database, an API, a snapshot file).
#[cfg_attr(test, mockall::automock)]
pub trait AgentDirectory: Send + Sync {
    /// List every agent
    fn agents(&self) -> anyhow::Result<Vec<Agent>>;

    /// Look up one agent by ID
    fn agent(&self, id: &str) -> anyhow::Result<Option<Agent>> {
        Ok(self.agents()?.into_iter().find(|a| a.id == id))
    }
}

impl<T: AgentDirectory + ?Sized> AgentDirectory for &T {
    fn agents(&self) -> anyhow::Result<Vec<Agent>> {
        (**self).agents()
    }

    fn agent(&self, id: &str) -> anyhow::Result<Option<Agent>> {
        (**self).agent(id)
    }
}
