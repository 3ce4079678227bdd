//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the matching core and the
//! systems that own agents and tasks.
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core depends only on these traits, never on concrete stores. Ranking
//! never touches them at all: callers fetch a snapshot and pass slices in.
//! Only the assignment coordinator writes, and only through
//! [`TaskStore::assign_if_unassigned`].

mod agent_directory;
mod task_store;

pub use agent_directory::AgentDirectory;
pub use task_store::{AssignmentWrite, TaskStore};

#[cfg(test)]
pub use agent_directory::MockAgentDirectory;
#[cfg(test)]
pub use task_store::MockTaskStore;
