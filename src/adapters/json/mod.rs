//! JSON snapshot storage
//!
//! Implements `AgentDirectory` and `TaskStore` over a single JSON file
//! holding `{ "agents": [...], "tasks": [...] }`.

mod store;

pub use store::{JsonSnapshotStore, Snapshot};
