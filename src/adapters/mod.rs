//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle storage:
//!
//! - `memory/` - Mutex-guarded in-process store (embedding, tests)
//! - `json/` - JSON snapshot file store (used by the CLI)

pub mod json;
pub mod memory;

pub use json::{JsonSnapshotStore, Snapshot};
pub use memory::InMemoryStore;
