//! Core domain logic for fieldmatch
//!
//! This module contains the matching engine with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Agent, Task, Coordinates, AssignedTask)
//! - `services/` - Distance, scoring, ranking and assignment logic
//! - `ports/` - Trait definitions for the agent directory and task store

pub mod models;
pub mod ports;
pub mod services;
