//! Command implementations

mod assign;
mod context;
mod nearest;
mod rank;
mod show_config;
mod workload;

pub use assign::assign;
pub use context::Context;
pub use nearest::{nearby, nearest};
pub use rank::{rank_agents, rank_tasks};
pub use show_config::show_config;
pub use workload::{overloaded, workload};
