//! Assign command - the only command that writes the snapshot

use fieldmatch::core::services::AssignmentCoordinator;
use fieldmatch::output::Render;

use super::context::Context;

/// Assign a task to an agent
///
/// Failures surface as `AssignmentError` so `main` can pick the exit code.
pub fn assign(ctx: &Context, task_id: &str, agent_id: &str, assigned_by: &str) -> anyhow::Result<()> {
    let coordinator = AssignmentCoordinator::new(&ctx.store, &ctx.store).with_actor(assigned_by);
    let assigned = coordinator.assign_at(task_id, agent_id, ctx.now)?;
    assigned.render(ctx.mode);
    Ok(())
}
