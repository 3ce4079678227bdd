//! Workload commands - per-agent counts and overloaded collectors

use fieldmatch::core::services::workload::active_workload;
use fieldmatch::core::services::{compute_workload, due_reminders, find_overloaded_agents};
use fieldmatch::output::{OverloadedAgent, OverloadedReport, Render, WorkloadReport};

use super::context::Context;

/// Show an agent's workload and due reminders
///
/// An agent that is unknown to the directory but holds tasks is still
/// reported; the counts come from the task list alone.
pub fn workload(ctx: &Context, agent_id: &str) -> anyhow::Result<()> {
    let snapshot = ctx.snapshot()?;
    if !snapshot.agents.iter().any(|a| a.id == agent_id) {
        log::warn!("agent {agent_id} is not in the snapshot directory");
    }

    let workload = compute_workload(agent_id, &snapshot.tasks, ctx.now);
    WorkloadReport {
        agent_id,
        workload,
        is_overloaded: workload.is_overloaded(ctx.config.max_workload),
        reminders: due_reminders(agent_id, &snapshot.tasks, ctx.now, ctx.config.due_soon_days),
    }
    .render(ctx.mode);
    Ok(())
}

/// List data collectors at or above the workload ceiling
pub fn overloaded(ctx: &Context) -> anyhow::Result<()> {
    let snapshot = ctx.snapshot()?;
    let agents = find_overloaded_agents(&snapshot.agents, &snapshot.tasks, ctx.now, &ctx.config)
        .into_iter()
        .map(|agent| OverloadedAgent {
            agent,
            active: active_workload(&agent.id, &snapshot.tasks),
        })
        .collect();

    OverloadedReport {
        max_workload: ctx.config.max_workload,
        agents,
    }
    .render(ctx.mode);
    Ok(())
}
