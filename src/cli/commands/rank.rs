//! Rank commands - agents for a task, tasks for an agent

use fieldmatch::core::services::{rank_by_composite_score, rank_candidate_agents, rank_candidate_tasks};
use fieldmatch::output::{AgentRanking, Render, TaskRanking};

use super::context::{Context, find_agent, find_task};

/// Rank eligible agents for a task
pub fn rank_agents(ctx: &Context, task_id: &str, by_score: bool) -> anyhow::Result<()> {
    let snapshot = ctx.snapshot()?;
    let task = find_task(&snapshot, task_id)?;

    let mut candidates =
        rank_candidate_agents(task, &snapshot.agents, &snapshot.tasks, ctx.now, &ctx.config);
    if by_score {
        rank_by_composite_score(&mut candidates);
    }

    AgentRanking {
        task_id,
        candidates,
    }
    .render(ctx.mode);
    Ok(())
}

/// Rank assignable tasks for an agent
pub fn rank_tasks(ctx: &Context, agent_id: &str) -> anyhow::Result<()> {
    let snapshot = ctx.snapshot()?;
    let agent = find_agent(&snapshot, agent_id)?;

    TaskRanking {
        agent_id,
        tasks: rank_candidate_tasks(agent, &snapshot.tasks, &ctx.config),
    }
    .render(ctx.mode);
    Ok(())
}
