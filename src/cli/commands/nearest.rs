//! Nearest and nearby commands - data collectors around a site

use fieldmatch::core::services::{find_nearby_agents, nearest_agents};
use fieldmatch::output::{NearbyAgents, NearestAgents, Render};

use super::context::{Context, find_task};

/// List the data collectors closest to a task
pub fn nearest(ctx: &Context, task_id: &str, limit: Option<usize>) -> anyhow::Result<()> {
    let max_results = limit.unwrap_or(ctx.config.max_results);
    if max_results == 0 {
        anyhow::bail!("limit must be at least 1");
    }

    let snapshot = ctx.snapshot()?;
    let task = find_task(&snapshot, task_id)?;

    NearestAgents {
        task_id,
        agents: nearest_agents(task, &snapshot.agents, max_results, ctx.now, &ctx.config),
    }
    .render(ctx.mode);
    Ok(())
}

/// List the data collectors within `radius` km of a task
pub fn nearby(ctx: &Context, task_id: &str, radius: Option<f64>) -> anyhow::Result<()> {
    let radius_km = radius.unwrap_or(ctx.config.search_radius_km);
    if !radius_km.is_finite() || radius_km < 0.0 {
        anyhow::bail!("radius must be a non-negative number of km, got {radius_km}");
    }

    let snapshot = ctx.snapshot()?;
    let task = find_task(&snapshot, task_id)?;

    NearbyAgents {
        task_id,
        radius_km,
        agents: find_nearby_agents(task, &snapshot.agents, radius_km),
    }
    .render(ctx.mode);
    Ok(())
}
