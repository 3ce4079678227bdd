//! Config command

use fieldmatch::output::Render;

use super::context::Context;

/// Print the effective configuration
pub fn show_config(ctx: &Context) -> anyhow::Result<()> {
    ctx.config.render(ctx.mode);
    Ok(())
}
