//! Init command - create the data directory and database.

use anyhow::Result;

use super::CommandContext;
use crate::config::open_dashboard;
use crate::style;

pub fn cmd_init(ctx: &CommandContext) -> Result<()> {
    let dashboard = open_dashboard(&ctx.config)?;
    let count = dashboard.store().count()?;

    if !ctx.quiet {
        println!(
            "{}",
            style::format_success(
                &format!(
                    "Database ready at {} ({} readings)",
                    ctx.config.storage.database.display(),
                    count
                ),
                ctx.opts.no_color,
            )
        );
        println!("  Event log: {}", ctx.config.storage.log.display());
        println!("  Config:    {}", ctx.config_path.display());
    }
    Ok(())
}
