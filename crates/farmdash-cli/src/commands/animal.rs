//! Animal command - select or show the detected animal.

use anyhow::{Context, Result};
use farmdash_core::Dashboard;

use super::CommandContext;
use crate::cli::AnimalAction;
use crate::style;

pub fn cmd_animal(ctx: &CommandContext, dashboard: &Dashboard, action: AnimalAction) -> Result<()> {
    let selection = dashboard.animal();

    match action {
        AnimalAction::Set { animal } => {
            selection
                .set(animal)
                .context("Failed to save animal selection")?;
            if !ctx.quiet {
                println!(
                    "{}",
                    style::format_success(&format!("Selected {}", animal), ctx.opts.no_color)
                );
            }
        }
        AnimalAction::Show => match selection.get()? {
            Some(animal) => println!("{}", animal),
            None => println!(
                "{}",
                style::format_info("No animal selected", ctx.opts.no_color)
            ),
        },
    }
    Ok(())
}
