//! Config command - inspect and create the configuration file.

use anyhow::{Context, Result};
use farmdash_core::Config;

use super::CommandContext;
use crate::cli::ConfigAction;
use crate::style;

pub fn cmd_config(ctx: &CommandContext, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let content =
                toml::to_string_pretty(&ctx.config).context("Failed to serialize configuration")?;
            print!("{}", content);
        }
        ConfigAction::Path => {
            println!("{}", ctx.config_path.display());
        }
        ConfigAction::Init { force } => {
            if ctx.config_path.exists() && !force {
                anyhow::bail!(
                    "Configuration already exists at {} (use --force to overwrite)",
                    ctx.config_path.display()
                );
            }
            Config::default()
                .save(&ctx.config_path)
                .context("Failed to write configuration")?;
            if !ctx.quiet {
                println!(
                    "{}",
                    style::format_success(
                        &format!("Wrote {}", ctx.config_path.display()),
                        ctx.opts.no_color
                    )
                );
            }
        }
    }
    Ok(())
}
