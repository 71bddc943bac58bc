//! Event log commands - record, simulate and tail events.

use anyhow::{Context, Result};
use farmdash_core::{Dashboard, LogEntry};

use super::CommandContext;
use crate::cli::OutputFormat;
use crate::format::{format_events_csv, format_events_text};
use crate::style;
use crate::util::write_output;

pub fn cmd_log(ctx: &CommandContext, dashboard: &Dashboard, message: &str) -> Result<()> {
    let entry = dashboard
        .record_event(message)
        .context("Failed to write event log")?;
    confirm(ctx, &entry);
    Ok(())
}

pub fn cmd_simulate(ctx: &CommandContext, dashboard: &Dashboard) -> Result<()> {
    let entry = dashboard
        .simulate_event()
        .context("Failed to write event log")?;
    confirm(ctx, &entry);
    Ok(())
}

pub fn cmd_events(
    ctx: &CommandContext,
    dashboard: &Dashboard,
    count: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let n = count.unwrap_or(ctx.config.dashboard.tail_lines);
    let log = dashboard.log();

    let content = match format {
        OutputFormat::Text => format_events_text(&log.tail(n)?, &ctx.opts),
        OutputFormat::Json => ctx.opts.as_json(&log.tail_entries(n)?)?,
        OutputFormat::Csv => format_events_csv(&log.tail_entries(n)?, &ctx.opts),
    };
    write_output(ctx.output(), &content)
}

fn confirm(ctx: &CommandContext, entry: &LogEntry) {
    if !ctx.quiet {
        println!(
            "{}",
            style::format_success(&format!("Logged: {}", entry), ctx.opts.no_color)
        );
    }
}
