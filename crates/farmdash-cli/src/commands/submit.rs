//! Submit command - record a manual reading.

use anyhow::{Context, Result};
use farmdash_core::{Dashboard, Measurement};

use super::CommandContext;
use crate::cli::OutputFormat;
use crate::format::{format_readings_csv, format_submission_text};
use crate::util::write_output;

pub fn cmd_submit(
    ctx: &CommandContext,
    dashboard: &Dashboard,
    measurement: Measurement,
    format: OutputFormat,
) -> Result<()> {
    let submission = dashboard
        .submit(measurement)
        .context("Failed to save reading")?;

    let content = match format {
        OutputFormat::Json => ctx.opts.as_json(&submission)?,
        OutputFormat::Csv => format_readings_csv(&[submission.reading], &ctx.opts)?,
        OutputFormat::Text => format_submission_text(&submission, &ctx.opts),
    };
    write_output(ctx.output(), &content)
}
