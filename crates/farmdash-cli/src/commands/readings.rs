//! Readings command - list stored readings.

use anyhow::{Context, Result};
use farmdash_core::{Dashboard, ReadingQuery};
use time::PrimitiveDateTime;

use super::CommandContext;
use crate::cli::OutputFormat;
use crate::format::{format_readings_csv, format_readings_text, format_trend_text};
use crate::style;
use crate::util::write_output;

/// Arguments for the readings command.
#[derive(Debug, Clone, Default)]
pub struct ReadingsArgs {
    pub limit: Option<u32>,
    pub since: Option<PrimitiveDateTime>,
    pub until: Option<PrimitiveDateTime>,
    pub trend: bool,
    pub format: OutputFormat,
}

impl ReadingsArgs {
    fn query(&self) -> ReadingQuery {
        let mut query = ReadingQuery::new();
        if let Some(since) = self.since {
            query = query.since(since);
        }
        if let Some(until) = self.until {
            query = query.until(until);
        }
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        query
    }
}

pub fn cmd_readings(ctx: &CommandContext, dashboard: &Dashboard, args: ReadingsArgs) -> Result<()> {
    if let (Some(since), Some(until)) = (args.since, args.until)
        && since > until
    {
        anyhow::bail!("--since must not be later than --until");
    }

    let readings = dashboard
        .store()
        .query(&args.query())
        .context("Failed to read readings")?;

    if args.trend {
        // Leave room for the min/max suffix
        let width = style::terminal_width().saturating_sub(24).max(10);
        return write_output(
            ctx.output(),
            &format_trend_text(&readings, width, &ctx.opts),
        );
    }

    let content = match args.format {
        OutputFormat::Json => ctx.opts.as_json(&readings)?,
        OutputFormat::Csv => format_readings_csv(&readings, &ctx.opts)?,
        OutputFormat::Text => format_readings_text(&readings, dashboard.thresholds(), &ctx.opts),
    };
    write_output(ctx.output(), &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_query_from_args() {
        let args = ReadingsArgs {
            limit: Some(3),
            since: Some(datetime!(2024-05-01 00:00:00)),
            ..Default::default()
        };
        let query = args.query();
        assert_eq!(query.limit, Some(3));
        assert_eq!(query.since, Some(datetime!(2024-05-01 00:00:00)));
        assert!(query.until.is_none());
        assert!(query.newest_first);
    }
}
