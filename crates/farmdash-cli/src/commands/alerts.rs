//! Alerts command - evaluate the newest reading.

use anyhow::Result;
use farmdash_core::{AlertSignal, Dashboard, Reading};
use serde::Serialize;

use super::CommandContext;
use crate::cli::OutputFormat;
use crate::format::format_alerts_text;
use crate::style;
use crate::util::write_output;

#[derive(Serialize)]
struct AlertsJson {
    reading: Option<Reading>,
    alerts: Vec<AlertSignal>,
}

pub fn cmd_alerts(ctx: &CommandContext, dashboard: &Dashboard, format: OutputFormat) -> Result<()> {
    let reading = dashboard.store().latest()?;
    let alerts = reading
        .map(|r| dashboard.thresholds().evaluate_reading(&r))
        .unwrap_or_default();

    let content = match format {
        OutputFormat::Json => ctx.opts.as_json(&AlertsJson { reading, alerts })?,
        OutputFormat::Csv => alerts_csv(&alerts, ctx),
        OutputFormat::Text => match reading {
            None => format!(
                "{}\n",
                style::format_info("No readings recorded", ctx.opts.no_color)
            ),
            Some(r) => format!(
                "Reading #{}\n{}",
                r.id,
                format_alerts_text(&alerts, &ctx.opts)
            ),
        },
    };
    write_output(ctx.output(), &content)
}

fn alerts_csv(alerts: &[AlertSignal], ctx: &CommandContext) -> String {
    let mut output = if ctx.opts.no_header {
        String::new()
    } else {
        "kind,severity,value,limit\n".to_string()
    };
    for a in alerts {
        output.push_str(&format!(
            "{:?},{},{},{}\n",
            a.kind,
            a.severity.to_string().to_lowercase(),
            a.value,
            a.limit
        ));
    }
    output
}
