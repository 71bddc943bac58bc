//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::Result;
use farmdash_core::trend;
use farmdash_core::{AlertSignal, Field, LogEntry, Reading, Submission, Thresholds};
use farmdash_types::timestamp;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::StyleMode;
use crate::style;

/// Formatting options for output.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Omit header row in CSV output.
    pub no_header: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
    /// Visual styling mode.
    pub style: StyleMode,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            no_color: false,
            no_header: false,
            compact: false,
            style: StyleMode::Rich,
        }
    }
}

impl FormatOptions {
    pub fn new(no_color: bool, style: StyleMode) -> Self {
        // Plain mode automatically disables colors for pipe-friendliness
        Self {
            no_color: no_color || style == StyleMode::Plain,
            style,
            ..Self::default()
        }
    }

    /// Create with no_header option for CSV output.
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Serialize value to JSON string, respecting compact option.
    pub fn as_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }
}

// ============================================================================
// Readings
// ============================================================================

#[derive(Tabled)]
struct ReadingRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Temp (°C)")]
    temperature: String,
    #[tabled(rename = "Humidity (%)")]
    humidity: String,
    #[tabled(rename = "pH")]
    ph: String,
}

/// Render readings as a table, coloring each value by the alerts it raises.
#[must_use]
pub fn format_readings_text(
    readings: &[Reading],
    thresholds: &Thresholds,
    opts: &FormatOptions,
) -> String {
    if readings.is_empty() {
        return "No readings recorded.\n".to_string();
    }

    // Narrow terminals get fewer rows to avoid wrapping issues
    let max_rows = if style::terminal_width() < 80 { 10 } else { 25 };

    let rows: Vec<ReadingRow> = readings
        .iter()
        .take(max_rows)
        .map(|r| {
            let alerts = thresholds.evaluate_reading(r);
            let cell = |field: Field| {
                let worst = alerts
                    .iter()
                    .filter(|a| a.kind.field() == field)
                    .map(|a| a.severity)
                    .max();
                style::format_value_colored(
                    &r.measurement().get(field).to_string(),
                    worst,
                    opts.no_color,
                )
            };
            ReadingRow {
                id: r.id,
                timestamp: timestamp::format(&r.timestamp),
                temperature: cell(Field::Temperature),
                humidity: cell(Field::Humidity),
                ph: cell(Field::Ph),
            }
        })
        .collect();

    let mut table = tabled::Table::new(rows);
    style::apply_table_style(&mut table, opts.style);

    let mut output = format!("Readings ({} records):\n\n", readings.len());
    output.push_str(&table.to_string());
    output.push('\n');

    if readings.len() > max_rows {
        output.push_str(&format!(
            "... and {} more readings\n",
            readings.len() - max_rows
        ));
        output.push_str("(Use --format csv or --format json for full data)\n");
    }

    output
}

/// Temperature sparkline over `readings`, oldest on the left.
#[must_use]
pub fn format_trend_text(readings: &[Reading], width: usize, opts: &FormatOptions) -> String {
    match trend::temperature_line(readings, width) {
        Some(line) => format!(
            "{}
{}
",
            style::format_title(
                &format!("Temperature trend ({} readings)", readings.len()),
                opts.no_color
            ),
            line
        ),
        None => "No readings recorded.
".to_string(),
    }
}

/// Render readings as CSV in the same layout as the service export.
pub fn format_readings_csv(readings: &[Reading], opts: &FormatOptions) -> Result<String> {
    let mut buf = Vec::new();
    farmdash_store::write_csv(&mut buf, readings, !opts.no_header)?;
    Ok(String::from_utf8(buf)?)
}

// ============================================================================
// Alerts
// ============================================================================

/// One line per alert with its suggested action.
#[must_use]
pub fn format_alerts_text(alerts: &[AlertSignal], opts: &FormatOptions) -> String {
    if alerts.is_empty() {
        return format!(
            "{}\n",
            style::format_success("All readings within range", opts.no_color)
        );
    }

    let mut output = String::new();
    for alert in alerts {
        output.push_str(&format!(
            "[{}] {}\n      {}\n",
            style::format_severity(alert.severity, opts.no_color),
            alert,
            alert.kind.action()
        ));
    }
    output
}

/// Text shown after a reading was stored.
#[must_use]
pub fn format_submission_text(submission: &Submission, opts: &FormatOptions) -> String {
    let r = &submission.reading;
    let mut output = format!(
        "{}\n",
        style::format_success(
            &format!("Reading #{} saved at {}", r.id, timestamp::format(&r.timestamp)),
            opts.no_color,
        )
    );
    if !submission.logged {
        output.push_str(&format!(
            "{}\n",
            style::format_warning("Event log could not be updated", opts.no_color)
        ));
    }
    output.push_str(&format_alerts_text(&submission.alerts, opts));
    output
}

// ============================================================================
// Events
// ============================================================================

/// Raw log lines, oldest first.
#[must_use]
pub fn format_events_text(lines: &[String], opts: &FormatOptions) -> String {
    if lines.is_empty() {
        return format!("{}\n", style::format_info("No events logged", opts.no_color));
    }
    let mut output = lines.join("\n");
    output.push('\n');
    output
}

/// Log entries as CSV with `timestamp,message` columns.
#[must_use]
pub fn format_events_csv(entries: &[LogEntry], opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        "timestamp,message\n".to_string()
    };
    for entry in entries {
        output.push_str(&format!(
            "{},{}\n",
            timestamp::format(&entry.timestamp),
            csv_escape(&entry.message)
        ));
    }
    output
}

/// Escape a value for CSV output.
/// If the value contains comma, quote, or newline, wrap in quotes and escape internal quotes.
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmdash_core::{AlertKind, Measurement, Severity};
    use time::macros::datetime;

    fn plain() -> FormatOptions {
        FormatOptions::new(true, StyleMode::Plain)
    }

    fn reading(id: i64, temperature: f64) -> Reading {
        Reading {
            id,
            timestamp: datetime!(2024-05-01 08:00:00),
            temperature,
            humidity: 50.0,
            ph: 7.0,
        }
    }

    #[test]
    fn test_plain_style_disables_color() {
        let opts = FormatOptions::new(false, StyleMode::Plain);
        assert!(opts.no_color);
        assert!(!FormatOptions::new(false, StyleMode::Rich).no_color);
    }

    #[test]
    fn test_as_json_compact_and_pretty() {
        let value = serde_json::json!({"a": 1});
        assert_eq!(plain().with_compact(true).as_json(&value).unwrap(), "{\"a\":1}\n");
        assert!(plain().as_json(&value).unwrap().contains("\n  \"a\": 1"));
    }

    #[test]
    fn test_trend_text() {
        let text = format_trend_text(&[reading(2, 30.0), reading(1, 10.0)], 40, &plain());
        assert!(text.starts_with("Temperature trend (2 readings)\n"));
        assert!(text.ends_with("▁█ (10 to 30 °C)\n"));
        assert_eq!(format_trend_text(&[], 40, &plain()), "No readings recorded.\n");
    }

    #[test]
    fn test_readings_table_contains_values() {
        let text = format_readings_text(
            &[reading(2, 45.0), reading(1, 22.5)],
            &Thresholds::default(),
            &plain(),
        );
        assert!(text.starts_with("Readings (2 records):"));
        assert!(text.contains("Temp (°C)"));
        assert!(text.contains("45"));
        assert!(text.contains("2024-05-01 08:00:00"));
    }

    #[test]
    fn test_readings_empty() {
        let text = format_readings_text(&[], &Thresholds::default(), &plain());
        assert_eq!(text, "No readings recorded.\n");
    }

    #[test]
    fn test_readings_csv_honours_no_header() {
        let csv = format_readings_csv(&[reading(1, 19.0)], &plain()).unwrap();
        assert!(csv.starts_with("ID,Timestamp,"));

        let csv = format_readings_csv(&[reading(1, 19.0)], &plain().with_no_header(true)).unwrap();
        assert_eq!(csv, "1,2024-05-01 08:00:00,19,50,7\n");
    }

    #[test]
    fn test_alerts_text() {
        assert_eq!(
            format_alerts_text(&[], &plain()),
            "[OK] All readings within range\n"
        );

        let alerts = Thresholds::default().evaluate(&Measurement::new(45.0, 50.0, 7.0));
        let text = format_alerts_text(&alerts, &plain());
        assert!(text.starts_with("[Critical]"));
        assert!(text.contains(AlertKind::TemperatureHigh.action()));
    }

    #[test]
    fn test_submission_text_mentions_id() {
        let submission = Submission {
            reading: reading(7, 22.0),
            alerts: Vec::new(),
            logged: false,
        };
        let text = format_submission_text(&submission, &plain());
        assert!(text.starts_with("[OK] Reading #7 saved at 2024-05-01 08:00:00"));
        assert!(text.contains("[!!] Event log could not be updated"));
        assert!(text.contains("All readings within range"));
    }

    #[test]
    fn test_events_text_and_csv() {
        assert_eq!(format_events_text(&[], &plain()), "[--] No events logged\n");

        let entries = vec![LogEntry {
            timestamp: datetime!(2024-05-01 08:00:00),
            message: "Pump on, zone \"2\"".to_string(),
        }];
        assert_eq!(
            format_events_csv(&entries, &plain()),
            "timestamp,message\n2024-05-01 08:00:00,\"Pump on, zone \"\"2\"\"\"\n"
        );
    }

    #[test]
    fn test_severity_colors_cover_all_levels() {
        for severity in [Severity::Info, Severity::Warning, Severity::Critical] {
            assert!(!style::format_severity(severity, false).is_empty());
        }
    }
}
