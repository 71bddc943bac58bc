//! Visual styling utilities for the CLI.
//!
//! Colors follow alert severity: green when everything is in range, yellow
//! for warnings, red for critical readings.

use farmdash_types::Severity;
use owo_colors::OwoColorize;

use crate::cli::StyleMode;

// ============================================================================
// Severity colors
// ============================================================================

/// Format a severity label with its color.
pub fn format_severity(severity: Severity, no_color: bool) -> String {
    let label = severity.to_string();
    if no_color {
        return label;
    }

    match severity {
        Severity::Info => format!("{}", label.cyan()),
        Severity::Warning => format!("{}", label.yellow()),
        Severity::Critical => format!("{}", label.red().bold()),
    }
}

/// Color a value according to the worst severity it triggered.
pub fn format_value_colored(text: &str, severity: Option<Severity>, no_color: bool) -> String {
    if no_color {
        return text.to_string();
    }

    match severity {
        None => format!("{}", text.green()),
        Some(Severity::Info) => format!("{}", text.cyan()),
        Some(Severity::Warning) => format!("{}", text.yellow()),
        Some(Severity::Critical) => format!("{}", text.red()),
    }
}

// ============================================================================
// Status messages
// ============================================================================

/// Format a success message.
pub fn format_success(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[OK] {}", message)
    } else {
        format!("{} {}", "[OK]".green(), message)
    }
}

/// Format an info message.
pub fn format_info(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[--] {}", message)
    } else {
        format!("{} {}", "[--]".cyan(), message)
    }
}

/// Format a warning message.
pub fn format_warning(message: &str, no_color: bool) -> String {
    if no_color {
        format!("[!!] {}", message)
    } else {
        format!("{} {}", "[!!]".yellow(), message)
    }
}

/// Format a title header.
pub fn format_title(title: &str, no_color: bool) -> String {
    let rule = "━".repeat(title.chars().count());
    if no_color {
        format!("{}\n{}", title, rule)
    } else {
        format!("{}\n{}", title.bold(), rule.dimmed())
    }
}

// ============================================================================
// Tables
// ============================================================================

/// Get terminal width, defaulting to 80 if detection fails.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Apply table style based on StyleMode.
pub fn apply_table_style(table: &mut tabled::Table, style: StyleMode) {
    use tabled::settings::Style;
    match style {
        StyleMode::Rich => {
            table.with(Style::rounded());
        }
        StyleMode::Minimal => {
            table.with(Style::psql());
        }
        StyleMode::Plain => {
            table.with(Style::blank());
        }
    }
}
