//! Alert signals derived from readings.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::Field;

/// How urgent an alert is.
///
/// # Ordering
///
/// Severities are ordered `Info < Warning < Critical`, so the most severe of
/// several signals is simply the maximum.
///
/// ```
/// use farmdash_types::Severity;
///
/// assert!(Severity::Critical > Severity::Warning);
/// assert!(Severity::Warning > Severity::Info);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "Info"),
            Severity::Warning => write!(f, "Warning"),
            Severity::Critical => write!(f, "Critical"),
        }
    }
}

/// What kind of threshold a reading crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlertKind {
    TemperatureHigh,
    TemperatureLow,
    HumidityLow,
    HumidityHigh,
    PhLow,
    PhHigh,
}

impl AlertKind {
    /// The field this kind of alert is about.
    pub fn field(&self) -> Field {
        match self {
            AlertKind::TemperatureHigh | AlertKind::TemperatureLow => Field::Temperature,
            AlertKind::HumidityLow | AlertKind::HumidityHigh => Field::Humidity,
            AlertKind::PhLow | AlertKind::PhHigh => Field::Ph,
        }
    }

    /// Whether the alert is about a value that is too high.
    pub fn is_high(&self) -> bool {
        matches!(
            self,
            AlertKind::TemperatureHigh | AlertKind::HumidityHigh | AlertKind::PhHigh
        )
    }

    /// Suggested action for the grower.
    pub fn action(&self) -> &'static str {
        match self {
            AlertKind::TemperatureHigh => "Provide shade or ventilation",
            AlertKind::TemperatureLow => "Protect crops from cold",
            AlertKind::HumidityLow => "Irrigate or mist the field",
            AlertKind::HumidityHigh => "Improve airflow to prevent mould",
            AlertKind::PhLow => "Soil is too acidic; consider liming",
            AlertKind::PhHigh => "Soil is alkaline; consider sulfur amendment",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.is_high() { "high" } else { "low" };
        write!(f, "{} {}", self.field(), direction)
    }
}

/// A reading value that crossed a threshold band.
///
/// Signals are transient: they are computed on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlertSignal {
    /// What was crossed.
    pub kind: AlertKind,
    /// How urgent it is.
    pub severity: Severity,
    /// The offending value.
    pub value: f64,
    /// The band limit that was crossed.
    pub limit: f64,
}

impl fmt::Display for AlertSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.kind.field();
        let relation = if self.kind.is_high() { "above" } else { "below" };
        write!(
            f,
            "{} {}{} is {} {}{}",
            field,
            self.value,
            field.unit(),
            relation,
            self.limit,
            field.unit()
        )
    }
}
