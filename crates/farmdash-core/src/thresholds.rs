//! Threshold bands and alert evaluation.
//!
//! A reading is checked against a table of bands. Each band names a field,
//! a strict comparison against a limit, and the alert kind and severity it
//! raises. When several bands of one kind fire, only the most severe is
//! reported.
//!
//! # Example
//!
//! ```
//! use farmdash_core::{Thresholds, AlertKind, Severity};
//! use farmdash_types::Measurement;
//!
//! let thresholds = Thresholds::default();
//!
//! let alerts = thresholds.evaluate(&Measurement::new(45.0, 50.0, 7.0));
//! assert_eq!(alerts.len(), 1);
//! assert_eq!(alerts[0].kind, AlertKind::TemperatureHigh);
//! assert_eq!(alerts[0].severity, Severity::Critical);
//! ```

use serde::{Deserialize, Serialize};

use farmdash_types::{AlertKind, AlertSignal, Field, Measurement, Reading, Severity};

use crate::config::ValidationError;

/// Direction a value must move past the limit for a band to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// Fires when the value is strictly greater than the limit.
    Above,
    /// Fires when the value is strictly less than the limit.
    Below,
}

impl Comparison {
    /// Whether `value` crosses `limit`. NaN never crosses.
    pub fn crosses(&self, value: f64, limit: f64) -> bool {
        match self {
            Comparison::Above => value > limit,
            Comparison::Below => value < limit,
        }
    }
}

/// One row of the threshold table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub field: Field,
    pub comparison: Comparison,
    pub limit: f64,
    pub kind: AlertKind,
    pub severity: Severity,
}

impl Band {
    pub const fn new(
        field: Field,
        comparison: Comparison,
        limit: f64,
        kind: AlertKind,
        severity: Severity,
    ) -> Self {
        Self {
            field,
            comparison,
            limit,
            kind,
            severity,
        }
    }

    /// The signal this band raises for `value`, if it fires.
    pub fn check(&self, value: f64) -> Option<AlertSignal> {
        self.comparison
            .crosses(value, self.limit)
            .then_some(AlertSignal {
                kind: self.kind,
                severity: self.severity,
                value,
                limit: self.limit,
            })
    }
}

/// The canonical band table.
pub const DEFAULT_BANDS: [Band; 7] = [
    Band::new(
        Field::Temperature,
        Comparison::Above,
        40.0,
        AlertKind::TemperatureHigh,
        Severity::Critical,
    ),
    Band::new(
        Field::Temperature,
        Comparison::Above,
        35.0,
        AlertKind::TemperatureHigh,
        Severity::Warning,
    ),
    Band::new(
        Field::Temperature,
        Comparison::Below,
        10.0,
        AlertKind::TemperatureLow,
        Severity::Warning,
    ),
    Band::new(
        Field::Humidity,
        Comparison::Below,
        30.0,
        AlertKind::HumidityLow,
        Severity::Warning,
    ),
    Band::new(
        Field::Humidity,
        Comparison::Above,
        70.0,
        AlertKind::HumidityHigh,
        Severity::Warning,
    ),
    Band::new(
        Field::Ph,
        Comparison::Below,
        5.5,
        AlertKind::PhLow,
        Severity::Warning,
    ),
    Band::new(
        Field::Ph,
        Comparison::Above,
        7.5,
        AlertKind::PhHigh,
        Severity::Info,
    ),
];

/// Configuration for the threshold table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Bands checked against every reading. Replaces the defaults entirely.
    pub bands: Vec<Band>,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            bands: DEFAULT_BANDS.to_vec(),
        }
    }
}

impl ThresholdConfig {
    /// Create a table from explicit bands.
    pub fn new(bands: Vec<Band>) -> Self {
        Self { bands }
    }

    /// Validate the table, prefixing field names with `prefix`.
    ///
    /// Limits must be finite, and each band's kind must match its field and
    /// comparison direction.
    pub fn validate(&self, prefix: &str) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (i, band) in self.bands.iter().enumerate() {
            let at = format!("{}.bands[{}]", prefix, i);

            if !band.limit.is_finite() {
                errors.push(ValidationError {
                    field: format!("{}.limit", at),
                    message: format!("limit must be a finite number, got {}", band.limit),
                });
            }

            if band.kind.field() != band.field {
                errors.push(ValidationError {
                    field: format!("{}.kind", at),
                    message: format!("{:?} does not apply to field {}", band.kind, band.field),
                });
            }

            let expects_above = band.kind.is_high();
            if expects_above != (band.comparison == Comparison::Above) {
                errors.push(ValidationError {
                    field: format!("{}.comparison", at),
                    message: format!(
                        "{:?} needs comparison '{}'",
                        band.kind,
                        if expects_above { "above" } else { "below" }
                    ),
                });
            }
        }

        errors
    }
}

/// Alert evaluator for sensor readings.
///
/// Evaluation is pure: it never looks at earlier readings and never writes.
#[derive(Debug, Clone, Default)]
pub struct Thresholds {
    config: ThresholdConfig,
}

impl Thresholds {
    /// Create a new evaluator with the given table.
    pub fn new(config: ThresholdConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Evaluate a measurement.
    ///
    /// Signals come out in field order (temperature, humidity, pH), at most
    /// one per kind.
    pub fn evaluate(&self, measurement: &Measurement) -> Vec<AlertSignal> {
        let mut signals: Vec<AlertSignal> = Vec::new();

        for field in Field::ALL {
            let value = measurement.get(field);
            let start = signals.len();

            for band in self.config.bands.iter().filter(|b| b.field == field) {
                let Some(signal) = band.check(value) else {
                    continue;
                };

                match signals[start..].iter().position(|s| s.kind == signal.kind) {
                    Some(i) if signal.severity > signals[start + i].severity => {
                        signals[start + i] = signal;
                    }
                    Some(_) => {}
                    None => signals.push(signal),
                }
            }
        }

        signals
    }

    /// Evaluate a stored reading.
    pub fn evaluate_reading(&self, reading: &Reading) -> Vec<AlertSignal> {
        self.evaluate(&reading.measurement())
    }
}

/// The highest severity among `signals`.
pub fn highest_severity(signals: &[AlertSignal]) -> Option<Severity> {
    signals.iter().map(|s| s.severity).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(signals: &[AlertSignal]) -> Vec<AlertKind> {
        signals.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_normal_reading_has_no_alerts() {
        let t = Thresholds::default();
        assert!(t.evaluate(&Measurement::new(22.0, 50.0, 6.5)).is_empty());
    }

    #[test]
    fn test_critical_temperature_suppresses_warning() {
        let t = Thresholds::default();
        let alerts = t.evaluate(&Measurement::new(45.0, 50.0, 7.0));

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::TemperatureHigh);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert_eq!(alerts[0].value, 45.0);
        assert_eq!(alerts[0].limit, 40.0);
    }

    #[test]
    fn test_warm_temperature_is_warning() {
        let t = Thresholds::default();
        let alerts = t.evaluate(&Measurement::new(38.0, 50.0, 7.0));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Warning);
    }

    #[test]
    fn test_dry_and_acidic_fire_together() {
        let t = Thresholds::default();
        let alerts = t.evaluate(&Measurement::new(22.0, 20.0, 4.5));
        assert_eq!(kinds(&alerts), vec![AlertKind::HumidityLow, AlertKind::PhLow]);
        assert!(alerts.iter().all(|a| a.severity == Severity::Warning));
    }

    #[test]
    fn test_comparisons_are_strict() {
        let t = Thresholds::default();
        assert!(t.evaluate(&Measurement::new(35.0, 70.0, 7.5)).is_empty());
        assert!(t.evaluate(&Measurement::new(10.0, 30.0, 5.5)).is_empty());

        let alerts = t.evaluate(&Measurement::new(40.0, 50.0, 7.0));
        assert_eq!(alerts[0].severity, Severity::Warning);
    }

    #[test]
    fn test_alkaline_soil_is_info() {
        let t = Thresholds::default();
        let alerts = t.evaluate(&Measurement::new(20.0, 50.0, 8.0));
        assert_eq!(kinds(&alerts), vec![AlertKind::PhHigh]);
        assert_eq!(alerts[0].severity, Severity::Info);
    }

    #[test]
    fn test_output_follows_field_order() {
        let t = Thresholds::default();
        let alerts = t.evaluate(&Measurement::new(5.0, 80.0, 9.0));
        assert_eq!(
            kinds(&alerts),
            vec![
                AlertKind::TemperatureLow,
                AlertKind::HumidityHigh,
                AlertKind::PhHigh
            ]
        );
    }

    #[test]
    fn test_nan_never_fires() {
        let t = Thresholds::default();
        let alerts = t.evaluate(&Measurement::new(f64::NAN, f64::NAN, f64::NAN));
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_infinity_fires() {
        let t = Thresholds::default();
        let alerts = t.evaluate(&Measurement::new(f64::INFINITY, 50.0, 7.0));
        assert_eq!(alerts[0].severity, Severity::Critical);
    }

    #[test]
    fn test_custom_table() {
        let t = Thresholds::new(ThresholdConfig::new(vec![Band::new(
            Field::Humidity,
            Comparison::Below,
            60.0,
            AlertKind::HumidityLow,
            Severity::Critical,
        )]));

        let alerts = t.evaluate(&Measurement::new(45.0, 50.0, 4.0));
        assert_eq!(kinds(&alerts), vec![AlertKind::HumidityLow]);
        assert_eq!(alerts[0].severity, Severity::Critical);
    }

    #[test]
    fn test_empty_table_never_fires() {
        let t = Thresholds::new(ThresholdConfig::new(Vec::new()));
        assert!(t.evaluate(&Measurement::new(100.0, 0.0, 0.0)).is_empty());
    }

    #[test]
    fn test_highest_severity() {
        let t = Thresholds::default();
        let alerts = t.evaluate(&Measurement::new(45.0, 20.0, 8.0));
        assert_eq!(highest_severity(&alerts), Some(Severity::Critical));
        assert_eq!(highest_severity(&[]), None);
    }

    #[test]
    fn test_default_table_validates() {
        assert!(ThresholdConfig::default().validate("alerts.thresholds").is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_bands() {
        let config = ThresholdConfig::new(vec![
            Band::new(
                Field::Temperature,
                Comparison::Above,
                f64::NAN,
                AlertKind::TemperatureHigh,
                Severity::Warning,
            ),
            Band::new(
                Field::Ph,
                Comparison::Above,
                7.0,
                AlertKind::HumidityHigh,
                Severity::Warning,
            ),
            Band::new(
                Field::Ph,
                Comparison::Below,
                8.0,
                AlertKind::PhHigh,
                Severity::Info,
            ),
        ]);

        let errors = config.validate("alerts.thresholds");
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "alerts.thresholds.bands[0].limit",
                "alerts.thresholds.bands[1].kind",
                "alerts.thresholds.bands[2].comparison",
            ]
        );
    }

    #[test]
    fn test_table_from_toml() {
        let toml_str = r#"
            [[bands]]
            field = "temperature"
            comparison = "above"
            limit = 30.0
            kind = "TemperatureHigh"
            severity = "critical"
        "#;
        let config: ThresholdConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bands.len(), 1);
        assert_eq!(config.bands[0].comparison, Comparison::Above);
        assert_eq!(config.bands[0].severity, Severity::Critical);

        let alerts = Thresholds::new(config).evaluate(&Measurement::new(31.0, 50.0, 7.0));
        assert_eq!(alerts.len(), 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn comfortable_ranges_never_alert(
                t in 10.0f64..=35.0,
                h in 30.0f64..=70.0,
                p in 5.5f64..=7.5,
            ) {
                let alerts = Thresholds::default().evaluate(&Measurement::new(t, h, p));
                prop_assert!(alerts.is_empty());
            }

            #[test]
            fn at_most_one_signal_per_kind(
                t in -50.0f64..100.0,
                h in 0.0f64..100.0,
                p in 0.0f64..14.0,
            ) {
                let alerts = Thresholds::default().evaluate(&Measurement::new(t, h, p));
                for (i, a) in alerts.iter().enumerate() {
                    prop_assert!(alerts[i + 1..].iter().all(|b| b.kind != a.kind));
                }
                prop_assert!(alerts.len() <= 3);
            }
        }
    }
}
