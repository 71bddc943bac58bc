//! Shared data types for the farmdash sensor dashboard.
//!
//! This crate provides the types passed between the reading store, the
//! alert evaluator, the audit log and the front ends.
//!
//! # Features
//!
//! - Sensor readings and the measurements they are created from
//! - Audit log entries and their line format
//! - Alert signals, kinds and severities
//! - The `YYYY-MM-DD HH:MM:SS` timestamp codec shared by database and log
//!
//! # Example
//!
//! ```
//! use farmdash_types::{LogEntry, Measurement};
//!
//! let m = Measurement::new(22.4, 50.0, 7.0);
//! assert!(m.is_finite());
//!
//! let entry = LogEntry::parse_line("2024-05-01 08:00:00 - Simulated sensor event").unwrap();
//! assert_eq!(entry.message, "Simulated sensor event");
//! ```

pub mod alert;
pub mod error;
pub mod timestamp;
pub mod types;

pub use alert::{AlertKind, AlertSignal, Severity};
pub use error::{ParseError, ParseResult};
pub use types::{Animal, Field, LogEntry, Measurement, Reading};

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    // --- LogEntry tests ---

    #[test]
    fn test_log_entry_display_matches_line_format() {
        let entry = LogEntry {
            timestamp: datetime!(2024-05-01 08:00:00),
            message: "Manual input: T=22.4, H=50, pH=7".to_string(),
        };
        assert_eq!(
            entry.to_string(),
            "2024-05-01 08:00:00 - Manual input: T=22.4, H=50, pH=7"
        );
    }

    #[test]
    fn test_log_entry_parse_line() {
        let entry = LogEntry::parse_line("2024-05-01 08:00:00 - Simulated sensor event\n").unwrap();
        assert_eq!(entry.timestamp, datetime!(2024-05-01 08:00:00));
        assert_eq!(entry.message, "Simulated sensor event");
    }

    #[test]
    fn test_log_entry_parse_empty_message() {
        let entry = LogEntry::parse_line("2024-05-01 08:00:00 - ").unwrap();
        assert_eq!(entry.message, "");
    }

    #[test]
    fn test_log_entry_parse_rejects_garbage() {
        assert!(matches!(
            LogEntry::parse_line("no separator here"),
            Err(ParseError::InvalidLogLine(_))
        ));
        assert!(matches!(
            LogEntry::parse_line("not a date - message"),
            Err(ParseError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn test_log_entry_now_uses_whole_seconds() {
        let entry = LogEntry::now("x");
        assert_eq!(entry.timestamp.nanosecond(), 0);
        assert_eq!(entry.message, "x");
    }

    // --- Measurement / Reading tests ---

    #[test]
    fn test_measurement_get() {
        let m = Measurement::new(30.0, 70.0, 6.0);
        assert_eq!(m.get(Field::Temperature), 30.0);
        assert_eq!(m.get(Field::Humidity), 70.0);
        assert_eq!(m.get(Field::Ph), 6.0);
    }

    #[test]
    fn test_measurement_is_finite() {
        assert!(Measurement::new(1.0, 2.0, 3.0).is_finite());
        assert!(!Measurement::new(f64::NAN, 2.0, 3.0).is_finite());
        assert!(!Measurement::new(1.0, f64::INFINITY, 3.0).is_finite());
    }

    #[test]
    fn test_reading_measurement() {
        let reading = Reading {
            id: 3,
            timestamp: datetime!(2024-05-01 08:00:00),
            temperature: 30.0,
            humidity: 70.0,
            ph: 6.0,
        };
        assert_eq!(reading.measurement(), Measurement::new(30.0, 70.0, 6.0));
    }

    // --- Field / Animal tests ---

    #[test]
    fn test_field_from_str() {
        assert_eq!("Temperature".parse::<Field>().unwrap(), Field::Temperature);
        assert_eq!("pH".parse::<Field>().unwrap(), Field::Ph);
        assert!(matches!(
            "pressure".parse::<Field>(),
            Err(ParseError::UnknownField(_))
        ));
    }

    #[test]
    fn test_animal_from_str() {
        assert_eq!("monkey".parse::<Animal>().unwrap(), Animal::Monkey);
        assert_eq!("BOAR".parse::<Animal>().unwrap(), Animal::Boar);
        let err = "cow".parse::<Animal>().unwrap_err();
        assert!(err.to_string().contains("monkey, deer, boar"));
    }

    #[test]
    fn test_animal_names() {
        for animal in Animal::ALL {
            assert_eq!(animal.as_str().parse::<Animal>().unwrap(), animal);
        }
        assert_eq!(Animal::Deer.to_string(), "Deer");
    }

    // --- Serialization tests ---

    #[test]
    fn test_reading_serialization_uses_text_timestamp() {
        let reading = Reading {
            id: 1,
            timestamp: datetime!(2024-05-01 08:00:00),
            temperature: 22.5,
            humidity: 50.0,
            ph: 7.0,
        };

        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("\"timestamp\":\"2024-05-01 08:00:00\""));
        assert!(json.contains("\"id\":1"));

        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }

    #[test]
    fn test_measurement_deserialization() {
        let json = r#"{"temperature":22.4,"humidity":50.0,"ph":7.0}"#;
        let m: Measurement = serde_json::from_str(json).unwrap();
        assert_eq!(m, Measurement::new(22.4, 50.0, 7.0));
    }

    #[test]
    fn test_enum_serialization() {
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "\"critical\"");
        assert_eq!(serde_json::to_string(&Field::Ph).unwrap(), "\"ph\"");
        assert_eq!(serde_json::to_string(&Animal::Deer).unwrap(), "\"deer\"");
        assert_eq!(
            serde_json::to_string(&AlertKind::HumidityLow).unwrap(),
            "\"HumidityLow\""
        );
    }

    #[test]
    fn test_reading_deserialization_rejects_bad_timestamp() {
        let json = r#"{"id":1,"timestamp":"2024/05/01","temperature":1.0,"humidity":2.0,"ph":3.0}"#;
        assert!(serde_json::from_str::<Reading>(json).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn log_line_round_trips(message in "[^\r\n]{0,64}", secs in 0i64..4_000_000_000) {
                let ts = time::OffsetDateTime::from_unix_timestamp(secs).unwrap();
                let entry = LogEntry {
                    timestamp: time::PrimitiveDateTime::new(ts.date(), ts.time()),
                    message,
                };
                let parsed = LogEntry::parse_line(&entry.to_string()).unwrap();
                prop_assert_eq!(parsed, entry);
            }
        }
    }
}
