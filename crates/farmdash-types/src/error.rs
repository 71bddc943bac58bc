//! Error types for data parsing in farmdash-types.

use thiserror::Error;

/// Errors that can occur when parsing farmdash values from text.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Timestamp text did not match `YYYY-MM-DD HH:MM:SS`.
    #[error("Invalid timestamp '{0}': expected YYYY-MM-DD HH:MM:SS")]
    InvalidTimestamp(String),

    /// Log line did not match `<timestamp> - <message>`.
    #[error("Invalid log line: {0}")]
    InvalidLogLine(String),

    /// Animal name is not one of the known animals.
    #[error("Unknown animal '{0}'. Allowed values: monkey, deer, boar")]
    UnknownAnimal(String),

    /// View name is not one of the dashboard screens.
    #[error("Unknown view '{0}'. Allowed values: home, weather, moisture, animals")]
    UnknownView(String),

    /// Field name is not one of temperature, humidity, ph.
    #[error("Unknown field '{0}'. Allowed values: temperature, humidity, ph")]
    UnknownField(String),
}

/// Result type alias using farmdash-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
