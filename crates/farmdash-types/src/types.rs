//! Core types for farm sensor data.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

use crate::error::ParseError;
use crate::timestamp;

/// Values submitted for a new reading, before the store assigns identity.
///
/// No range checks happen here; the front ends decide what input they accept.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    /// Air temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity percentage.
    pub humidity: f64,
    /// Soil pH (0-14 expected).
    pub ph: f64,
}

impl Measurement {
    /// Create a measurement from its three values.
    pub fn new(temperature: f64, humidity: f64, ph: f64) -> Self {
        Self {
            temperature,
            humidity,
            ph,
        }
    }

    /// Value of a single field.
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Temperature => self.temperature,
            Field::Humidity => self.humidity,
            Field::Ph => self.ph,
        }
    }

    /// Whether every value is a finite number.
    pub fn is_finite(&self) -> bool {
        self.temperature.is_finite() && self.humidity.is_finite() && self.ph.is_finite()
    }
}

/// A stored sensor observation.
///
/// Readings are immutable once stored; `id` and `timestamp` are assigned by
/// the store at insert time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Store-assigned identifier, strictly increasing.
    pub id: i64,
    /// Local wall-clock time of insertion.
    #[cfg_attr(feature = "serde", serde(with = "crate::timestamp::serde_text"))]
    pub timestamp: PrimitiveDateTime,
    /// Air temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity percentage.
    pub humidity: f64,
    /// Soil pH.
    pub ph: f64,
}

impl Reading {
    /// The measured values of this reading.
    pub fn measurement(&self) -> Measurement {
        Measurement::new(self.temperature, self.humidity, self.ph)
    }
}

/// Which measured quantity a value or threshold refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Field {
    Temperature,
    Humidity,
    Ph,
}

impl Field {
    /// All fields in display order.
    pub const ALL: [Field; 3] = [Field::Temperature, Field::Humidity, Field::Ph];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Temperature => "Temperature",
            Field::Humidity => "Humidity",
            Field::Ph => "pH",
        }
    }

    /// Unit suffix used when printing values (empty for pH).
    pub fn unit(&self) -> &'static str {
        match self {
            Field::Temperature => " °C",
            Field::Humidity => "%",
            Field::Ph => "",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "temperature" | "temp" => Ok(Field::Temperature),
            "humidity" => Ok(Field::Humidity),
            "ph" => Ok(Field::Ph),
            _ => Err(ParseError::UnknownField(s.to_string())),
        }
    }
}

/// One line of the audit log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogEntry {
    /// When the line was appended.
    #[cfg_attr(feature = "serde", serde(with = "crate::timestamp::serde_text"))]
    pub timestamp: PrimitiveDateTime,
    /// Caller-supplied event text.
    pub message: String,
}

impl LogEntry {
    /// Separator between timestamp and message.
    pub const SEPARATOR: &'static str = " - ";

    /// Create an entry stamped with the current local time.
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp::now(),
            message: message.into(),
        }
    }

    /// Parse a log line of the form `YYYY-MM-DD HH:MM:SS - message`.
    ///
    /// A trailing newline is ignored. The message may itself contain the
    /// separator; only the first occurrence splits.
    ///
    /// # Examples
    ///
    /// ```
    /// use farmdash_types::LogEntry;
    ///
    /// let entry = LogEntry::parse_line("2024-05-01 08:00:00 - Pump on - zone 2\n").unwrap();
    /// assert_eq!(entry.message, "Pump on - zone 2");
    /// ```
    pub fn parse_line(line: &str) -> Result<Self, ParseError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (ts, message) = line
            .split_once(Self::SEPARATOR)
            .ok_or_else(|| ParseError::InvalidLogLine(line.to_string()))?;
        Ok(Self {
            timestamp: timestamp::parse(ts)?,
            message: message.to_string(),
        })
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            timestamp::format(&self.timestamp),
            Self::SEPARATOR,
            self.message
        )
    }
}

/// Animal detected near the field, shown on the animals view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Animal {
    Monkey,
    Deer,
    Boar,
}

impl Animal {
    /// All known animals.
    pub const ALL: [Animal; 3] = [Animal::Monkey, Animal::Deer, Animal::Boar];

    /// Lowercase name as stored on disk.
    pub fn as_str(&self) -> &'static str {
        match self {
            Animal::Monkey => "monkey",
            Animal::Deer => "deer",
            Animal::Boar => "boar",
        }
    }

    /// Capitalized name for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Animal::Monkey => "Monkey",
            Animal::Deer => "Deer",
            Animal::Boar => "Boar",
        }
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Animal {
    type Err = ParseError;

    /// Parse an animal name, ignoring case and surrounding whitespace.
    ///
    /// ```
    /// use farmdash_types::Animal;
    ///
    /// assert_eq!(" Deer\n".parse::<Animal>().unwrap(), Animal::Deer);
    /// assert!("cow".parse::<Animal>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monkey" => Ok(Animal::Monkey),
            "deer" => Ok(Animal::Deer),
            "boar" => Ok(Animal::Boar),
            _ => Err(ParseError::UnknownAnimal(s.trim().to_string())),
        }
    }
}
