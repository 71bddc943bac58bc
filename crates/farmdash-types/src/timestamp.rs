//! Second-resolution wall-clock timestamps.
//!
//! Readings and log lines share one text form, `YYYY-MM-DD HH:MM:SS`, in
//! local time without an offset. Values are carried as
//! [`PrimitiveDateTime`].

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

use crate::error::{ParseError, ParseResult};

/// Text layout used by the database and the audit log.
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Current local time truncated to whole seconds.
///
/// Falls back to UTC when the local offset cannot be determined (for example
/// in a multi-threaded process on some Unix platforms).
pub fn now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let time = now.time();
    PrimitiveDateTime::new(now.date(), time) - Duration::nanoseconds(i64::from(time.nanosecond()))
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format(ts: &PrimitiveDateTime) -> String {
    // The format has no components a valid PrimitiveDateTime can lack.
    ts.format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| ts.to_string())
}

/// Parse `YYYY-MM-DD HH:MM:SS`.
///
/// # Examples
///
/// ```
/// use farmdash_types::timestamp;
///
/// let ts = timestamp::parse("2024-05-01 13:45:09").unwrap();
/// assert_eq!(timestamp::format(&ts), "2024-05-01 13:45:09");
/// assert!(timestamp::parse("yesterday").is_err());
/// ```
pub fn parse(s: &str) -> ParseResult<PrimitiveDateTime> {
    PrimitiveDateTime::parse(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|_| ParseError::InvalidTimestamp(s.to_string()))
}

/// Serde adapter storing timestamps in their text form.
#[cfg(feature = "serde")]
pub mod serde_text {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::PrimitiveDateTime;

    pub fn serialize<S: Serializer>(ts: &PrimitiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<PrimitiveDateTime, D::Error> {
        let text = String::deserialize(d)?;
        super::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_format_pads_components() {
        let ts = datetime!(2024-01-02 03:04:05);
        assert_eq!(format(&ts), "2024-01-02 03:04:05");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let ts = parse(" 2024-12-31 23:59:59\n").unwrap();
        assert_eq!(ts, datetime!(2024-12-31 23:59:59));
    }

    #[test]
    fn test_parse_rejects_iso_t_separator() {
        let err = parse("2024-12-31T23:59:59").unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD HH:MM:SS"));
    }

    #[test]
    fn test_now_has_whole_seconds() {
        assert_eq!(now().nanosecond(), 0);
    }
}
