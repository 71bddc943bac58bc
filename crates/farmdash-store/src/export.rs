//! CSV export of stored readings.

use std::io::Write;

use farmdash_types::{Reading, timestamp};

use crate::error::Result;

/// Header row written before the readings.
pub const CSV_HEADER: [&str; 5] = ["ID", "Timestamp", "Temperature (°C)", "Humidity (%)", "pH"];

/// Write readings as CSV, in the order given.
pub fn write_csv<W: Write>(writer: W, readings: &[Reading], header: bool) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    if header {
        wtr.write_record(CSV_HEADER)?;
    }

    for r in readings {
        wtr.write_record([
            r.id.to_string(),
            timestamp::format(&r.timestamp),
            r.temperature.to_string(),
            r.humidity.to_string(),
            r.ph.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render readings as a CSV string with a header row.
pub fn to_csv(readings: &[Reading]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, readings, true)?;
    // csv only writes the UTF-8 we hand it
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
