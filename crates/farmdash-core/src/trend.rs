//! Temperature trend over stored readings.
//!
//! Trends are rendered as one-line sparklines of block characters, oldest
//! reading on the left.

use farmdash_types::Reading;

/// Number of columns used when a front end has no width of its own.
pub const DEFAULT_WIDTH: usize = 40;

const BLOCKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Temperature series, oldest first.
///
/// `readings` are expected newest first, as the store returns them.
/// Non-finite temperatures are skipped.
#[must_use]
pub fn temperature_series(readings: &[Reading]) -> Vec<f64> {
    readings
        .iter()
        .rev()
        .map(|r| r.temperature)
        .filter(|t| t.is_finite())
        .collect()
}

/// Resample `data` to exactly `width` points.
///
/// Shorter series are stretched by repeating values, longer ones are
/// averaged into buckets.
#[must_use]
pub fn resample(data: &[f64], width: usize) -> Vec<f64> {
    if data.is_empty() || width == 0 {
        return Vec::new();
    }

    if data.len() == width {
        return data.to_vec();
    }

    let mut result = Vec::with_capacity(width);

    if data.len() < width {
        for i in 0..width {
            let src = i * (data.len() - 1) / (width - 1).max(1);
            result.push(data[src.min(data.len() - 1)]);
        }
    } else {
        let bucket = data.len() as f64 / width as f64;
        for i in 0..width {
            let start = (i as f64 * bucket) as usize;
            let end = (((i + 1) as f64 * bucket) as usize).min(data.len());

            if start < end {
                let sum: f64 = data[start..end].iter().sum();
                result.push(sum / (end - start) as f64);
            } else if start < data.len() {
                result.push(data[start]);
            }
        }
    }

    result
}

/// Render `data` as block characters scaled between its minimum and maximum.
///
/// A flat series renders at mid height.
#[must_use]
pub fn sparkline(data: &[f64]) -> String {
    let (min, max) = bounds(data).unwrap_or((0.0, 0.0));
    let span = max - min;
    let top = (BLOCKS.len() - 1) as f64;

    data.iter()
        .map(|v| {
            if span <= f64::EPSILON {
                return BLOCKS[BLOCKS.len() / 2 - 1];
            }
            let level = ((v - min) / span * top).round() as usize;
            BLOCKS[level.min(BLOCKS.len() - 1)]
        })
        .collect()
}

/// Smallest and largest value, or `None` for an empty series.
#[must_use]
pub fn bounds(data: &[f64]) -> Option<(f64, f64)> {
    data.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// One-line temperature trend, or `None` when there is nothing to plot.
///
/// At most `width` columns are used; series shorter than that are drawn one
/// column per reading.
#[must_use]
pub fn temperature_line(readings: &[Reading], width: usize) -> Option<String> {
    let series = temperature_series(readings);
    let (min, max) = bounds(&series)?;
    let columns = series.len().min(width);
    Some(format!(
        "{} ({} to {} °C)",
        sparkline(&resample(&series, columns)),
        min,
        max
    ))
}
