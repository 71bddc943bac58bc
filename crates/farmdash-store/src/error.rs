//! Error types for farmdash-store.

use std::path::PathBuf;

/// Result type for farmdash-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in farmdash-store.
///
/// Every variant means the operation that raised it did not take effect; a
/// failed insert is "not recorded".
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error from SQLite (schema, write or read failure).
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create database directory.
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A stored timestamp could not be parsed.
    #[error("Invalid timestamp in row {id}: {value}")]
    InvalidTimestamp { id: i64, value: String },

    /// The database schema is newer than this build understands.
    #[error("Database schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: i32, supported: i32 },

    /// CSV export error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
