//! SQLite persistence for farmdash sensor readings.
//!
//! This crate owns the single `readings` table: initialize the schema,
//! insert a reading, read readings back. Nothing else in the workspace
//! touches the database file directly.
//!
//! # Features
//!
//! - Idempotent schema initialization, safe on every start
//! - Monotonic, store-assigned ids and timestamps
//! - Newest-first retrieval with optional time range and pagination
//! - CSV export
//!
//! # Example
//!
//! ```no_run
//! use farmdash_store::Store;
//!
//! let store = Store::open_default()?;
//!
//! let id = store.insert(22.4, 50.0, 7.0)?;
//! let readings = store.fetch_all()?;
//! assert_eq!(readings[0].id, id);
//! # Ok::<(), farmdash_store::Error>(())
//! ```

mod error;
mod export;
mod queries;
mod schema;
mod store;

pub use error::{Error, Result};
pub use export::{CSV_HEADER, to_csv, write_csv};
pub use queries::ReadingQuery;
pub use schema::SCHEMA_VERSION;
pub use store::Store;

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/farmdash/sensor_data.db`
/// - macOS: `~/Library/Application Support/farmdash/sensor_data.db`
/// - Windows: `C:\Users\<user>\AppData\Local\farmdash\sensor_data.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("farmdash")
        .join("sensor_data.db")
}
