//! Main store implementation.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use farmdash_types::{Measurement, Reading, timestamp};

use crate::error::{Error, Result};
use crate::queries::ReadingQuery;
use crate::schema;

/// Row as it comes out of SQLite, before the timestamp is parsed.
///
/// SQLite stores NaN as NULL, and tables adopted from older databases allow
/// NULL columns, so values are read as optional.
type RawRow = (i64, String, Option<f64>, Option<f64>, Option<f64>);

/// SQLite-based store for sensor readings.
///
/// The store only ever appends: there is no update or delete operation.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create a database at the given path.
    ///
    /// The schema is initialized before returning.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;

        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Ensure the readings table exists.
    ///
    /// Idempotent: calling it on an initialized database changes nothing.
    pub fn initialize(&self) -> Result<()> {
        schema::initialize(&self.conn)
    }
}

// Write operations
impl Store {
    /// Record a reading and return its id.
    ///
    /// The timestamp is taken from the local clock; values are stored as
    /// given, without range checks. NaN is stored as NULL and read back as
    /// NaN.
    pub fn insert(&self, temperature: f64, humidity: f64, ph: f64) -> Result<i64> {
        let reading = self.insert_measurement(&Measurement::new(temperature, humidity, ph))?;
        Ok(reading.id)
    }

    /// Record a measurement and return the stored reading.
    pub fn insert_measurement(&self, measurement: &Measurement) -> Result<Reading> {
        let ts = timestamp::now();

        self.conn.execute(
            "INSERT INTO readings (timestamp, temperature, humidity, ph) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                timestamp::format(&ts),
                measurement.temperature,
                measurement.humidity,
                measurement.ph,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("Inserted reading {} at {}", id, timestamp::format(&ts));

        Ok(Reading {
            id,
            timestamp: ts,
            temperature: measurement.temperature,
            humidity: measurement.humidity,
            ph: measurement.ph,
        })
    }
}

// Read operations
impl Store {
    /// Every stored reading, newest first.
    ///
    /// Returns an empty vector when nothing has been recorded yet.
    pub fn fetch_all(&self) -> Result<Vec<Reading>> {
        self.query(&ReadingQuery::new())
    }

    /// Query readings with filters.
    pub fn query(&self, query: &ReadingQuery) -> Result<Vec<Reading>> {
        let sql = query.build_sql();
        let (_, params) = query.build_where();

        debug!("Executing query: {}", sql);

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params.iter()), raw_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        rows.into_iter().map(to_reading).collect()
    }

    /// The most recently stored reading.
    pub fn latest(&self) -> Result<Option<Reading>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, timestamp, temperature, humidity, ph FROM readings ORDER BY id DESC LIMIT 1",
                [],
                raw_row,
            )
            .optional()?;

        row.map(to_reading).transpose()
    }

    /// Count stored readings.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM readings", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn raw_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn to_reading((id, ts, temperature, humidity, ph): RawRow) -> Result<Reading> {
    let timestamp =
        timestamp::parse(&ts).map_err(|_| Error::InvalidTimestamp { id, value: ts })?;
    let value = |v: Option<f64>| v.unwrap_or(f64::NAN);
    Ok(Reading {
        id,
        timestamp,
        temperature: value(temperature),
        humidity: value(humidity),
        ph: value(ph),
    })
}
