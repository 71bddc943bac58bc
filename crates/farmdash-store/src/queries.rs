//! Query builder for stored readings.
//!
//! [`ReadingQuery`] follows the builder pattern for filtering and paginating
//! readings. Results are ordered by `id`, which is also insertion order, so
//! rows that share a timestamp keep a stable order.
//!
//! # Example
//!
//! ```
//! use farmdash_store::{ReadingQuery, Store};
//! use time::macros::datetime;
//!
//! let store = Store::open_in_memory()?;
//!
//! // The ten newest readings since the start of May
//! let query = ReadingQuery::new()
//!     .since(datetime!(2024-05-01 00:00:00))
//!     .limit(10);
//!
//! let readings = store.query(&query)?;
//! assert!(readings.is_empty());
//! # Ok::<(), farmdash_store::Error>(())
//! ```

use farmdash_types::timestamp;
use time::PrimitiveDateTime;

/// Fluent query builder for readings.
///
/// Use this to construct queries for [`Store::query`](crate::Store::query).
/// All filter methods are optional and can be chained in any order.
///
/// By default, queries return results ordered by `id` descending
/// (newest first).
#[derive(Debug, Default, Clone)]
pub struct ReadingQuery {
    /// Filter readings stored at or after this time.
    pub since: Option<PrimitiveDateTime>,
    /// Filter readings stored at or before this time.
    pub until: Option<PrimitiveDateTime>,
    /// Maximum number of results.
    pub limit: Option<u32>,
    /// Offset for pagination.
    pub offset: Option<u32>,
    /// Order by id descending (newest first).
    pub newest_first: bool,
}

impl ReadingQuery {
    /// Create a new query with default settings.
    ///
    /// Default behavior:
    /// - No time range filter
    /// - No limit (all matching records)
    /// - Ordered by newest first
    pub fn new() -> Self {
        Self {
            newest_first: true,
            ..Default::default()
        }
    }

    /// Filter to readings stored at or after this time.
    pub fn since(mut self, time: PrimitiveDateTime) -> Self {
        self.since = Some(time);
        self
    }

    /// Filter to readings stored at or before this time.
    pub fn until(mut self, time: PrimitiveDateTime) -> Self {
        self.until = Some(time);
        self
    }

    /// Limit the maximum number of results returned.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip the first N results.
    ///
    /// Use with `limit()` for pagination. For example, to get page 2
    /// with 50 items per page: `.limit(50).offset(50)`.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Order results by oldest first (ascending `id`).
    pub fn oldest_first(mut self) -> Self {
        self.newest_first = false;
        self
    }

    /// Build the SQL WHERE clause and parameters.
    ///
    /// Timestamps are stored as fixed-width text, so text comparison is
    /// chronological.
    pub(crate) fn build_where(&self) -> (String, Vec<String>) {
        let mut conditions = Vec::new();
        let mut params = Vec::new();

        if let Some(since) = self.since {
            conditions.push("timestamp >= ?");
            params.push(timestamp::format(&since));
        }

        if let Some(until) = self.until {
            conditions.push("timestamp <= ?");
            params.push(timestamp::format(&until));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        (where_clause, params)
    }

    /// Build the full SQL query.
    pub(crate) fn build_sql(&self) -> String {
        let (where_clause, _) = self.build_where();
        let order = if self.newest_first { "DESC" } else { "ASC" };

        let mut sql = format!(
            "SELECT id, timestamp, temperature, humidity, ph FROM readings {} ORDER BY id {}",
            where_clause, order
        );

        // SQLite requires LIMIT before OFFSET; -1 means unlimited.
        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => sql.push_str(&format!(" LIMIT {} OFFSET {}", limit, offset)),
            (Some(limit), None) => sql.push_str(&format!(" LIMIT {}", limit)),
            (None, Some(offset)) => sql.push_str(&format!(" LIMIT -1 OFFSET {}", offset)),
            (None, None) => {}
        }

        sql
    }
}
