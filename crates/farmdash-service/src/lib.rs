//! HTTP JSON API for the farmdash sensor dashboard.
//!
//! This crate exposes the same operations as the `farmdash` CLI over HTTP:
//! submitting readings, listing and exporting them, checking alerts,
//! reading and writing the audit log and the animal selection.
//!
//! # REST API Endpoints
//!
//! - `GET /api/health` - Service health check
//! - `GET /api/readings` - Readings, newest first (`since`, `until`, `limit`, `offset`)
//! - `POST /api/readings` - Submit a reading (`201` with stored reading and alerts)
//! - `GET /api/readings.csv` - CSV export
//! - `GET /api/alerts` - Alerts for the newest reading
//! - `GET /api/dashboard` - Readings, alerts, recent events and animal in one call
//! - `GET /api/events?n=5` - Most recent audit log lines
//! - `POST /api/events` - Append an event
//! - `POST /api/events/simulate` - Append the simulated sensor event
//! - `GET /api/animal`, `PUT /api/animal` - Detected animal
//!
//! # Configuration
//!
//! The service reads the shared configuration from
//! `~/.config/farmdash/config.toml`:
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:8080"
//!
//! [storage]
//! database = "~/.local/share/farmdash/sensor_data.db"
//! log = "~/.local/share/farmdash/events.log"
//!
//! [alerts]
//! log_alerts = false
//! ```

pub mod api;
pub mod state;

pub use state::AppState;
