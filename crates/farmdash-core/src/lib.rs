//! Core logic for the farmdash sensor dashboard.
//!
//! This crate sits between the reading store and the front ends (the
//! `farmdash` CLI and the HTTP service). It owns everything with rules:
//!
//! - **Alert evaluation**: one canonical, overridable threshold table
//! - **Audit log**: append-only event lines and bounded tail reads
//! - **Log vault**: Fernet encryption of the audit log at rest
//! - **Dashboard controller**: submit, record events, snapshots
//! - **View routing**: home/weather/moisture/animals as an explicit value
//! - **Trends**: temperature sparklines over stored readings
//! - **Configuration**: TOML file shared by all front ends
//!
//! # Quick Start
//!
//! ```no_run
//! use farmdash_core::{Config, Dashboard};
//! use farmdash_types::Measurement;
//!
//! let config = Config::load_default()?;
//! let dashboard = Dashboard::open(&config)?;
//!
//! let submission = dashboard.submit(Measurement::new(45.0, 50.0, 7.0))?;
//! for alert in &submission.alerts {
//!     println!("[{}] {}", alert.severity, alert);
//! }
//! # Ok::<(), farmdash_core::Error>(())
//! ```

pub mod animal;
pub mod audit;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod thresholds;
pub mod trend;
pub mod vault;
pub mod view;

pub use animal::AnimalSelection;
pub use audit::AuditLog;
pub use config::{Config, ConfigError, ValidationError, default_config_path, default_data_dir};
pub use dashboard::{AlertLogPolicy, Dashboard, Snapshot, Submission};
pub use error::{Error, Result};
pub use thresholds::{Band, Comparison, ThresholdConfig, Thresholds, highest_severity};
pub use vault::KeyStatus;
pub use view::{Action, View};

// Re-export types
pub use farmdash_types::{
    AlertKind, AlertSignal, Animal, Field, LogEntry, Measurement, Reading, Severity,
};
pub use farmdash_store::{ReadingQuery, Store};
