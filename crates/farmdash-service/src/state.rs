//! Application state shared across handlers.
//!
//! The dashboard (store, audit log and animal file) sits behind a single
//! mutex, so every request touching them runs one at a time, the same as
//! the single-process front ends.

use std::sync::Arc;

use tokio::sync::Mutex;

use farmdash_core::{Config, Dashboard};

/// Shared application state.
pub struct AppState {
    /// Store, audit log and animal selection.
    pub dashboard: Mutex<Dashboard>,
    /// Configuration the service was started with.
    pub config: Config,
}

impl AppState {
    /// Create new application state.
    pub fn new(dashboard: Dashboard, config: Config) -> Arc<Self> {
        Arc::new(Self {
            dashboard: Mutex::new(dashboard),
            config,
        })
    }
}
