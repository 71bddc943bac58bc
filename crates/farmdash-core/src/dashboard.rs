//! Dashboard controller.
//!
//! Ties the reading store, the audit log, the alert evaluator and the animal
//! selection together the way the front ends use them. Store and log are
//! written one after the other with no shared transaction: a failed insert
//! aborts the submission, a failed log append only loses the log line.

use serde::Serialize;
use tracing::{info, warn};

use farmdash_store::Store;
use farmdash_types::{AlertSignal, Animal, LogEntry, Measurement, Reading};

use crate::animal::AnimalSelection;
use crate::audit::AuditLog;
use crate::config::Config;
use crate::error::Result;
use crate::thresholds::Thresholds;

/// Event recorded by [`Dashboard::simulate_event`].
pub const SIMULATED_EVENT: &str = "Simulated sensor event";

/// Whether fired alerts are also written to the audit log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertLogPolicy {
    pub log_alerts: bool,
}

/// Outcome of a manual submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    /// The reading as stored.
    pub reading: Reading,
    /// Alerts raised by the stored reading.
    pub alerts: Vec<AlertSignal>,
    /// Whether the submission line reached the audit log.
    pub logged: bool,
}

/// Everything a dashboard view needs, read at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// All readings, newest first.
    pub readings: Vec<Reading>,
    /// Alerts for the newest reading.
    pub alerts: Vec<AlertSignal>,
    /// Most recent log lines, oldest first.
    pub events: Vec<String>,
    /// Currently detected animal.
    pub animal: Option<Animal>,
}

impl Snapshot {
    pub fn latest(&self) -> Option<&Reading> {
        self.readings.first()
    }
}

pub struct Dashboard {
    store: Store,
    log: AuditLog,
    animal: AnimalSelection,
    thresholds: Thresholds,
    policy: AlertLogPolicy,
}

impl Dashboard {
    pub fn new(store: Store, log: AuditLog, animal: AnimalSelection, thresholds: Thresholds) -> Self {
        Self {
            store,
            log,
            animal,
            thresholds,
            policy: AlertLogPolicy::default(),
        }
    }

    /// Set the alert logging policy.
    #[must_use]
    pub fn with_policy(mut self, policy: AlertLogPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Open every backing file named in `config`.
    pub fn open(config: &Config) -> Result<Self> {
        let store = Store::open(&config.storage.database)?;
        let dashboard = Self::new(
            store,
            AuditLog::new(&config.storage.log),
            AnimalSelection::new(&config.storage.animal),
            Thresholds::new(config.alerts.thresholds.clone()),
        )
        .with_policy(AlertLogPolicy {
            log_alerts: config.alerts.log_alerts,
        });
        Ok(dashboard)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn log(&self) -> &AuditLog {
        &self.log
    }

    pub fn animal(&self) -> &AnimalSelection {
        &self.animal
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn policy(&self) -> AlertLogPolicy {
        self.policy
    }

    /// Record a manually entered measurement.
    ///
    /// The insert must succeed for the submission to count. Log lines are
    /// best effort.
    pub fn submit(&self, measurement: Measurement) -> Result<Submission> {
        let reading = self.store.insert_measurement(&measurement)?;
        info!("Stored reading {}", reading.id);

        let logged = self.log_best_effort(&manual_input_message(&measurement));

        let alerts = self.thresholds.evaluate_reading(&reading);
        if self.policy.log_alerts {
            for alert in &alerts {
                self.log_best_effort(&format!("Alert ({}): {}", alert.severity, alert));
            }
        }

        Ok(Submission {
            reading,
            alerts,
            logged,
        })
    }

    /// Append an arbitrary event to the audit log.
    pub fn record_event(&self, message: &str) -> Result<LogEntry> {
        self.log.append(message)
    }

    /// Append the canned simulated sensor event.
    pub fn simulate_event(&self) -> Result<LogEntry> {
        self.log.append(SIMULATED_EVENT)
    }

    /// Alerts for the newest stored reading; empty when there are none.
    pub fn latest_alerts(&self) -> Result<Vec<AlertSignal>> {
        Ok(self
            .store
            .latest()?
            .map(|r| self.thresholds.evaluate_reading(&r))
            .unwrap_or_default())
    }

    /// Read readings, alerts, recent events and the animal selection.
    ///
    /// An unreadable animal file shows as no selection.
    pub fn snapshot(&self, tail_lines: usize) -> Result<Snapshot> {
        let readings = self.store.fetch_all()?;
        let alerts = readings
            .first()
            .map(|r| self.thresholds.evaluate_reading(r))
            .unwrap_or_default();
        let events = self.log.tail(tail_lines)?;
        let animal = self.animal.get().unwrap_or_else(|e| {
            warn!("Ignoring animal selection: {}", e);
            None
        });

        Ok(Snapshot {
            readings,
            alerts,
            events,
            animal,
        })
    }

    fn log_best_effort(&self, message: &str) -> bool {
        match self.log.append(message) {
            Ok(_) => true,
            Err(e) => {
                warn!("Failed to write audit log: {}", e);
                false
            }
        }
    }
}

/// Audit line for a manual submission.
///
/// Values use the shortest round-trip form with at least one decimal, so
/// `50` is written as `50.0`.
pub fn manual_input_message(m: &Measurement) -> String {
    format!(
        "Manual input: T={:?}, H={:?}, pH={:?}",
        m.temperature, m.humidity, m.ph
    )
}
