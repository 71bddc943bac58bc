//! Configuration shared by the CLI and the HTTP service.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::thresholds::ThresholdConfig;

/// Directory holding the database, log and vault files by default.
///
/// - Linux: `~/.local/share/farmdash`
/// - macOS: `~/Library/Application Support/farmdash`
/// - Windows: `C:\Users\<user>\AppData\Local\farmdash`
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("farmdash")
}

/// Default configuration file path.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("farmdash")
        .join("config.toml")
}

/// Full configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database, log and animal file locations.
    pub storage: StorageConfig,
    /// Log encryption files.
    pub vault: VaultConfig,
    /// Alert table and policy.
    pub alerts: AlertsConfig,
    /// HTTP service settings.
    pub server: ServerConfig,
    /// Dashboard display settings.
    pub dashboard: DashboardConfig,
}

impl Config {
    /// Load configuration from the default path, or defaults if it is absent.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_or_default(&default_config_path())
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Save configuration to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Write {
            path: path.as_ref().to_path_buf(),
            source: e,
        })
    }

    /// Validate the configuration and return any errors.
    ///
    /// This checks:
    /// - No file path is empty
    /// - Server bind address is `host:port` with a non-zero port
    /// - `dashboard.tail_lines` is at least 1
    /// - Every threshold band is well formed
    ///
    /// # Example
    ///
    /// ```
    /// use farmdash_core::Config;
    ///
    /// let config = Config::default();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        errors.extend(self.storage.validate());
        errors.extend(self.vault.validate());
        errors.extend(self.alerts.thresholds.validate("alerts.thresholds"));
        errors.extend(self.server.validate());
        errors.extend(self.dashboard.validate());

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load and validate configuration from a file.
    pub fn load_validated<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_path(field: &str, path: &Path, errors: &mut Vec<ValidationError>) {
    if path.as_os_str().is_empty() {
        errors.push(ValidationError {
            field: field.to_string(),
            message: "path cannot be empty".to_string(),
        });
    }
}

/// Where readings, events and the animal selection live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database file.
    pub database: PathBuf,
    /// Audit log file.
    pub log: PathBuf,
    /// Animal selection file.
    pub animal: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let dir = default_data_dir();
        Self {
            database: farmdash_store::default_db_path(),
            log: dir.join("events.log"),
            animal: dir.join("animal.txt"),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_path("storage.database", &self.database, &mut errors);
        check_path("storage.log", &self.log, &mut errors);
        check_path("storage.animal", &self.animal, &mut errors);
        errors
    }
}

/// Log encryption files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Fernet key file.
    pub key: PathBuf,
    /// Output of `encrypt-log`.
    pub encrypted_log: PathBuf,
    /// Output of `decrypt-log`.
    pub decrypted_log: PathBuf,
}

impl Default for VaultConfig {
    fn default() -> Self {
        let dir = default_data_dir();
        Self {
            key: dir.join("secret.key"),
            encrypted_log: dir.join("events_encrypted.log"),
            decrypted_log: dir.join("events_decrypted.log"),
        }
    }
}

impl VaultConfig {
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        check_path("vault.key", &self.key, &mut errors);
        check_path("vault.encrypted_log", &self.encrypted_log, &mut errors);
        check_path("vault.decrypted_log", &self.decrypted_log, &mut errors);
        errors
    }
}

/// Alert evaluation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    /// Append one audit line per fired alert when a reading is submitted.
    pub log_alerts: bool,
    /// Threshold table.
    pub thresholds: ThresholdConfig,
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl ServerConfig {
    /// Validate server configuration.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.bind.is_empty() {
            errors.push(ValidationError {
                field: "server.bind".to_string(),
                message: "bind address cannot be empty".to_string(),
            });
            return errors;
        }

        let Some((_, port)) = self.bind.rsplit_once(':') else {
            errors.push(ValidationError {
                field: "server.bind".to_string(),
                message: format!(
                    "invalid bind address '{}': expected format 'host:port'",
                    self.bind
                ),
            });
            return errors;
        };

        match port.parse::<u16>() {
            Ok(0) => errors.push(ValidationError {
                field: "server.bind".to_string(),
                message: "port cannot be 0".to_string(),
            }),
            Err(_) => errors.push(ValidationError {
                field: "server.bind".to_string(),
                message: format!("invalid port '{}': must be a number 1-65535", port),
            }),
            Ok(_) => {}
        }

        errors
    }
}

/// Dashboard display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Number of recent log lines shown.
    pub tail_lines: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { tail_lines: 5 }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Vec<ValidationError> {
        if self.tail_lines == 0 {
            vec![ValidationError {
                field: "dashboard.tail_lines".to_string(),
                message: "must be at least 1".to_string(),
            }]
        } else {
            Vec::new()
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// A single validation error with context.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// The field path (e.g., `server.bind` or `alerts.thresholds.bands[0].limit`).
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}
