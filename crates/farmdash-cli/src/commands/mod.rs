//! Command implementations for the CLI.

use std::path::{Path, PathBuf};

use farmdash_core::Config;

use crate::format::FormatOptions;

mod alerts;
mod animal;
mod config;
mod dashboard;
mod events;
mod init;
mod readings;
mod submit;
mod vault;

pub use alerts::cmd_alerts;
pub use animal::cmd_animal;
pub use config::cmd_config;
pub use dashboard::cmd_dashboard;
pub use events::{cmd_events, cmd_log, cmd_simulate};
pub use init::cmd_init;
pub use readings::{ReadingsArgs, cmd_readings};
pub use submit::cmd_submit;
pub use vault::{cmd_decrypt_log, cmd_encrypt_log};

/// Settings shared by every command.
pub struct CommandContext {
    /// Effective configuration.
    pub config: Config,
    /// Where the configuration was loaded from.
    pub config_path: PathBuf,
    /// Output formatting.
    pub opts: FormatOptions,
    /// File to write output to instead of stdout.
    pub output: Option<PathBuf>,
    /// Suppress confirmations.
    pub quiet: bool,
}

impl CommandContext {
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }
}
