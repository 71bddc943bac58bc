//! Command-line interface for the farmdash sensor dashboard.
//!
//! The `farmdash` binary records manual readings from a small farm
//! (air temperature, humidity, soil pH), keeps an append-only event log,
//! and shows the same dashboard views as the HTTP service in the terminal.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `init` | Create the data directory and database |
//! | `submit` | Record a reading and show its alerts |
//! | `readings` | List stored readings, newest first |
//! | `alerts` | Alerts for the latest reading |
//! | `log` | Append an event to the log |
//! | `simulate` | Append a simulated sensor event |
//! | `events` | Show the most recent log events |
//! | `encrypt-log` | Encrypt the event log with the Fernet key |
//! | `decrypt-log` | Decrypt an encrypted log |
//! | `animal` | Select or show the detected animal |
//! | `dashboard` | Render views; `--interactive` reads keys from stdin |
//! | `config` | Show, locate or create the configuration file |
//! | `completions` | Generate shell completions |
//!
//! # Output Formats
//!
//! - **Text** (default): Human-readable colored output
//! - **JSON**: Machine-readable JSON format
//! - **CSV**: Same layout as the service's `/api/readings.csv`
//!
//! # Configuration
//!
//! The CLI reads `~/.config/farmdash/config.toml` (or platform equivalent),
//! overridable with `--config` or `FARMDASH_CONFIG`. Every field has a
//! default, so the file is optional. See `farmdash config show`.
//!
//! # Environment Variables
//!
//! - `FARMDASH_CONFIG`: Configuration file path
//! - `FARMDASH_STYLE`: Output style (`rich`, `minimal`, `plain`)
//! - `NO_COLOR`: Disable colored output when set
//! - `RUST_LOG`: Log filter when neither `--quiet` nor `--verbose` is given
//!
//! # Examples
//!
//! Record a reading:
//! ```bash
//! farmdash submit --temperature 22.4 --humidity 50 --ph 7
//! ```
//!
//! Export every reading as CSV:
//! ```bash
//! farmdash readings --format csv --output readings.csv
//! ```
//!
//! Plot today's temperature trend:
//! ```bash
//! farmdash readings --trend --since "2024-05-01 00:00:00"
//! ```
//!
//! Browse the views:
//! ```bash
//! farmdash dashboard --interactive
//! ```

// This crate is primarily a binary CLI application.
// The entry point and command implementations are in main.rs.

// Re-export core dependencies for convenience
pub use farmdash_core;
pub use farmdash_types;
