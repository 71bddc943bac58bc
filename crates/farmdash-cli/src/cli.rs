//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use farmdash_core::{Animal, View};
use farmdash_types::timestamp;
use time::PrimitiveDateTime;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Visual styling mode for output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StyleMode {
    /// Standard styling with colors
    Minimal,
    /// Rich styling with tables and full formatting (default)
    #[default]
    Rich,
    /// Plain text with no decorations (for scripting)
    Plain,
}

/// Reusable output format arguments
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Omit header row in CSV output (useful for appending)
    #[arg(long)]
    pub no_header: bool,
}

#[derive(Parser)]
#[command(name = "farmdash")]
#[command(author, version, about = "Smart farm sensor dashboard", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "FARMDASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output compact JSON (no pretty-printing)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Visual styling mode (minimal, rich, plain)
    #[arg(
        long,
        global = true,
        value_enum,
        default_value = "rich",
        env = "FARMDASH_STYLE"
    )]
    pub style: StyleMode,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and data directory
    Init,

    /// Record a manual sensor reading
    Submit {
        /// Air temperature in °C (-50 to 100)
        #[arg(short, long, allow_negative_numbers = true, value_parser = parse_temperature)]
        temperature: f64,

        /// Relative humidity in % (0 to 100)
        #[arg(short = 'H', long, value_parser = parse_humidity)]
        humidity: f64,

        /// Soil pH (0 to 14)
        #[arg(short, long, value_parser = parse_ph)]
        ph: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List stored readings, newest first
    Readings {
        /// Maximum number of readings
        #[arg(short = 'n', long)]
        limit: Option<u32>,

        /// Only readings at or after this time (YYYY-MM-DD HH:MM:SS)
        #[arg(long, value_parser = parse_timestamp)]
        since: Option<PrimitiveDateTime>,

        /// Only readings at or before this time (YYYY-MM-DD HH:MM:SS)
        #[arg(long, value_parser = parse_timestamp)]
        until: Option<PrimitiveDateTime>,

        /// Plot the temperature trend instead of listing readings
        #[arg(long, conflicts_with = "format")]
        trend: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show alerts for the latest reading
    Alerts {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Append an event to the log
    Log {
        /// Event text
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Append a simulated sensor event to the log
    Simulate,

    /// Show the most recent log events
    Events {
        /// Number of events (defaults to dashboard.tail_lines)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Encrypt the event log, generating a key on first use
    EncryptLog {
        /// Log file to encrypt (defaults to storage.log)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Destination of the encrypted log (defaults to vault.encrypted_log)
        #[arg(long)]
        to: Option<PathBuf>,
    },

    /// Decrypt a previously encrypted event log
    DecryptLog {
        /// Encrypted log (defaults to vault.encrypted_log)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Destination of the plaintext (defaults to vault.decrypted_log)
        #[arg(long)]
        to: Option<PathBuf>,
    },

    /// Manage the animal shown in the animals view
    Animal {
        #[command(subcommand)]
        action: AnimalAction,
    },

    /// Show dashboard views
    Dashboard {
        /// View to show first
        #[arg(long, default_value = "home", value_parser = parse_view)]
        view: View,

        /// Navigate views with single-key commands read from stdin
        #[arg(short, long)]
        interactive: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum AnimalAction {
    /// Select an animal (monkey, deer, boar)
    Set {
        #[arg(value_parser = parse_animal)]
        animal: Animal,
    },

    /// Show the selected animal
    Show,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_in_range(s: &str, min: f64, max: f64) -> Result<f64, String> {
    let value: f64 = s.trim().parse().map_err(|_| format!("'{}' is not a number", s))?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(format!("must be between {} and {}", min, max))
    }
}

fn parse_temperature(s: &str) -> Result<f64, String> {
    parse_in_range(s, -50.0, 100.0)
}

fn parse_humidity(s: &str) -> Result<f64, String> {
    parse_in_range(s, 0.0, 100.0)
}

fn parse_ph(s: &str) -> Result<f64, String> {
    parse_in_range(s, 0.0, 14.0)
}

fn parse_timestamp(s: &str) -> Result<PrimitiveDateTime, String> {
    timestamp::parse(s).map_err(|_| format!("expected YYYY-MM-DD HH:MM:SS, got '{}'", s))
}

fn parse_animal(s: &str) -> Result<Animal, String> {
    s.parse().map_err(|e: farmdash_types::ParseError| e.to_string())
}

fn parse_view(s: &str) -> Result<View, String> {
    s.parse().map_err(|e: farmdash_types::ParseError| e.to_string())
}
