//! Example: Recording a Reading
//!
//! This example stores one manual reading in a scratch data directory,
//! prints the alerts it raises and the resulting audit log tail.
//!
//! Run with: `cargo run --example submit_reading -- <TEMP> <HUMIDITY> <PH>`

use std::env;

use farmdash_core::{Config, Dashboard, Measurement};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: {} <TEMPERATURE> <HUMIDITY> <PH>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} 45 50 7", args[0]);
        std::process::exit(1);
    }
    let temperature: f64 = args[1].parse()?;
    let humidity: f64 = args[2].parse()?;
    let ph: f64 = args[3].parse()?;

    let dir = tempfile::tempdir()?;
    let mut config = Config::default();
    config.storage.database = dir.path().join("sensor_data.db");
    config.storage.log = dir.path().join("events.log");
    config.storage.animal = dir.path().join("animal.txt");
    config.alerts.log_alerts = true;

    let dashboard = Dashboard::open(&config)?;
    let submission = dashboard.submit(Measurement::new(temperature, humidity, ph))?;

    println!("Stored reading #{}", submission.reading.id);
    if submission.alerts.is_empty() {
        println!("All readings within range");
    }
    for alert in &submission.alerts {
        println!("[{}] {} - {}", alert.severity, alert, alert.kind.action());
    }

    println!();
    println!("Audit log:");
    for line in dashboard.log().tail(10)? {
        println!("  {}", line);
    }

    Ok(())
}
