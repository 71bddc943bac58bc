use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use farmdash_core::{Config, Measurement};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod format;
mod style;
mod util;

use cli::{Cli, Commands, ConfigAction};
use commands::{CommandContext, ReadingsArgs};
use format::FormatOptions;

fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "farmdash", &mut io::stdout());
        return Ok(());
    }

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config_path = config::resolve_path(cli.config.as_deref());
    // Locating or (re)creating the file must work even when it is broken
    let config = match &cli.command {
        Commands::Config {
            action: ConfigAction::Path | ConfigAction::Init { .. },
        } => Config::default(),
        _ => config::load(&config_path)?,
    };

    let ctx = CommandContext {
        config,
        config_path,
        opts: FormatOptions::new(cli.no_color, cli.style).with_compact(cli.compact),
        output: cli.output,
        quiet: cli.quiet,
    };

    run(ctx, cli.command)
}

fn run(mut ctx: CommandContext, command: Commands) -> Result<()> {
    let open = |ctx: &CommandContext| config::open_dashboard(&ctx.config);

    match command {
        Commands::Init => commands::cmd_init(&ctx),
        Commands::Submit {
            temperature,
            humidity,
            ph,
            format,
        } => commands::cmd_submit(
            &ctx,
            &open(&ctx)?,
            Measurement::new(temperature, humidity, ph),
            format,
        ),
        Commands::Readings {
            limit,
            since,
            until,
            trend,
            output,
        } => {
            ctx.opts = ctx.opts.with_no_header(output.no_header);
            let args = ReadingsArgs {
                limit,
                since,
                until,
                trend,
                format: output.format,
            };
            commands::cmd_readings(&ctx, &open(&ctx)?, args)
        }
        Commands::Alerts { format } => commands::cmd_alerts(&ctx, &open(&ctx)?, format),
        Commands::Log { message } => commands::cmd_log(&ctx, &open(&ctx)?, &message.join(" ")),
        Commands::Simulate => commands::cmd_simulate(&ctx, &open(&ctx)?),
        Commands::Events { count, format } => {
            commands::cmd_events(&ctx, &open(&ctx)?, count, format)
        }
        Commands::EncryptLog { input, to } => commands::cmd_encrypt_log(&ctx, input, to),
        Commands::DecryptLog { input, to } => commands::cmd_decrypt_log(&ctx, input, to),
        Commands::Animal { action } => commands::cmd_animal(&ctx, &open(&ctx)?, action),
        Commands::Dashboard { view, interactive } => {
            commands::cmd_dashboard(&ctx, &open(&ctx)?, view, interactive)
        }
        Commands::Config { action } => commands::cmd_config(&ctx, action),
        // Handled before tracing is installed
        Commands::Completions { .. } => Ok(()),
    }
}
