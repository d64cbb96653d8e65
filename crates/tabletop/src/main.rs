//! Tabletop - command-line entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PlayArgs};
use strum::IntoEnumIterator;
use tabletop::{AppConfig, PlayerSpec, SessionSpec, console, tui};
use tabletop_core::{GameKind, input_hint};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Some(Command::Tui(args)) => {
            init_file_logging(&config)?;
            tui::run_tui(session_spec(&args), config).await
        }
        Some(Command::Play(args)) => {
            init_stderr_logging();
            let input = console::spawn_stdin_reader();
            console::play_session(&session_spec(&args), &config, &input, args.record.as_deref())
                .await
                .map(|_| ())
        }
        Some(Command::List) => {
            list_games();
            Ok(())
        }
        Some(Command::Menu) | None => {
            init_stderr_logging();
            console::run_menu(&config).await
        }
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(depth) = cli.depth {
        config = config.with_smart_depth(depth);
    }
    if let Some(delay) = cli.delay {
        config = config.with_think_delay_ms(delay);
    }
    Ok(config)
}

fn session_spec(args: &PlayArgs) -> SessionSpec {
    SessionSpec {
        game: args.game,
        x: PlayerSpec::new(args.x, args.x_name.clone(), "X"),
        o: PlayerSpec::new(args.o, args.o_name.clone(), "O"),
    }
}

/// Console modes log to stderr, quiet unless `RUST_LOG` says otherwise.
fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
    debug!("Logging to stderr");
}

/// The terminal UI owns the screen, so logs go to a file.
fn init_file_logging(config: &AppConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file()).with_context(|| {
        format!("Failed to create log file {}", config.log_file().display())
    })?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    info!("Starting Tabletop TUI");
    Ok(())
}

fn list_games() {
    for kind in GameKind::iter() {
        println!(
            "{:>2}  {:<14} {:<24} {}",
            kind.menu_number(),
            kind.id(),
            kind.title(),
            input_hint(kind)
        );
    }
}
