//! Command-line interface for tabletop.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tabletop::PlayerKind;
use tabletop_core::GameKind;

/// Tabletop - two-player grid games in the terminal
#[derive(Parser, Debug)]
#[command(name = "tabletop")]
#[command(about = "Thirteen tic-tac-toe variants for humans and computers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ./tabletop.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for computer players and random board events
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Search depth for smart players
    #[arg(long, global = true)]
    pub depth: Option<u32>,

    /// Computer think delay in milliseconds
    #[arg(long, global = true)]
    pub delay: Option<u64>,

    /// Subcommand to run; the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive console menu
    Menu,

    /// Play one game on the console
    Play(PlayArgs),

    /// Play one game in the full-screen terminal UI
    Tui(PlayArgs),

    /// List the available games
    List,
}

/// Game and seating for a single session.
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Game id (e.g. `connect-four`) or menu number
    #[arg(value_parser = parse_game)]
    pub game: GameKind,

    /// Who plays X
    #[arg(long, default_value = "human")]
    pub x: PlayerKind,

    /// Who plays O
    #[arg(long, default_value = "smart")]
    pub o: PlayerKind,

    /// Name for the X player
    #[arg(long)]
    pub x_name: Option<String>,

    /// Name for the O player
    #[arg(long)]
    pub o_name: Option<String>,

    /// Write a JSON record of the session here
    #[arg(long)]
    pub record: Option<PathBuf>,
}

fn parse_game(s: &str) -> Result<GameKind, String> {
    s.parse::<GameKind>().map_err(|e| e.to_string())
}
