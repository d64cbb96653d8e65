//! Tabletop - two-player grid games in the terminal.
//!
//! The rules live in [`tabletop_core`]; this crate seats players at a game
//! and runs the turn loop, with a console and a full-screen front end.
//!
//! # Architecture
//!
//! - **Players**: humans typing moves, random and searching computers
//! - **Manager**: the turn loop, reporting progress as [`GameEvent`]s
//! - **Front ends**: line console and ratatui terminal UI
//! - **Record**: JSON summary of a finished session
//!
//! # Example
//!
//! ```no_run
//! use tabletop::{AppConfig, PlayerKind, PlayerSpec, SessionSpec, console, line_channel};
//! use tabletop_core::GameKind;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let spec = SessionSpec {
//!     game: GameKind::ConnectFour,
//!     x: PlayerSpec::new(PlayerKind::Smart, None, "X"),
//!     o: PlayerSpec::new(PlayerKind::Random, None, "O"),
//! };
//! let (_tx, input) = line_channel();
//! let report = console::play_session(&spec, &AppConfig::default(), &input, None).await?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
pub mod console;
mod manager;
mod players;
mod record;
mod session;
pub mod tui;

pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_FILE};
pub use manager::{GameEvent, GameManager, Outcome, SessionLimits};
pub use players::{
    HumanPlayer, LineInput, Player, PlayerError, PlayerKind, PlayerSpec, RandomPlayer,
    SmartPlayer, build_player, line_channel,
};
pub use record::{MoveRecord, SessionReport};
pub use session::{SessionHandle, SessionSpec, build_manager, spawn_session};
