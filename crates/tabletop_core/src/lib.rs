//! Tabletop core - rule engines for two-player grid games.
//!
//! Every variant implements the [`Game`] capability set: apply a move,
//! report the terminal status, list legal moves and render the board.
//! [`AnyGame`] wraps all variants in one tagged union so a session can
//! pick its game at runtime without trait objects.
//!
//! # Example
//!
//! ```
//! use tabletop_core::{AnyGame, Game, GameKind, GameOptions, Mark, Move};
//!
//! let mut game = AnyGame::new(GameKind::Misere, &GameOptions::default());
//! game.apply(&Move::place(Mark::X, 1, 1)).unwrap();
//! assert_eq!(game.to_move(), Mark::O);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod any;
mod dictionary;
mod error;
mod game;
pub mod games;
mod grid;
mod mark;
mod moves;
mod notation;
mod status;
pub mod strategy;

pub use any::{AnyGame, GameOptions};
pub use dictionary::{Dictionary, EmptyDictionary, WORD_LEN};
pub use error::MoveError;
pub use game::{Game, GameKind};
pub use grid::{DIRECTIONS, Grid, render_grid};
pub use mark::{Cell, Mark};
pub use moves::{Action, Move};
pub use notation::{InputShape, input_hint, parse_action};
pub use status::{Effect, GameStatus};
