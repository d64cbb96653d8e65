//! Move values produced by players and consumed by boards.

use crate::mark::{Cell, Mark};
use serde::{Deserialize, Serialize};

/// What a player does on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Put the mover's own mark on a cell.
    Place(Cell),
    /// Write a letter on a cell.
    Letter {
        /// Target cell.
        cell: Cell,
        /// Upper-case letter.
        letter: char,
    },
    /// Write a number on a cell.
    Number {
        /// Target cell.
        cell: Cell,
        /// The number written.
        value: u8,
    },
    /// Drop a token into a column; it falls to the lowest empty row.
    Drop {
        /// Zero-based column.
        column: usize,
    },
    /// Slide one of the mover's tokens to an adjacent cell.
    Slide {
        /// Cell holding the token.
        from: Cell,
        /// Destination cell.
        to: Cell,
    },
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place(cell) => write!(f, "{} {}", cell.row, cell.col),
            Action::Letter { cell, letter } => write!(f, "{} {} {}", letter, cell.row, cell.col),
            Action::Number { cell, value } => write!(f, "{} {} {}", value, cell.row, cell.col),
            Action::Drop { column } => write!(f, "{}", column),
            Action::Slide { from, to } => {
                write!(f, "{} {} {} {}", from.row, from.col, to.row, to.col)
            }
        }
    }
}

/// A side's chosen action for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}: {}", mark, action)]
pub struct Move {
    /// The side making the move.
    pub mark: Mark,
    /// What the side does.
    pub action: Action,
}

impl Move {
    /// Creates a move.
    pub fn new(mark: Mark, action: Action) -> Self {
        Self { mark, action }
    }

    /// Shorthand for a placement.
    pub fn place(mark: Mark, row: usize, col: usize) -> Self {
        Self::new(mark, Action::Place(Cell::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_input_notation() {
        let mv = Move::new(
            Mark::O,
            Action::Slide {
                from: Cell::new(0, 1),
                to: Cell::new(1, 1),
            },
        );
        assert_eq!(mv.to_string(), "O: 0 1 1 1");
    }

    #[test]
    fn test_json_keeps_payload() {
        let mv = Move::new(
            Mark::X,
            Action::Letter {
                cell: Cell::new(2, 0),
                letter: 'S',
            },
        );
        let json = serde_json::to_string(&mv).unwrap();
        assert!(json.contains("\"letter\":\"S\""), "{}", json);
        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mv);

        let status: crate::status::GameStatus =
            serde_json::from_str(r#"{"Won":"O"}"#).unwrap();
        assert_eq!(status.winner(), Some(Mark::O));
    }
}
