//! Game status and move side effects.

use crate::mark::{Cell, Mark};
use serde::{Deserialize, Serialize};

/// Current status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Mark),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Whether the game has ended.
    pub fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// The winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameStatus::Won(mark) => Some(mark),
            _ => None,
        }
    }
}

/// Something a move caused beyond writing its own cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// A dropped token came to rest here.
    Landed(Cell),
    /// The mover completed scoring lines.
    Scored {
        /// Who scored.
        mark: Mark,
        /// Lines completed by this move.
        points: u32,
    },
    /// Obstacles appeared on these cells.
    ObstaclesAdded(Vec<Cell>),
    /// The oldest mark vanished from this cell.
    Vanished(Cell),
    /// A sub-board was claimed.
    SubBoardWon {
        /// Sub-board index on the main board.
        board: Cell,
        /// Who claimed it.
        mark: Mark,
    },
    /// A sub-board filled up without a winner.
    SubBoardDrawn(Cell),
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Landed(cell) => write!(f, "Token landed at {}", cell),
            Effect::Scored { mark, points } => write!(f, "{} scored {} point(s)", mark, points),
            Effect::ObstaclesAdded(cells) => {
                let list: Vec<String> = cells.iter().map(ToString::to_string).collect();
                write!(f, "Obstacles added at {}", list.join(", "))
            }
            Effect::Vanished(cell) => write!(f, "The mark at {} has vanished", cell),
            Effect::SubBoardWon { board, mark } => write!(f, "{} claimed sub-board {}", mark, board),
            Effect::SubBoardDrawn(board) => write!(f, "Sub-board {} is full", board),
        }
    }
}
