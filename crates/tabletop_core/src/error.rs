//! Move rejection reasons.

use crate::mark::{Cell, Mark};

/// Why a board refused to apply a move.
///
/// Every variant is recoverable: the turn loop reports it and asks the
/// same player again.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The target lies outside the playable area.
    #[display("Cell {} is outside the board", _0)]
    OutOfBoard(Cell),

    /// The target cell already holds something.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Cell),

    /// The symbol (letter, number) is not allowed here.
    #[display("Invalid symbol: {}", _0)]
    InvalidSymbol(String),

    /// The input could not be understood as a move.
    #[display("Invalid input: {}", _0)]
    InvalidInput(String),

    /// The game accepts no further moves.
    #[display("Too many moves: the limit is {}", limit)]
    TooManyMoves {
        /// Maximum number of moves the board allows.
        limit: usize,
    },

    /// The board rejected the move for a game-specific reason.
    #[display("Cannot update board: {}", _0)]
    BoardUpdate(String),

    /// A mark tried to move out of turn.
    #[display("It is not {}'s turn", _0)]
    WrongTurn(Mark),

    /// The game has already finished.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}

impl MoveError {
    /// Short kebab-case name of the error kind, for logs and records.
    pub fn kind(&self) -> &'static str {
        match self {
            MoveError::OutOfBoard(_) => "out-of-board",
            MoveError::CellOccupied(_) => "cell-occupied",
            MoveError::InvalidSymbol(_) => "invalid-symbol",
            MoveError::InvalidInput(_) => "invalid-input",
            MoveError::TooManyMoves { .. } => "too-many-moves",
            MoveError::BoardUpdate(_) => "board-update",
            MoveError::WrongTurn(_) => "wrong-turn",
            MoveError::GameOver => "game-over",
        }
    }
}
