//! Misere tic-tac-toe: three in a row loses.

use super::{MarkGrid, check_empty, classic_lines, empty_cells, line_potential, owns_line, render_marks};
use crate::error::MoveError;
use crate::game::{Game, GameKind, check_turn, wrong_action};
use crate::grid::Grid;
use crate::mark::{Cell, Mark};
use crate::moves::{Action, Move};
use crate::status::{Effect, GameStatus};
use tracing::{debug, instrument};

/// Misere tic-tac-toe.
#[derive(Debug, Clone)]
pub struct Misere {
    board: MarkGrid,
    lines: Vec<Vec<Cell>>,
    to_move: Mark,
    moves: usize,
    status: GameStatus,
}

impl Misere {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            board: Grid::new(3, 3, None),
            lines: classic_lines(),
            to_move: Mark::X,
            moves: 0,
            status: GameStatus::InProgress,
        }
    }
}

impl Default for Misere {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Misere {
    fn kind(&self) -> GameKind {
        GameKind::Misere
    }

    fn to_move(&self) -> Mark {
        self.to_move
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn move_count(&self) -> usize {
        self.moves
    }

    #[instrument(skip_all, fields(mv = %mv))]
    fn apply(&mut self, mv: &Move) -> Result<Vec<Effect>, MoveError> {
        check_turn(self.status, self.to_move, mv)?;
        let Action::Place(cell) = mv.action else {
            return Err(wrong_action(self.kind(), mv));
        };
        check_empty(&self.board, cell)?;
        self.board.set(cell, Some(mv.mark));
        self.moves += 1;

        if owns_line(&self.board, &self.lines, mv.mark) {
            debug!(loser = %mv.mark, "Three in a row completed");
            self.status = GameStatus::Won(mv.mark.opponent());
        } else if self.moves == 9 {
            self.status = GameStatus::Draw;
        }
        self.to_move = self.to_move.opponent();
        Ok(Vec::new())
    }

    fn legal_moves(&self) -> Vec<Move> {
        if self.status.is_over() {
            return Vec::new();
        }
        empty_cells(&self.board)
            .into_iter()
            .map(|cell| Move::new(self.to_move, Action::Place(cell)))
            .collect()
    }

    fn render(&self, _reveal: bool) -> String {
        render_marks(&self.board)
    }

    fn heuristic(&self, mark: Mark) -> i32 {
        -line_potential(&self.board, &self.lines, mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completing_a_line_loses() {
        let mut game = Misere::new();
        game.apply(&Move::place(Mark::X, 0, 0)).unwrap();
        game.apply(&Move::place(Mark::O, 1, 0)).unwrap();
        game.apply(&Move::place(Mark::X, 0, 1)).unwrap();
        game.apply(&Move::place(Mark::O, 1, 1)).unwrap();
        game.apply(&Move::place(Mark::X, 0, 2)).unwrap();
        assert_eq!(game.status(), GameStatus::Won(Mark::O));
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut game = Misere::new();
        game.apply(&Move::place(Mark::X, 1, 1)).unwrap();
        assert_eq!(
            game.apply(&Move::place(Mark::O, 1, 1)),
            Err(MoveError::CellOccupied(Cell::new(1, 1)))
        );
        assert_eq!(game.to_move(), Mark::O);
    }
}
