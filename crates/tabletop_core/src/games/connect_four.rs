//! Four-in-a-row with gravity.

use super::{MarkGrid, line_potential, owns_line, render_marks};
use crate::error::MoveError;
use crate::game::{Game, GameKind, check_turn, wrong_action};
use crate::grid::Grid;
use crate::mark::{Cell, Mark};
use crate::moves::{Action, Move};
use crate::status::{Effect, GameStatus};
use tracing::{debug, instrument};

const ROWS: usize = 6;
const COLS: usize = 7;
const TOTAL_MOVES: usize = ROWS * COLS;

/// Connect 4 on a 6x7 grid.
#[derive(Debug, Clone)]
pub struct ConnectFour {
    board: MarkGrid,
    lines: Vec<Vec<Cell>>,
    to_move: Mark,
    moves: usize,
    status: GameStatus,
}

impl ConnectFour {
    /// Creates an empty grid.
    pub fn new() -> Self {
        let board = Grid::new(ROWS, COLS, None);
        let lines = board.lines(4);
        Self {
            board,
            lines,
            to_move: Mark::X,
            moves: 0,
            status: GameStatus::InProgress,
        }
    }

    /// Row a token dropped into `column` would land on.
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        (0..ROWS)
            .rev()
            .find(|&row| matches!(self.board.get(Cell::new(row, column)), Some(None)))
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for ConnectFour {
    fn kind(&self) -> GameKind {
        GameKind::ConnectFour
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
        let Action::Drop { column } = mv.action else {
            return Err(wrong_action(self.kind(), mv));
        };
        if column >= COLS {
            return Err(MoveError::OutOfBoard(Cell::new(0, column)));
        }
        let row = self
            .landing_row(column)
            .ok_or_else(|| MoveError::BoardUpdate(format!("column {} is full", column)))?;
        let cell = Cell::new(row, column);
        self.board.set(cell, Some(mv.mark));
        self.moves += 1;
        debug!(%cell, "Token landed");

        if owns_line(&self.board, &self.lines, mv.mark) {
            self.status = GameStatus::Won(mv.mark);
        } else if self.moves == TOTAL_MOVES {
            self.status = GameStatus::Draw;
        }
        self.to_move = self.to_move.opponent();
        Ok(vec![Effect::Landed(cell)])
    }

    fn legal_moves(&self) -> Vec<Move> {
        if self.status.is_over() {
            return Vec::new();
        }
        // Centre columns first so search prunes earlier.
        const ORDER: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];
        ORDER
            .iter()
            .filter(|&&column| self.landing_row(column).is_some())
            .map(|&column| Move::new(self.to_move, Action::Drop { column }))
            .collect()
    }

    fn render(&self, _reveal: bool) -> String {
        render_marks(&self.board)
    }

    fn heuristic(&self, mark: Mark) -> i32 {
        line_potential(&self.board, &self.lines, mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop(mark: Mark, column: usize) -> Move {
        Move::new(mark, Action::Drop { column })
    }

    #[test]
    fn test_tokens_stack_from_bottom() {
        let mut game = ConnectFour::new();
        let first = game.apply(&drop(Mark::X, 2)).unwrap();
        let second = game.apply(&drop(Mark::O, 2)).unwrap();
        assert_eq!(first, vec![Effect::Landed(Cell::new(5, 2))]);
        assert_eq!(second, vec![Effect::Landed(Cell::new(4, 2))]);
    }

    #[test]
    fn test_full_column_is_rejected() {
        let mut game = ConnectFour::new();
        let mut mark = Mark::X;
        for _ in 0..ROWS {
            game.apply(&drop(mark, 0)).unwrap();
            mark = mark.opponent();
        }
        let err = game.apply(&drop(mark, 0)).unwrap_err();
        assert!(matches!(err, MoveError::BoardUpdate(_)));
        assert_eq!(game.legal_moves().len(), COLS - 1);
    }

    #[test]
    fn test_vertical_four_wins() {
        let mut game = ConnectFour::new();
        for _ in 0..3 {
            game.apply(&drop(Mark::X, 0)).unwrap();
            game.apply(&drop(Mark::O, 1)).unwrap();
        }
        game.apply(&drop(Mark::X, 0)).unwrap();
        assert_eq!(game.status(), GameStatus::Won(Mark::X));
    }

    #[test]
    fn test_column_outside_grid() {
        let mut game = ConnectFour::new();
        assert_eq!(
            game.apply(&drop(Mark::X, 7)),
            Err(MoveError::OutOfBoard(Cell::new(0, 7)))
        );
    }
}
