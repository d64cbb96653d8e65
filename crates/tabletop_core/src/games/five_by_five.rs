//! 5x5 tic-tac-toe scored by three-in-a-rows.

use super::{MarkGrid, check_empty, count_lines, empty_cells, line_potential, render_marks};
use crate::error::MoveError;
use crate::game::{Game, GameKind, check_turn, wrong_action};
use crate::grid::Grid;
use crate::mark::{Cell, Mark};
use crate::moves::{Action, Move};
use crate::status::{Effect, GameStatus};
use tracing::{info, instrument};

/// The game stops after this many moves, leaving one cell empty.
pub const MOVE_LIMIT: usize = 24;

/// 5x5 board; every three-in-a-row (overlaps included) is a point.
#[derive(Debug, Clone)]
pub struct FiveByFive {
    board: MarkGrid,
    lines: Vec<Vec<Cell>>,
    to_move: Mark,
    moves: usize,
    status: GameStatus,
}

impl FiveByFive {
    /// Creates an empty board.
    pub fn new() -> Self {
        let board = Grid::new(5, 5, None);
        let lines = board.lines(3);
        Self {
            board,
            lines,
            to_move: Mark::X,
            moves: 0,
            status: GameStatus::InProgress,
        }
    }

    /// Three-in-a-rows currently owned by `mark`.
    pub fn score(&self, mark: Mark) -> usize {
        count_lines(&self.board, &self.lines, mark)
    }
}

impl Default for FiveByFive {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for FiveByFive {
    fn kind(&self) -> GameKind {
        GameKind::FiveByFive
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
        if self.moves >= MOVE_LIMIT {
            return Err(MoveError::TooManyMoves { limit: MOVE_LIMIT });
        }
        check_turn(self.status, self.to_move, mv)?;
        let Action::Place(cell) = mv.action else {
            return Err(wrong_action(self.kind(), mv));
        };
        check_empty(&self.board, cell)?;
        self.board.set(cell, Some(mv.mark));
        self.moves += 1;

        if self.moves == MOVE_LIMIT {
            let (x, o) = (self.score(Mark::X), self.score(Mark::O));
            info!(x, o, "Final three-in-a-row count");
            self.status = match x.cmp(&o) {
                std::cmp::Ordering::Greater => GameStatus::Won(Mark::X),
                std::cmp::Ordering::Less => GameStatus::Won(Mark::O),
                std::cmp::Ordering::Equal => GameStatus::Draw,
            };
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
        format!(
            "{}Lines  X: {}  O: {}\n",
            render_marks(&self.board),
            self.score(Mark::X),
            self.score(Mark::O)
        )
    }

    fn heuristic(&self, mark: Mark) -> i32 {
        let diff = self.score(mark) as i32 - self.score(mark.opponent()) as i32;
        20 * diff + line_potential(&self.board, &self.lines, mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_lines_each_count() {
        let mut game = FiveByFive::new();
        for col in 0..4 {
            game.apply(&Move::place(Mark::X, 0, col)).unwrap();
            game.apply(&Move::place(Mark::O, 4, col)).unwrap();
        }
        assert_eq!(game.score(Mark::X), 2);
        assert_eq!(game.score(Mark::O), 2);
    }

    #[test]
    fn test_move_limit_ends_game_and_rejects_more() {
        let mut game = FiveByFive::new();
        let cells: Vec<Cell> = game.board.cells().take(MOVE_LIMIT).collect();
        let mut mark = Mark::X;
        for cell in cells {
            game.apply(&Move::new(mark, Action::Place(cell))).unwrap();
            mark = mark.opponent();
        }
        assert!(game.status().is_over());
        assert_eq!(
            game.apply(&Move::place(mark, 4, 4)),
            Err(MoveError::TooManyMoves { limit: MOVE_LIMIT })
        );
    }
}
