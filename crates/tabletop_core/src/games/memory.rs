//! Memory tic-tac-toe: marks stay hidden until the end.

use super::{MarkGrid, check_empty, classic_lines, empty_cells, line_potential, owns_line, render_marks};
use crate::error::MoveError;
use crate::game::{Game, GameKind, check_turn, wrong_action};
use crate::grid::{Grid, render_grid};
use crate::mark::{Cell, Mark};
use crate::moves::{Action, Move};
use crate::status::{Effect, GameStatus};
use tracing::instrument;

/// Classic tic-tac-toe with hidden marks.
#[derive(Debug, Clone)]
pub struct Memory {
    board: MarkGrid,
    lines: Vec<Vec<Cell>>,
    to_move: Mark,
    moves: usize,
    status: GameStatus,
}

impl Memory {
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

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Memory {
    fn kind(&self) -> GameKind {
        GameKind::Memory
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
            self.status = GameStatus::Won(mv.mark);
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

    fn render(&self, reveal: bool) -> String {
        if reveal {
            return render_marks(&self.board);
        }
        render_grid(&self.board, |_, value| match value {
            Some(_) => "#".to_string(),
            None => ".".to_string(),
        })
    }

    fn heuristic(&self, mark: Mark) -> i32 {
        line_potential(&self.board, &self.lines, mark)
    }
}
