//! Pyramid tic-tac-toe on a 1-3-5 board.

use super::{MarkGrid, line_potential, owns_line};
use crate::error::MoveError;
use crate::game::{Game, GameKind, check_turn, wrong_action};
use crate::grid::{Grid, render_grid};
use crate::mark::{Cell, Mark};
use crate::moves::{Action, Move};
use crate::status::{Effect, GameStatus};
use tracing::instrument;

const PLAYABLE_CELLS: usize = 9;

const LINES: [[(usize, usize); 3]; 7] = [
    [(1, 1), (1, 2), (1, 3)],
    [(2, 0), (2, 1), (2, 2)],
    [(2, 1), (2, 2), (2, 3)],
    [(2, 2), (2, 3), (2, 4)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
    [(0, 2), (1, 3), (2, 4)],
];

/// Whether a 3x5 coordinate is part of the pyramid.
pub fn is_playable(cell: Cell) -> bool {
    match cell.row {
        0 => cell.col == 2,
        1 => (1..=3).contains(&cell.col),
        2 => cell.col <= 4,
        _ => false,
    }
}

/// Pyramid tic-tac-toe.
#[derive(Debug, Clone)]
pub struct Pyramid {
    board: MarkGrid,
    lines: Vec<Vec<Cell>>,
    to_move: Mark,
    moves: usize,
    status: GameStatus,
}

impl Pyramid {
    /// Creates an empty pyramid.
    pub fn new() -> Self {
        let lines = LINES
            .iter()
            .map(|line| line.iter().map(|&(r, c)| Cell::new(r, c)).collect())
            .collect();
        Self {
            board: Grid::new(3, 5, None),
            lines,
            to_move: Mark::X,
            moves: 0,
            status: GameStatus::InProgress,
        }
    }

    fn open_cells(&self) -> Vec<Cell> {
        self.board
            .iter()
            .filter(|(cell, value)| is_playable(*cell) && value.is_none())
            .map(|(cell, _)| cell)
            .collect()
    }
}

impl Default for Pyramid {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Pyramid {
    fn kind(&self) -> GameKind {
        GameKind::Pyramid
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
        if !is_playable(cell) {
            return Err(MoveError::OutOfBoard(cell));
        }
        if matches!(self.board.get(cell), Some(Some(_))) {
            return Err(MoveError::CellOccupied(cell));
        }
        self.board.set(cell, Some(mv.mark));
        self.moves += 1;

        if owns_line(&self.board, &self.lines, mv.mark) {
            self.status = GameStatus::Won(mv.mark);
        } else if self.moves == PLAYABLE_CELLS {
            self.status = GameStatus::Draw;
        }
        self.to_move = self.to_move.opponent();
        Ok(Vec::new())
    }

    fn legal_moves(&self) -> Vec<Move> {
        if self.status.is_over() {
            return Vec::new();
        }
        self.open_cells()
            .into_iter()
            .map(|cell| Move::new(self.to_move, Action::Place(cell)))
            .collect()
    }

    fn render(&self, _reveal: bool) -> String {
        render_grid(&self.board, |cell, value| match value {
            _ if !is_playable(cell) => " ".to_string(),
            Some(mark) => mark.symbol().to_string(),
            None => ".".to_string(),
        })
    }

    fn heuristic(&self, mark: Mark) -> i32 {
        line_potential(&self.board, &self.lines, mark)
    }
}
