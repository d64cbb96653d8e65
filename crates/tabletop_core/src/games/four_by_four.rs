//! 4x4 tic-tac-toe where tokens slide instead of being placed.

use super::{MarkGrid, line_potential, owns_line, render_marks};
use crate::error::MoveError;
use crate::game::{Game, GameKind, check_turn, wrong_action};
use crate::grid::Grid;
use crate::mark::{Cell, Mark};
use crate::moves::{Action, Move};
use crate::status::{Effect, GameStatus};
use tracing::{debug, instrument};

const SIZE: usize = 4;
const STEPS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Sliding-token 4x4 tic-tac-toe.
#[derive(Debug, Clone)]
pub struct FourByFour {
    board: MarkGrid,
    lines: Vec<Vec<Cell>>,
    to_move: Mark,
    moves: usize,
    status: GameStatus,
}

impl FourByFour {
    /// Creates the starting position: `O X O X` on top, `X O X O` at the bottom.
    pub fn new() -> Self {
        let mut board = Grid::new(SIZE, SIZE, None);
        for col in 0..SIZE {
            let top = if col % 2 == 0 { Mark::O } else { Mark::X };
            board.set(Cell::new(0, col), Some(top));
            board.set(Cell::new(SIZE - 1, col), Some(top.opponent()));
        }
        let lines = board.lines(3);
        Self {
            board,
            lines,
            to_move: Mark::X,
            moves: 0,
            status: GameStatus::InProgress,
        }
    }

    /// Token at a cell.
    pub fn token_at(&self, cell: Cell) -> Option<Mark> {
        self.board.get(cell).copied().flatten()
    }

    fn slides_for(&self, mark: Mark) -> Vec<(Cell, Cell)> {
        self.board
            .iter()
            .filter(|(_, value)| **value == Some(mark))
            .flat_map(|(from, _)| {
                STEPS.iter().filter_map(move |&(dr, dc)| {
                    let to = from.offset(dr, dc)?;
                    matches!(self.board.get(to), Some(None)).then_some((from, to))
                })
            })
            .collect()
    }
}

impl Default for FourByFour {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for FourByFour {
    fn kind(&self) -> GameKind {
        GameKind::FourByFour
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
        let Action::Slide { from, to } = mv.action else {
            return Err(wrong_action(self.kind(), mv));
        };
        for cell in [from, to] {
            if !self.board.contains(cell) {
                return Err(MoveError::OutOfBoard(cell));
            }
        }
        if self.token_at(from) != Some(mv.mark) {
            return Err(MoveError::BoardUpdate(format!(
                "there is no {} token at {}",
                mv.mark, from
            )));
        }
        if !from.is_orthogonal_neighbor(to) {
            return Err(MoveError::BoardUpdate(format!(
                "{} is not next to {}",
                to, from
            )));
        }
        if self.token_at(to).is_some() {
            return Err(MoveError::CellOccupied(to));
        }

        self.board.set(from, None);
        self.board.set(to, Some(mv.mark));
        self.moves += 1;

        if owns_line(&self.board, &self.lines, mv.mark) {
            self.status = GameStatus::Won(mv.mark);
        } else if self.slides_for(mv.mark.opponent()).is_empty() {
            debug!(stuck = %mv.mark.opponent(), "No slide available");
            self.status = GameStatus::Draw;
        }
        self.to_move = self.to_move.opponent();
        Ok(Vec::new())
    }

    fn legal_moves(&self) -> Vec<Move> {
        if self.status.is_over() {
            return Vec::new();
        }
        self.slides_for(self.to_move)
            .into_iter()
            .map(|(from, to)| Move::new(self.to_move, Action::Slide { from, to }))
            .collect()
    }

    fn render(&self, _reveal: bool) -> String {
        render_marks(&self.board)
    }

    fn heuristic(&self, mark: Mark) -> i32 {
        line_potential(&self.board, &self.lines, mark)
    }
}
