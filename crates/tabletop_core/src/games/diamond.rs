//! Diamond tic-tac-toe: a three and a four at once.

use super::{MarkGrid, line_potential};
use crate::error::MoveError;
use crate::game::{Game, GameKind, check_turn, wrong_action};
use crate::grid::{Grid, render_grid};
use crate::mark::{Cell, Mark};
use crate::moves::{Action, Move};
use crate::status::{Effect, GameStatus};
use tracing::{debug, instrument};

const SIZE: usize = 7;
const ROW_WIDTHS: [usize; SIZE] = [1, 3, 5, 7, 5, 3, 1];
const PLAYABLE_CELLS: usize = 37;

/// Whether a 7x7 coordinate lies inside the diamond.
pub fn is_playable(cell: Cell) -> bool {
    if cell.row >= SIZE || cell.col >= SIZE {
        return false;
    }
    let width = ROW_WIDTHS[cell.row];
    let start = (SIZE - width) / 2;
    (start..start + width).contains(&cell.col)
}

/// A line on the diamond and the step between its cells.
#[derive(Debug, Clone)]
struct Segment {
    direction: (isize, isize),
    cells: Vec<Cell>,
}

fn segments(len: usize) -> Vec<Segment> {
    Grid::new(SIZE, SIZE, ())
        .lines(len)
        .into_iter()
        .filter(|line| line.iter().all(|cell| is_playable(*cell)))
        .map(|cells| {
            let direction = (
                cells[1].row as isize - cells[0].row as isize,
                cells[1].col as isize - cells[0].col as isize,
            );
            Segment { direction, cells }
        })
        .collect()
}

/// Diamond tic-tac-toe.
#[derive(Debug, Clone)]
pub struct Diamond {
    board: MarkGrid,
    threes: Vec<Segment>,
    fours: Vec<Segment>,
    to_move: Mark,
    moves: usize,
    status: GameStatus,
}

impl Diamond {
    /// Creates an empty diamond.
    pub fn new() -> Self {
        Self {
            board: Grid::new(SIZE, SIZE, None),
            threes: segments(3),
            fours: segments(4),
            to_move: Mark::X,
            moves: 0,
            status: GameStatus::InProgress,
        }
    }

    fn owned<'a>(&'a self, segments: &'a [Segment], mark: Mark) -> impl Iterator<Item = &'a Segment> {
        segments
            .iter()
            .filter(move |s| self.board.line_is(&s.cells, &Some(mark)))
    }

    /// Whether `mark` owns a line of three and a line of four in different
    /// directions that share at most one cell.
    pub fn has_won(&self, mark: Mark) -> bool {
        self.owned(&self.fours, mark).any(|four| {
            self.owned(&self.threes, mark).any(|three| {
                three.direction != four.direction
                    && three.cells.iter().filter(|c| four.cells.contains(c)).count() <= 1
            })
        })
    }

    fn all_lines(&self) -> Vec<Vec<Cell>> {
        self.threes
            .iter()
            .chain(self.fours.iter())
            .map(|s| s.cells.clone())
            .collect()
    }
}

impl Default for Diamond {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Diamond {
    fn kind(&self) -> GameKind {
        GameKind::Diamond
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

        if self.has_won(mv.mark) {
            debug!(winner = %mv.mark, "Three and four completed");
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
        self.board
            .iter()
            .filter(|(cell, value)| is_playable(*cell) && value.is_none())
            .map(|(cell, _)| Move::new(self.to_move, Action::Place(cell)))
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
        line_potential(&self.board, &self.all_lines(), mark)
    }
}
