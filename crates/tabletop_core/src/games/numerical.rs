//! Numerical tic-tac-toe: odd against even, lines summing to 15.

use super::{check_empty, classic_lines, empty_cells};
use crate::error::MoveError;
use crate::game::{Game, GameKind, check_turn, wrong_action};
use crate::grid::{Grid, render_grid};
use crate::mark::{Cell, Mark};
use crate::moves::{Action, Move};
use crate::status::{Effect, GameStatus};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// Sum a full line must reach.
pub const TARGET: u32 = 15;

/// Numbers a side may write.
pub fn numbers_for(mark: Mark) -> &'static [u8] {
    match mark {
        Mark::X => &[1, 3, 5, 7, 9],
        Mark::O => &[2, 4, 6, 8],
    }
}

/// Numerical tic-tac-toe.
#[derive(Debug, Clone)]
pub struct Numerical {
    board: Grid<Option<u8>>,
    lines: Vec<Vec<Cell>>,
    used: BTreeSet<u8>,
    to_move: Mark,
    moves: usize,
    status: GameStatus,
}

impl Numerical {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            board: Grid::new(3, 3, None),
            lines: classic_lines(),
            used: BTreeSet::new(),
            to_move: Mark::X,
            moves: 0,
            status: GameStatus::InProgress,
        }
    }

    /// Numbers `mark` has not written yet.
    pub fn available(&self, mark: Mark) -> Vec<u8> {
        numbers_for(mark)
            .iter()
            .copied()
            .filter(|n| !self.used.contains(n))
            .collect()
    }

    fn line_values(&self, line: &[Cell]) -> Vec<Option<u8>> {
        line.iter().map(|c| self.board.get(*c).copied().flatten()).collect()
    }

    fn has_fifteen(&self) -> bool {
        self.lines.iter().any(|line| {
            let values: Option<Vec<u8>> = self.line_values(line).into_iter().collect();
            values.is_some_and(|v| v.iter().map(|&n| u32::from(n)).sum::<u32>() == TARGET)
        })
    }
}

impl Default for Numerical {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Numerical {
    fn kind(&self) -> GameKind {
        GameKind::Numerical
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
        let Action::Number { cell, value } = mv.action else {
            return Err(wrong_action(self.kind(), mv));
        };
        if !numbers_for(mv.mark).contains(&value) {
            return Err(MoveError::InvalidSymbol(format!(
                "{} may not write {} (allowed: {:?})",
                mv.mark,
                value,
                numbers_for(mv.mark)
            )));
        }
        if self.used.contains(&value) {
            return Err(MoveError::InvalidSymbol(format!("{} was already used", value)));
        }
        check_empty(&self.board, cell)?;
        self.board.set(cell, Some(value));
        self.used.insert(value);
        self.moves += 1;

        if self.has_fifteen() {
            debug!(winner = %mv.mark, "Line sums to target");
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
        let numbers = self.available(self.to_move);
        empty_cells(&self.board)
            .into_iter()
            .flat_map(|cell| {
                numbers
                    .iter()
                    .map(move |&value| Move::new(self.to_move, Action::Number { cell, value }))
            })
            .collect()
    }

    fn render(&self, _reveal: bool) -> String {
        let board = render_grid(&self.board, |_, value| match value {
            Some(n) => n.to_string(),
            None => ".".to_string(),
        });
        let list = |mark| {
            self.available(mark)
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        };
        format!(
            "{}Left  X: [{}]  O: [{}]\n",
            board,
            list(Mark::X),
            list(Mark::O)
        )
    }

    fn heuristic(&self, mark: Mark) -> i32 {
        // Lines one number short of the target that `mark` could complete.
        let mine = self.available(mark);
        let theirs = self.available(mark.opponent());
        let mut score = 0;
        for line in &self.lines {
            let values = self.line_values(line);
            if values.iter().filter(|v| v.is_none()).count() != 1 {
                continue;
            }
            let sum: u32 = values.iter().flatten().map(|&n| u32::from(n)).sum();
            let Some(need) = TARGET.checked_sub(sum) else {
                continue;
            };
            if mine.iter().any(|&n| u32::from(n) == need) {
                score += 3;
            }
            if theirs.iter().any(|&n| u32::from(n) == need) {
                score -= 3;
            }
        }
        score
    }
}
