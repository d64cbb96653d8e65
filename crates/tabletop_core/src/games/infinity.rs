//! Infinity tic-tac-toe: the oldest mark vanishes every third move.

use super::{MarkGrid, check_empty, classic_lines, empty_cells, line_potential, owns_line, render_marks};
use crate::error::MoveError;
use crate::game::{Game, GameKind, check_turn, wrong_action};
use crate::grid::Grid;
use crate::mark::{Cell, Mark};
use crate::moves::{Action, Move};
use crate::status::{Effect, GameStatus};
use std::collections::VecDeque;
use tracing::{debug, instrument};

const VANISH_EVERY: usize = 3;

/// Infinity tic-tac-toe.
#[derive(Debug, Clone)]
pub struct Infinity {
    board: MarkGrid,
    lines: Vec<Vec<Cell>>,
    placed: VecDeque<Cell>,
    to_move: Mark,
    moves: usize,
    status: GameStatus,
}

impl Infinity {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            board: Grid::new(3, 3, None),
            lines: classic_lines(),
            placed: VecDeque::new(),
            to_move: Mark::X,
            moves: 0,
            status: GameStatus::InProgress,
        }
    }

    /// Marks on the board, oldest first.
    pub fn placement_order(&self) -> impl Iterator<Item = &Cell> {
        self.placed.iter()
    }
}

impl Default for Infinity {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Infinity {
    fn kind(&self) -> GameKind {
        GameKind::Infinity
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
        self.placed.push_back(cell);
        self.moves += 1;

        let mut effects = Vec::new();
        if self.moves % VANISH_EVERY == 0 {
            if let Some(oldest) = self.placed.pop_front() {
                self.board.set(oldest, None);
                debug!(%oldest, "Oldest mark vanished");
                effects.push(Effect::Vanished(oldest));
            }
        }

        if owns_line(&self.board, &self.lines, mv.mark) {
            self.status = GameStatus::Won(mv.mark);
        } else if empty_cells(&self.board).is_empty() {
            // Nine marks and no line: nobody can move.
            debug!("Board full without a line");
            self.status = GameStatus::Draw;
        }
        self.to_move = self.to_move.opponent();
        Ok(effects)
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
        let next = if (self.moves + 1) % VANISH_EVERY == 0 {
            self.placed
                .front()
                .map(|cell| format!("Next move removes {}\n", cell))
                .unwrap_or_default()
        } else {
            String::new()
        };
        format!("{}{}", render_marks(&self.board), next)
    }

    fn heuristic(&self, mark: Mark) -> i32 {
        line_potential(&self.board, &self.lines, mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_third_move_removes_first_mark() {
        let mut game = Infinity::new();
        game.apply(&Move::place(Mark::X, 0, 0)).unwrap();
        game.apply(&Move::place(Mark::O, 1, 1)).unwrap();
        let effects = game.apply(&Move::place(Mark::X, 2, 2)).unwrap();
        assert_eq!(effects, vec![Effect::Vanished(Cell::new(0, 0))]);
        let order: Vec<Cell> = game.placement_order().copied().collect();
        assert_eq!(order, vec![Cell::new(1, 1), Cell::new(2, 2)]);
        assert_eq!(game.legal_moves().len(), 7);
    }

    #[test]
    fn test_win_counts_after_vanish() {
        let mut game = Infinity::new();
        // X's first mark vanishes on move 3, so X needs a fresh line.
        let script = [
            (Mark::X, 2, 0),
            (Mark::O, 1, 0),
            (Mark::X, 0, 0),
            (Mark::O, 2, 2),
            (Mark::X, 0, 1),
            (Mark::O, 1, 1),
        ];
        for (mark, r, c) in script {
            game.apply(&Move::place(mark, r, c)).unwrap();
        }
        assert_eq!(game.status(), GameStatus::InProgress);
        game.apply(&Move::place(Mark::X, 0, 2)).unwrap();
        assert_eq!(game.status(), GameStatus::Won(Mark::X));
    }

    #[test]
    fn test_full_board_without_line_draws() {
        let mut game = Infinity::new();
        let script = [
            (Mark::X, 0, 2),
            (Mark::O, 0, 1),
            (Mark::X, 1, 1),
            (Mark::O, 0, 0),
            (Mark::X, 2, 0),
            (Mark::O, 2, 1),
            (Mark::X, 1, 2),
            (Mark::O, 2, 2),
            (Mark::X, 0, 1),
            (Mark::O, 0, 2),
            (Mark::X, 1, 1),
            (Mark::O, 1, 0),
        ];
        for (mark, r, c) in script {
            game.apply(&Move::place(mark, r, c)).unwrap();
            assert_eq!(game.status(), GameStatus::InProgress);
        }
        game.apply(&Move::place(Mark::X, 0, 0)).unwrap();
        assert_eq!(game.status(), GameStatus::Draw);
        assert!(game.legal_moves().is_empty());
    }
}
