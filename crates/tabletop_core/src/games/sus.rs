//! SUS: spell S-U-S lines for points.

use super::{check_empty, classic_lines, empty_cells, render_chars};
use crate::error::MoveError;
use crate::game::{Game, GameKind, check_turn, wrong_action};
use crate::grid::Grid;
use crate::mark::{Cell, Mark};
use crate::moves::{Action, Move};
use crate::status::{Effect, GameStatus};
use tracing::{debug, instrument};

const TOTAL_MOVES: usize = 9;
const LETTERS: [char; 2] = ['S', 'U'];

/// SUS on a 3x3 board.
#[derive(Debug, Clone)]
pub struct Sus {
    board: Grid<Option<char>>,
    lines: Vec<Vec<Cell>>,
    scores: [u32; 2],
    to_move: Mark,
    moves: usize,
    status: GameStatus,
}

impl Sus {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            board: Grid::new(3, 3, None),
            lines: classic_lines(),
            scores: [0, 0],
            to_move: Mark::X,
            moves: 0,
            status: GameStatus::InProgress,
        }
    }

    /// Lines completed so far by `mark`.
    pub fn score(&self, mark: Mark) -> u32 {
        self.scores[mark as usize]
    }

    fn sus_lines(&self) -> u32 {
        self.lines
            .iter()
            .filter(|line| {
                let word: Option<String> = line
                    .iter()
                    .map(|cell| self.board.get(*cell).copied().flatten())
                    .collect();
                word.as_deref() == Some("SUS")
            })
            .count() as u32
    }
}

impl Default for Sus {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Sus {
    fn kind(&self) -> GameKind {
        GameKind::Sus
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
        let Action::Letter { cell, letter } = mv.action else {
            return Err(wrong_action(self.kind(), mv));
        };
        let letter = letter.to_ascii_uppercase();
        if !LETTERS.contains(&letter) {
            return Err(MoveError::InvalidSymbol(format!(
                "'{}' (only S or U may be written)",
                letter
            )));
        }
        check_empty(&self.board, cell)?;

        let before = self.sus_lines();
        self.board.set(cell, Some(letter));
        let gained = self.sus_lines() - before;
        self.moves += 1;

        let mut effects = Vec::new();
        if gained > 0 {
            self.scores[mv.mark as usize] += gained;
            debug!(mark = %mv.mark, gained, "S-U-S completed");
            effects.push(Effect::Scored {
                mark: mv.mark,
                points: gained,
            });
        }

        if self.moves == TOTAL_MOVES {
            let (x, o) = (self.score(Mark::X), self.score(Mark::O));
            self.status = match x.cmp(&o) {
                std::cmp::Ordering::Greater => GameStatus::Won(Mark::X),
                std::cmp::Ordering::Less => GameStatus::Won(Mark::O),
                std::cmp::Ordering::Equal => GameStatus::Draw,
            };
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
            .flat_map(|cell| {
                LETTERS
                    .iter()
                    .map(move |&letter| Move::new(self.to_move, Action::Letter { cell, letter }))
            })
            .collect()
    }

    fn render(&self, _reveal: bool) -> String {
        format!(
            "{}Score  X: {}  O: {}\n",
            render_chars(&self.board),
            self.score(Mark::X),
            self.score(Mark::O)
        )
    }

    fn heuristic(&self, mark: Mark) -> i32 {
        10 * (self.score(mark) as i32 - self.score(mark.opponent()) as i32)
    }
}
