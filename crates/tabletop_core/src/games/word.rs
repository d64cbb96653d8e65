//! Word tic-tac-toe: spell a dictionary word in a line.

use super::{check_empty, classic_lines, empty_cells, render_chars};
use crate::dictionary::Dictionary;
use crate::error::MoveError;
use crate::game::{Game, GameKind, check_turn, wrong_action};
use crate::grid::Grid;
use crate::mark::{Cell, Mark};
use crate::moves::{Action, Move};
use crate::status::{Effect, GameStatus};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Word tic-tac-toe on a 3x3 board.
#[derive(Debug, Clone)]
pub struct Word {
    board: Grid<Option<char>>,
    lines: Vec<Vec<Cell>>,
    dictionary: Arc<Dictionary>,
    to_move: Mark,
    moves: usize,
    status: GameStatus,
}

impl Word {
    /// Creates an empty board checked against `dictionary`.
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self {
            board: Grid::new(3, 3, None),
            lines: classic_lines(),
            dictionary,
            to_move: Mark::X,
            moves: 0,
            status: GameStatus::InProgress,
        }
    }

    /// The word list in use.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Letter at a cell.
    pub fn letter_at(&self, cell: Cell) -> Option<char> {
        self.board.get(cell).copied().flatten()
    }

    /// Empty cells.
    pub fn empty_cells(&self) -> Vec<Cell> {
        empty_cells(&self.board)
    }

    /// Winning lines passing through `cell`, as partially filled patterns.
    pub fn patterns_through(&self, cell: Cell) -> Vec<Vec<Option<char>>> {
        self.lines
            .iter()
            .filter(|line| line.contains(&cell))
            .map(|line| line.iter().map(|c| self.letter_at(*c)).collect())
            .collect()
    }

    /// First line that spells a dictionary word.
    pub fn spelled_word(&self) -> Option<String> {
        self.lines.iter().find_map(|line| {
            let word: Option<String> = line.iter().map(|c| self.letter_at(*c)).collect();
            word.filter(|w| self.dictionary.contains(w))
        })
    }
}

impl Default for Word {
    fn default() -> Self {
        Self::new(Arc::new(Dictionary::builtin()))
    }
}

impl Game for Word {
    fn kind(&self) -> GameKind {
        GameKind::Word
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
        if !letter.is_ascii_alphabetic() {
            return Err(MoveError::InvalidSymbol(format!(
                "'{}' (letters A-Z only)",
                letter
            )));
        }
        check_empty(&self.board, cell)?;
        self.board.set(cell, Some(letter.to_ascii_uppercase()));
        self.moves += 1;

        if let Some(word) = self.spelled_word() {
            debug!(%word, "Word spelled");
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
        self.empty_cells()
            .into_iter()
            .flat_map(|cell| {
                ('A'..='Z').map(move |letter| Move::new(self.to_move, Action::Letter { cell, letter }))
            })
            .collect()
    }

    fn render(&self, _reveal: bool) -> String {
        render_chars(&self.board)
    }
}
