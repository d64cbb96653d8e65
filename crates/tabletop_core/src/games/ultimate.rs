//! Ultimate tic-tac-toe: nine boards in one.

use super::{MarkGrid, classic_lines, line_potential, owns_line};
use crate::error::MoveError;
use crate::game::{Game, GameKind, check_turn, wrong_action};
use crate::grid::Grid;
use crate::mark::{Cell, Mark};
use crate::moves::{Action, Move};
use crate::status::{Effect, GameStatus};
use tracing::{debug, instrument};

const SIZE: usize = 9;

/// State of one 3x3 sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubBoard {
    /// Still being played.
    Open,
    /// Claimed by a mark.
    Won(Mark),
    /// Filled without a winner.
    Full,
}

impl SubBoard {
    fn is_decided(self) -> bool {
        self != SubBoard::Open
    }
}

/// Which sub-board holds a 9x9 cell.
pub fn sub_board_of(cell: Cell) -> Cell {
    Cell::new(cell.row / 3, cell.col / 3)
}

/// Ultimate tic-tac-toe.
#[derive(Debug, Clone)]
pub struct Ultimate {
    board: MarkGrid,
    subs: Grid<SubBoard>,
    lines: Vec<Vec<Cell>>,
    forced: Option<Cell>,
    to_move: Mark,
    moves: usize,
    status: GameStatus,
}

impl Ultimate {
    /// Creates nine empty sub-boards.
    pub fn new() -> Self {
        Self {
            board: Grid::new(SIZE, SIZE, None),
            subs: Grid::new(3, 3, SubBoard::Open),
            lines: classic_lines(),
            forced: None,
            to_move: Mark::X,
            moves: 0,
            status: GameStatus::InProgress,
        }
    }

    /// The sub-board the next move must go to, if restricted.
    pub fn forced_board(&self) -> Option<Cell> {
        self.forced
    }

    /// State of a sub-board.
    pub fn sub_board(&self, board: Cell) -> Option<SubBoard> {
        self.subs.get(board).copied()
    }

    fn cells_of(board: Cell) -> impl Iterator<Item = Cell> {
        (0..3).flat_map(move |r| (0..3).map(move |c| Cell::new(board.row * 3 + r, board.col * 3 + c)))
    }

    /// The 3x3 contents of a sub-board as its own grid.
    fn local(&self, board: Cell) -> MarkGrid {
        let mut local = Grid::new(3, 3, None);
        for (i, cell) in Self::cells_of(board).enumerate() {
            local.set(Cell::new(i / 3, i % 3), self.board.get(cell).copied().flatten());
        }
        local
    }

    fn main_board(&self) -> MarkGrid {
        let mut main = Grid::new(3, 3, None);
        for (board, state) in self.subs.iter() {
            if let SubBoard::Won(mark) = state {
                main.set(board, Some(*mark));
            }
        }
        main
    }

    fn playable_boards(&self) -> Vec<Cell> {
        match self.forced {
            Some(board) => vec![board],
            None => self
                .subs
                .iter()
                .filter(|(_, state)| !state.is_decided())
                .map(|(board, _)| board)
                .collect(),
        }
    }
}

impl Default for Ultimate {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Ultimate {
    fn kind(&self) -> GameKind {
        GameKind::Ultimate
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
        if !self.board.contains(cell) {
            return Err(MoveError::OutOfBoard(cell));
        }
        let board = sub_board_of(cell);
        if self.subs.get(board).is_some_and(|s| s.is_decided()) {
            return Err(MoveError::BoardUpdate(format!(
                "sub-board {} is already decided",
                board
            )));
        }
        if let Some(forced) = self.forced.filter(|f| *f != board) {
            return Err(MoveError::BoardUpdate(format!(
                "this move must be played in sub-board {}",
                forced
            )));
        }
        if matches!(self.board.get(cell), Some(Some(_))) {
            return Err(MoveError::CellOccupied(cell));
        }

        self.board.set(cell, Some(mv.mark));
        self.moves += 1;

        let mut effects = Vec::new();
        let local = self.local(board);
        if owns_line(&local, &self.lines, mv.mark) {
            self.subs.set(board, SubBoard::Won(mv.mark));
            debug!(%board, mark = %mv.mark, "Sub-board claimed");
            effects.push(Effect::SubBoardWon {
                board,
                mark: mv.mark,
            });
        } else if local.count(&None) == 0 {
            self.subs.set(board, SubBoard::Full);
            effects.push(Effect::SubBoardDrawn(board));
        }

        let target = Cell::new(cell.row % 3, cell.col % 3);
        self.forced = self
            .subs
            .get(target)
            .filter(|state| !state.is_decided())
            .map(|_| target);

        if owns_line(&self.main_board(), &self.lines, mv.mark) {
            self.status = GameStatus::Won(mv.mark);
        } else if self.subs.iter().all(|(_, state)| state.is_decided()) {
            self.status = GameStatus::Draw;
        }
        self.to_move = self.to_move.opponent();
        Ok(effects)
    }

    fn legal_moves(&self) -> Vec<Move> {
        if self.status.is_over() {
            return Vec::new();
        }
        self.playable_boards()
            .into_iter()
            .flat_map(Self::cells_of)
            .filter(|cell| matches!(self.board.get(*cell), Some(None)))
            .map(|cell| Move::new(self.to_move, Action::Place(cell)))
            .collect()
    }

    fn render(&self, _reveal: bool) -> String {
        let mut out = String::from("    0 1 2   3 4 5   6 7 8\n");
        for row in 0..SIZE {
            if row > 0 && row % 3 == 0 {
                out.push_str("   -------+-------+-------\n");
            }
            out.push_str(&format!("{:>2} ", row));
            for col in 0..SIZE {
                if col > 0 && col % 3 == 0 {
                    out.push_str(" |");
                }
                let cell = Cell::new(row, col);
                let symbol = match (self.subs.get(sub_board_of(cell)), self.board.get(cell)) {
                    (Some(SubBoard::Won(mark)), _) => mark.symbol().to_ascii_lowercase(),
                    (_, Some(Some(mark))) => mark.symbol(),
                    _ => '.',
                };
                out.push(' ');
                out.push(symbol);
            }
            out.push('\n');
        }
        match self.forced {
            Some(board) => out.push_str(&format!("Next move goes in sub-board {}\n", board)),
            None if !self.status.is_over() => out.push_str("Next move may go in any open sub-board\n"),
            None => {}
        }
        out
    }

    fn heuristic(&self, mark: Mark) -> i32 {
        let won = |m: Mark| {
            self.subs
                .iter()
                .filter(|(_, state)| **state == SubBoard::Won(m))
                .count() as i32
        };
        10 * (won(mark) - won(mark.opponent())) + 5 * line_potential(&self.main_board(), &self.lines, mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_position_selects_next_board() {
        let mut game = Ultimate::new();
        game.apply(&Move::place(Mark::X, 0, 5)).unwrap();
        assert_eq!(game.forced_board(), Some(Cell::new(0, 2)));
        let err = game.apply(&Move::place(Mark::O, 4, 4)).unwrap_err();
        assert!(matches!(err, MoveError::BoardUpdate(_)));
        assert!(game.legal_moves().iter().all(|m| match m.action {
            Action::Place(cell) => sub_board_of(cell) == Cell::new(0, 2),
            _ => false,
        }));
    }

    #[test]
    fn test_winning_a_sub_board_closes_it() {
        let mut game = Ultimate::new();
        // X takes the top row of the centre board; O keeps sending X back.
        game.apply(&Move::place(Mark::X, 3, 3)).unwrap();
        assert_eq!(game.forced_board(), Some(Cell::new(0, 0)));
        game.apply(&Move::place(Mark::O, 1, 1)).unwrap();
        game.apply(&Move::place(Mark::X, 3, 4)).unwrap();
        game.apply(&Move::place(Mark::O, 1, 4)).unwrap();
        let effects = game.apply(&Move::place(Mark::X, 3, 5)).unwrap();
        assert_eq!(
            effects,
            vec![Effect::SubBoardWon {
                board: Cell::new(1, 1),
                mark: Mark::X
            }]
        );
        assert_eq!(game.sub_board(Cell::new(1, 1)), Some(SubBoard::Won(Mark::X)));

        // Being sent to a decided board frees the next move.
        game.apply(&Move::place(Mark::O, 1, 7)).unwrap();
        assert_eq!(game.forced_board(), None);
        assert!(game.legal_moves().iter().all(|m| match m.action {
            Action::Place(cell) => sub_board_of(cell) != Cell::new(1, 1),
            _ => false,
        }));
        let err = game.apply(&Move::place(Mark::X, 4, 4)).unwrap_err();
        assert!(matches!(err, MoveError::BoardUpdate(_)));
    }

    #[test]
    fn test_all_boards_decided_without_line_draws() {
        let mut game = Ultimate::new();
        let states = [
            [SubBoard::Won(Mark::X), SubBoard::Won(Mark::O), SubBoard::Won(Mark::X)],
            [SubBoard::Won(Mark::X), SubBoard::Won(Mark::O), SubBoard::Won(Mark::O)],
            [SubBoard::Won(Mark::O), SubBoard::Won(Mark::X), SubBoard::Open],
        ];
        for (r, row) in states.iter().enumerate() {
            for (c, state) in row.iter().enumerate() {
                game.subs.set(Cell::new(r, c), *state);
            }
        }
        // Last sub-board: one empty corner, and filling it makes no line.
        let marks = [
            (6, 6, Mark::X),
            (6, 7, Mark::O),
            (6, 8, Mark::X),
            (7, 6, Mark::X),
            (7, 7, Mark::O),
            (7, 8, Mark::O),
            (8, 6, Mark::O),
            (8, 7, Mark::X),
        ];
        for (r, c, mark) in marks {
            game.board.set(Cell::new(r, c), Some(mark));
        }
        game.forced = Some(Cell::new(2, 2));

        let effects = game.apply(&Move::place(Mark::X, 8, 8)).unwrap();
        assert_eq!(effects, vec![Effect::SubBoardDrawn(Cell::new(2, 2))]);
        assert_eq!(game.status(), GameStatus::Draw);
        assert!(game.legal_moves().is_empty());
    }
}
