//! The capability set every game variant implements.

use crate::error::MoveError;
use crate::mark::Mark;
use crate::moves::Move;
use crate::status::{Effect, GameStatus};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Rules of one game variant.
///
/// `apply` validates the whole move before touching any state, so a
/// rejected move leaves the game exactly as it was.
pub trait Game: Clone + Send + Sync + 'static {
    /// Which variant this is.
    fn kind(&self) -> GameKind;

    /// The side whose turn it is.
    fn to_move(&self) -> Mark;

    /// Current status.
    fn status(&self) -> GameStatus;

    /// Number of moves applied so far.
    fn move_count(&self) -> usize;

    /// Validates and applies a move, then passes the turn.
    fn apply(&mut self, mv: &Move) -> Result<Vec<Effect>, MoveError>;

    /// Every move the side to move may make. Empty once the game is over.
    fn legal_moves(&self) -> Vec<Move>;

    /// Text rendering of the board. `reveal` uncovers hidden information.
    fn render(&self, reveal: bool) -> String;

    /// Static evaluation from `mark`'s point of view, used by search.
    fn heuristic(&self, _mark: Mark) -> i32 {
        0
    }
}

/// Shared precondition of every `apply`: the game is live and it is the
/// mover's turn.
pub(crate) fn check_turn(status: GameStatus, to_move: Mark, mv: &Move) -> Result<(), MoveError> {
    if status.is_over() {
        return Err(MoveError::GameOver);
    }
    if mv.mark != to_move {
        return Err(MoveError::WrongTurn(mv.mark));
    }
    Ok(())
}

/// Error for an action shape the variant does not understand.
pub(crate) fn wrong_action(kind: GameKind, mv: &Move) -> MoveError {
    MoveError::InvalidInput(format!("{} does not accept the move {}", kind, mv.action))
}

/// The game variants, in menu order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GameKind {
    /// Spell S-U-S for points.
    Sus,
    /// Drop tokens, four in a line.
    ConnectFour,
    /// 5x5 board, most three-in-a-rows.
    FiveByFive,
    /// Spell a word in a line.
    Word,
    /// Three in a line loses.
    Misere,
    /// Diamond board, a three and a four.
    Diamond,
    /// Slide tokens on a 4x4 board.
    FourByFour,
    /// Pyramid-shaped board.
    Pyramid,
    /// Odd against even, lines summing to 15.
    Numerical,
    /// 6x6 with random obstacles.
    Obstacles,
    /// Oldest mark vanishes.
    Infinity,
    /// Nine boards in one.
    Ultimate,
    /// Marks are hidden.
    Memory,
}

impl GameKind {
    /// Stable kebab-case identifier, used on the command line.
    pub fn id(self) -> &'static str {
        self.into()
    }

    /// 1-based position in the main menu.
    pub fn menu_number(self) -> usize {
        GameKind::iter().position(|k| k == self).map_or(0, |i| i + 1)
    }

    /// Looks a variant up by its menu number.
    pub fn from_menu_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| GameKind::iter().nth(i))
    }

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            GameKind::Sus => "SUS",
            GameKind::ConnectFour => "Four-in-a-row",
            GameKind::FiveByFive => "5x5 Tic-Tac-Toe",
            GameKind::Word => "Word Tic-Tac-Toe",
            GameKind::Misere => "Misere Tic-Tac-Toe",
            GameKind::Diamond => "Diamond Tic-Tac-Toe",
            GameKind::FourByFour => "4x4 Tic-Tac-Toe",
            GameKind::Pyramid => "Pyramid Tic-Tac-Toe",
            GameKind::Numerical => "Numerical Tic-Tac-Toe",
            GameKind::Obstacles => "Obstacles Tic-Tac-Toe",
            GameKind::Infinity => "Infinity Tic-Tac-Toe",
            GameKind::Ultimate => "Ultimate Tic-Tac-Toe",
            GameKind::Memory => "Memory Tic-Tac-Toe",
        }
    }

    /// Short rules summary.
    pub fn rules(self) -> &'static str {
        match self {
            GameKind::Sus => {
                "Both players write S or U on a 3x3 board. Every S-U-S line you \
                 complete scores a point. After nine moves the higher score wins."
            }
            GameKind::ConnectFour => {
                "Drop tokens into a 6x7 grid; they fall to the lowest free row. \
                 Four in a row in any direction wins."
            }
            GameKind::FiveByFive => {
                "Place marks on a 5x5 board until 24 moves are made. The player \
                 with more three-in-a-rows wins."
            }
            GameKind::Word => {
                "Place any letter on a 3x3 board. Spell a word in a row, column or \
                 diagonal to win."
            }
            GameKind::Misere => "Classic 3x3 board, but whoever makes three in a row loses.",
            GameKind::Diamond => {
                "Play on a diamond-shaped board. Win with a line of three and a line \
                 of four in different directions at the same time."
            }
            GameKind::FourByFour => {
                "Each turn slide one of your tokens to an adjacent empty cell. \
                 Three in a row wins."
            }
            GameKind::Pyramid => "Play on a pyramid of 1, 3 and 5 cells. Three in a row wins.",
            GameKind::Numerical => {
                "X writes odd numbers, O writes even ones, each at most once. \
                 Complete a line that sums to 15 to win."
            }
            GameKind::Obstacles => {
                "6x6 board. After every round two obstacles appear on random empty \
                 cells. Four in a row wins."
            }
            GameKind::Infinity => {
                "3x3 board where the oldest mark vanishes after every third move. \
                 Three in a row wins; a full board without a line is a draw."
            }
            GameKind::Ultimate => {
                "Nine 3x3 boards. The cell you pick sends your opponent to the \
                 matching board. Win three boards in a row."
            }
            GameKind::Memory => {
                "Classic tic-tac-toe, but placed marks are hidden until the game ends."
            }
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl std::str::FromStr for GameKind {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return GameKind::from_menu_number(n)
                .ok_or_else(|| MoveError::InvalidInput(format!("no game number {}", n)));
        }
        let wanted = s.to_ascii_lowercase().replace('_', "-");
        GameKind::iter()
            .find(|k| k.id() == wanted)
            .ok_or_else(|| MoveError::InvalidInput(format!("unknown game '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_numbers_round_trip() {
        for kind in GameKind::iter() {
            assert_eq!(GameKind::from_menu_number(kind.menu_number()), Some(kind));
        }
        assert_eq!(GameKind::from_menu_number(0), None);
        assert_eq!(GameKind::from_menu_number(14), None);
    }

    #[test]
    fn test_parse_by_id_and_number() {
        assert_eq!("connect-four".parse::<GameKind>(), Ok(GameKind::ConnectFour));
        assert_eq!("FOUR_BY_FOUR".parse::<GameKind>(), Ok(GameKind::FourByFour));
        assert_eq!("13".parse::<GameKind>(), Ok(GameKind::Memory));
        assert!("chess".parse::<GameKind>().is_err());
    }
}
