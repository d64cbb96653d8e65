//! Tagged union over every variant, chosen when a session starts.

use crate::dictionary::Dictionary;
use crate::error::MoveError;
use crate::game::{Game, GameKind};
use crate::games::{
    ConnectFour, Diamond, FiveByFive, FourByFour, Infinity, Memory, Misere, Numerical, Obstacles,
    Pyramid, Sus, Ultimate, Word,
};
use crate::mark::Mark;
use crate::moves::Move;
use crate::status::{Effect, GameStatus};
use std::sync::Arc;
use tracing::{info, instrument};

/// Construction options that only some variants use.
#[derive(Debug, Clone, Default)]
pub struct GameOptions {
    /// Word list for word tic-tac-toe; the built-in list when absent.
    pub dictionary: Option<Arc<Dictionary>>,
    /// Seed for variants with random events.
    pub seed: Option<u64>,
}

/// Any game variant.
#[derive(Debug, Clone)]
pub enum AnyGame {
    /// SUS.
    Sus(Sus),
    /// Four-in-a-row.
    ConnectFour(ConnectFour),
    /// 5x5 tic-tac-toe.
    FiveByFive(FiveByFive),
    /// Word tic-tac-toe.
    Word(Word),
    /// Misere tic-tac-toe.
    Misere(Misere),
    /// Diamond tic-tac-toe.
    Diamond(Diamond),
    /// Sliding 4x4 tic-tac-toe.
    FourByFour(FourByFour),
    /// Pyramid tic-tac-toe.
    Pyramid(Pyramid),
    /// Numerical tic-tac-toe.
    Numerical(Numerical),
    /// Obstacles tic-tac-toe.
    Obstacles(Obstacles),
    /// Infinity tic-tac-toe.
    Infinity(Infinity),
    /// Ultimate tic-tac-toe.
    Ultimate(Ultimate),
    /// Memory tic-tac-toe.
    Memory(Memory),
}

/// Forwards a method call to whichever variant is inside.
macro_rules! dispatch {
    ($self:expr, $game:ident => $body:expr) => {
        match $self {
            AnyGame::Sus($game) => $body,
            AnyGame::ConnectFour($game) => $body,
            AnyGame::FiveByFive($game) => $body,
            AnyGame::Word($game) => $body,
            AnyGame::Misere($game) => $body,
            AnyGame::Diamond($game) => $body,
            AnyGame::FourByFour($game) => $body,
            AnyGame::Pyramid($game) => $body,
            AnyGame::Numerical($game) => $body,
            AnyGame::Obstacles($game) => $body,
            AnyGame::Infinity($game) => $body,
            AnyGame::Ultimate($game) => $body,
            AnyGame::Memory($game) => $body,
        }
    };
}

impl AnyGame {
    /// Starts a fresh game of `kind`.
    #[instrument(skip(options))]
    pub fn new(kind: GameKind, options: &GameOptions) -> Self {
        info!("Creating game");
        match kind {
            GameKind::Sus => AnyGame::Sus(Sus::new()),
            GameKind::ConnectFour => AnyGame::ConnectFour(ConnectFour::new()),
            GameKind::FiveByFive => AnyGame::FiveByFive(FiveByFive::new()),
            GameKind::Word => {
                let dictionary = options
                    .dictionary
                    .clone()
                    .unwrap_or_else(|| Arc::new(Dictionary::builtin()));
                AnyGame::Word(Word::new(dictionary))
            }
            GameKind::Misere => AnyGame::Misere(Misere::new()),
            GameKind::Diamond => AnyGame::Diamond(Diamond::new()),
            GameKind::FourByFour => AnyGame::FourByFour(FourByFour::new()),
            GameKind::Pyramid => AnyGame::Pyramid(Pyramid::new()),
            GameKind::Numerical => AnyGame::Numerical(Numerical::new()),
            GameKind::Obstacles => AnyGame::Obstacles(match options.seed {
                Some(seed) => Obstacles::with_seed(seed),
                None => Obstacles::new(),
            }),
            GameKind::Infinity => AnyGame::Infinity(Infinity::new()),
            GameKind::Ultimate => AnyGame::Ultimate(Ultimate::new()),
            GameKind::Memory => AnyGame::Memory(Memory::new()),
        }
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.status().is_over()
    }

    /// The winner, if the game ended in a win.
    pub fn winner(&self) -> Option<Mark> {
        self.status().winner()
    }

    /// Gives random board events a new sequence for replay number
    /// `round`. Games without random events are unchanged.
    pub fn reseed(&mut self, round: u64) {
        if let AnyGame::Obstacles(game) = self {
            let seed = game.seed().wrapping_add(round.wrapping_mul(REPLAY_STRIDE));
            game.reseed(seed);
        }
    }
}

/// Spreads replay seeds apart.
const REPLAY_STRIDE: u64 = 0xD1B5_4A32_D192_ED03;

impl Game for AnyGame {
    fn kind(&self) -> GameKind {
        dispatch!(self, g => g.kind())
    }

    fn to_move(&self) -> Mark {
        dispatch!(self, g => g.to_move())
    }

    fn status(&self) -> GameStatus {
        dispatch!(self, g => g.status())
    }

    fn move_count(&self) -> usize {
        dispatch!(self, g => g.move_count())
    }

    fn apply(&mut self, mv: &Move) -> Result<Vec<Effect>, MoveError> {
        dispatch!(self, g => g.apply(mv))
    }

    fn legal_moves(&self) -> Vec<Move> {
        dispatch!(self, g => g.legal_moves())
    }

    fn render(&self, reveal: bool) -> String {
        dispatch!(self, g => g.render(reveal))
    }

    fn heuristic(&self, mark: Mark) -> i32 {
        dispatch!(self, g => g.heuristic(mark))
    }
}

impl std::fmt::Display for AnyGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(self.is_over()))
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for AnyGame {
                fn from(game: $variant) -> Self {
                    AnyGame::$variant(game)
                }
            }
        )*
    };
}

impl_from_variant!(
    Sus, ConnectFour, FiveByFive, Word, Misere, Diamond, FourByFour, Pyramid, Numerical, Obstacles,
    Infinity, Ultimate, Memory,
);
