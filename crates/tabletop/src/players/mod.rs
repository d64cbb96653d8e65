//! Player trait and implementations.

mod computer;
mod human;

pub use computer::{RandomPlayer, SmartPlayer};
pub use human::{HumanPlayer, LineInput, line_channel};

use crate::config::AppConfig;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tabletop_core::{AnyGame, Move, MoveError};

/// Kinds of player a seat can be filled with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Moves typed by a person.
    Human,
    /// Uniformly random legal moves.
    Random,
    /// Rule-based search.
    Smart,
}

/// Why a player produced no move.
#[derive(Debug, Display, Error)]
pub enum PlayerError {
    /// The input did not describe a move; ask again.
    #[display("{}", _0)]
    Rejected(MoveError),

    /// The player asked to leave the game.
    #[display("Player quit")]
    Quit,

    /// No more input will arrive.
    #[display("Input closed")]
    InputClosed,

    /// The strategy had nothing to offer.
    #[display("No move available")]
    NoMove,

    /// The player broke down while choosing.
    #[display("Player failed: {}", _0)]
    Failed(#[error(not(source))] String),
}

impl From<MoveError> for PlayerError {
    fn from(error: MoveError) -> Self {
        PlayerError::Rejected(error)
    }
}

/// Something that picks moves.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Chooses a move for the side to move in `game`.
    async fn choose_move(&mut self, game: &AnyGame) -> Result<Move, PlayerError>;

    /// Display name.
    fn name(&self) -> &str;

    /// What kind of player this is.
    fn kind(&self) -> PlayerKind;

    /// Called when the game refused this player's last move.
    fn notify_rejected(&mut self, _error: &MoveError) {}
}

/// Who fills a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    /// Kind of player.
    pub kind: PlayerKind,
    /// Display name.
    pub name: String,
}

impl PlayerSpec {
    /// Creates a spec, defaulting the name from the kind and mark label.
    pub fn new(kind: PlayerKind, name: Option<String>, seat: &str) -> Self {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| match kind {
                PlayerKind::Human => format!("Player {}", seat),
                PlayerKind::Random => format!("Random {}", seat),
                PlayerKind::Smart => format!("Smart {}", seat),
            });
        Self { kind, name }
    }
}

/// Builds a player for a seat.
///
/// `stream` separates the random streams of two computer players that
/// share a configured seed.
pub fn build_player(
    spec: &PlayerSpec,
    config: &AppConfig,
    input: &LineInput,
    stream: u64,
) -> Box<dyn Player> {
    let seed = config.seed().map(|s| s.wrapping_add(stream));
    let delay = std::time::Duration::from_millis(*config.think_delay_ms());
    match spec.kind {
        PlayerKind::Human => Box::new(HumanPlayer::new(spec.name.clone(), input.clone())),
        PlayerKind::Random => Box::new(RandomPlayer::new(spec.name.clone(), seed, delay)),
        PlayerKind::Smart => Box::new(SmartPlayer::new(
            spec.name.clone(),
            *config.smart_depth(),
            seed,
            delay,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parses_case_insensitively() {
        assert_eq!("SMART".parse::<PlayerKind>().ok(), Some(PlayerKind::Smart));
        assert_eq!(PlayerKind::Random.to_string(), "random");
        assert!("robot".parse::<PlayerKind>().is_err());
    }

    #[test]
    fn test_spec_default_names() {
        assert_eq!(PlayerSpec::new(PlayerKind::Human, None, "X").name, "Player X");
        assert_eq!(
            PlayerSpec::new(PlayerKind::Smart, Some("  ".into()), "O").name,
            "Smart O"
        );
        assert_eq!(
            PlayerSpec::new(PlayerKind::Human, Some("Ada".into()), "O").name,
            "Ada"
        );
    }
}
