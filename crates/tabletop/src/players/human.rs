//! Human player fed by lines of text.

use super::{Player, PlayerError, PlayerKind};
use std::sync::Arc;
use tabletop_core::{AnyGame, Game, Move, parse_action};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, instrument};

/// Shared source of typed lines. Two humans at one keyboard share it.
pub type LineInput = Arc<Mutex<mpsc::UnboundedReceiver<String>>>;

/// Creates a line channel and its shared receiving end.
pub fn line_channel() -> (mpsc::UnboundedSender<String>, LineInput) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, Arc::new(Mutex::new(rx)))
}

/// Words that abandon the game.
const QUIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

/// Human player reading typed moves.
pub struct HumanPlayer {
    name: String,
    input: LineInput,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input: LineInput) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    #[instrument(skip_all, fields(player = %self.name))]
    async fn choose_move(&mut self, game: &AnyGame) -> Result<Move, PlayerError> {
        let line = loop {
            let line = self
                .input
                .lock()
                .await
                .recv()
                .await
                .ok_or(PlayerError::InputClosed)?;
            let line = line.trim().to_string();
            if !line.is_empty() {
                break line;
            }
        };
        debug!(%line, "Read input");
        if QUIT_WORDS.contains(&line.to_ascii_lowercase().as_str()) {
            return Err(PlayerError::Quit);
        }
        let action = parse_action(game.kind(), &line)?;
        Ok(Move::new(game.to_move(), action))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Human
    }
}
