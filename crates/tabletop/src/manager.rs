//! Turn loop between two players.

use crate::players::{Player, PlayerError, PlayerKind};
use crate::record::{MoveRecord, SessionReport};
use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tabletop_core::{AnyGame, Effect, Game, GameKind, GameStatus, Mark, Move, MoveError, input_hint};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Bounds on a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct SessionLimits {
    /// Moves after which an undecided session ends as a draw.
    pub max_turns: usize,
    /// Consecutive rejected moves tolerated from a computer player.
    pub max_rejections: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self::new(200, 3)
    }
}

/// How a session ended.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// A mark won.
    #[display("{} wins", _0)]
    Won(Mark),
    /// The game ended without a winner.
    #[display("Draw")]
    Draw,
    /// The turn limit ran out first.
    #[display("Draw by turn limit")]
    TurnLimit,
    /// A player left.
    #[display("Abandoned")]
    Abandoned,
}

impl From<GameStatus> for Outcome {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Won(mark) => Outcome::Won(mark),
            _ => Outcome::Draw,
        }
    }
}

/// Messages sent from the turn loop to a UI.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A player is asked for a move.
    TurnStarted {
        /// Side to move.
        mark: Mark,
        /// Player name.
        player: String,
        /// Player kind.
        kind: PlayerKind,
        /// What to type.
        hint: &'static str,
    },
    /// A computer player is choosing.
    Thinking {
        /// Player name.
        player: String,
    },
    /// Move was made.
    MoveMade {
        /// Player name.
        player: String,
        /// The applied move.
        mv: Move,
    },
    /// The game refused a move; the same player moves again.
    MoveRejected {
        /// Player name.
        player: String,
        /// Why.
        error: MoveError,
    },
    /// A side effect of the last move.
    Effect(Effect),
    /// The board as it should now be shown.
    BoardChanged(String),
    /// Game ended.
    GameOver {
        /// Winning player's name, if any.
        winner: Option<String>,
        /// How it ended.
        outcome: Outcome,
    },
}

/// Runs a game between two players.
pub struct GameManager {
    initial: AnyGame,
    game: AnyGame,
    player_x: Box<dyn Player>,
    player_o: Box<dyn Player>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
    limits: SessionLimits,
    restarts: u64,
}

impl GameManager {
    /// Creates a new manager. `game` is also the state restored by
    /// [`GameManager::restart`].
    pub fn new(
        game: AnyGame,
        player_x: Box<dyn Player>,
        player_o: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
        limits: SessionLimits,
    ) -> Self {
        Self {
            initial: game.clone(),
            game,
            player_x,
            player_o,
            event_tx,
            limits,
            restarts: 0,
        }
    }

    /// Current game state.
    pub fn game(&self) -> &AnyGame {
        &self.game
    }

    /// Name of the player holding `mark`.
    pub fn player_name(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => self.player_x.name(),
            Mark::O => self.player_o.name(),
        }
    }

    fn seat(&mut self, mark: Mark) -> &mut Box<dyn Player> {
        match mark {
            Mark::X => &mut self.player_x,
            Mark::O => &mut self.player_o,
        }
    }

    fn emit(&self, event: GameEvent) -> Result<()> {
        self.event_tx.send(event)?;
        Ok(())
    }

    /// Runs the game loop until the game ends, a player quits or the turn
    /// limit is reached.
    #[instrument(skip_all, fields(game = %self.game.kind().id()))]
    pub async fn run(&mut self) -> Result<SessionReport> {
        info!(
            x = %self.player_x.name(),
            o = %self.player_o.name(),
            "Starting game"
        );
        let started_at = Utc::now();
        let kind = self.game.kind();
        let mut moves = Vec::new();
        let mut rejected = 0;
        let mut streak = 0;

        self.emit(GameEvent::BoardChanged(self.game.to_string()))?;

        let outcome = loop {
            let status = self.game.status();
            if status.is_over() {
                break Outcome::from(status);
            }
            if moves.len() >= self.limits.max_turns {
                info!(turns = moves.len(), "Turn limit reached");
                break Outcome::TurnLimit;
            }

            let mark = self.game.to_move();
            let name = self.player_name(mark).to_string();
            let player_kind = self.seat(mark).kind();
            self.emit(GameEvent::TurnStarted {
                mark,
                player: name.clone(),
                kind: player_kind,
                hint: input_hint(kind),
            })?;
            if player_kind != PlayerKind::Human {
                self.emit(GameEvent::Thinking {
                    player: name.clone(),
                })?;
            }

            debug!(player = %name, %mark, "Waiting for move");
            let game = self.game.clone();
            let chosen = self.seat(mark).choose_move(&game).await;
            let result = match chosen {
                Ok(mv) => self.game.apply(&mv).map(|effects| (mv, effects)),
                Err(PlayerError::Rejected(error)) => Err(error),
                Err(PlayerError::Quit) | Err(PlayerError::InputClosed) => {
                    info!(player = %name, "Player left the game");
                    break Outcome::Abandoned;
                }
                Err(PlayerError::NoMove) => {
                    anyhow::bail!("{} had no move in a live {} game", name, kind)
                }
                Err(PlayerError::Failed(reason)) => {
                    anyhow::bail!("{} stopped playing {}: {}", name, kind, reason)
                }
            };

            match result {
                Ok((mv, effects)) => {
                    streak = 0;
                    moves.push(MoveRecord::new(moves.len() + 1, mark, name.clone(), mv));
                    self.emit(GameEvent::MoveMade { player: name, mv })?;
                    for effect in effects {
                        self.emit(GameEvent::Effect(effect))?;
                    }
                    self.emit(GameEvent::BoardChanged(self.game.to_string()))?;
                }
                Err(error) => {
                    warn!(player = %name, error = %error, kind = error.kind(), "Move rejected");
                    rejected += 1;
                    streak += 1;
                    self.seat(mark).notify_rejected(&error);
                    self.emit(GameEvent::MoveRejected {
                        player: name.clone(),
                        error,
                    })?;
                    if player_kind != PlayerKind::Human && streak > self.limits.max_rejections {
                        anyhow::bail!(
                            "{} ({}) made {} invalid moves in a row",
                            name,
                            player_kind,
                            streak
                        );
                    }
                }
            }
        };

        let winner = match outcome {
            Outcome::Won(mark) => Some(self.player_name(mark).to_string()),
            _ => None,
        };
        info!(%outcome, turns = moves.len(), "Game over");
        self.emit(GameEvent::BoardChanged(self.game.to_string()))?;
        self.emit(GameEvent::GameOver {
            winner: winner.clone(),
            outcome,
        })?;

        Ok(SessionReport::new(
            kind,
            self.player_x.name().to_string(),
            self.player_o.name().to_string(),
            outcome,
            winner,
            moves,
            rejected,
            started_at,
            Utc::now(),
        ))
    }

    /// Restarts the game with the same players. Random board events
    /// follow a fresh sequence each time.
    pub fn restart(&mut self) {
        self.restarts += 1;
        debug!(restarts = self.restarts, "Restarting game");
        self.game = self.initial.clone();
        self.game.reseed(self.restarts);
    }

    /// The game kind being played.
    pub fn kind(&self) -> GameKind {
        self.game.kind()
    }
}
