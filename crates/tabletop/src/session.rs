//! Wiring a configured session together.

use crate::config::AppConfig;
use crate::manager::{GameEvent, GameManager};
use crate::players::{LineInput, PlayerSpec, build_player};
use crate::record::SessionReport;
use anyhow::{Context, Result};
use tabletop_core::{AnyGame, GameKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, instrument};

/// What to play and who plays it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSpec {
    /// Game to play.
    pub game: GameKind,
    /// Player holding X.
    pub x: PlayerSpec,
    /// Player holding O.
    pub o: PlayerSpec,
}

/// Builds a manager for `spec`, sending its events to `event_tx`.
#[instrument(skip_all, fields(game = %spec.game.id()))]
pub fn build_manager(
    spec: &SessionSpec,
    config: &AppConfig,
    input: &LineInput,
    event_tx: mpsc::UnboundedSender<GameEvent>,
) -> Result<GameManager> {
    let options = config
        .game_options()
        .context("Failed to prepare game options")?;
    let game = AnyGame::new(spec.game, &options);
    let player_x = build_player(&spec.x, config, input, 0);
    let player_o = build_player(&spec.o, config, input, 1);
    info!(x = %spec.x.name, o = %spec.o.name, "Session ready");
    Ok(GameManager::new(
        game,
        player_x,
        player_o,
        event_tx,
        config.limits(),
    ))
}

/// A running session: the task hands the manager back when done.
pub type SessionHandle = JoinHandle<(GameManager, Result<SessionReport>)>;

/// Runs `manager` on its own task.
pub fn spawn_session(mut manager: GameManager) -> SessionHandle {
    tokio::spawn(async move {
        let report = manager.run().await;
        (manager, report)
    })
}
