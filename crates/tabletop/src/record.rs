//! Serialisable record of a finished session.

use crate::manager::Outcome;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tabletop_core::{GameKind, Mark, Move};
use tracing::{info, instrument};

/// One applied move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MoveRecord {
    /// 1-based turn number.
    turn: usize,
    /// Mover.
    mark: Mark,
    /// Mover's name.
    player: String,
    /// The move in input notation.
    notation: String,
    /// The move itself.
    #[serde(rename = "move")]
    mv: Move,
}

impl MoveRecord {
    /// Records move `mv` made on `turn`.
    pub fn new(turn: usize, mark: Mark, player: String, mv: Move) -> Self {
        Self {
            turn,
            mark,
            player,
            notation: mv.action.to_string(),
            mv,
        }
    }
}

/// Summary of a played session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct SessionReport {
    /// Game played.
    game: GameKind,
    /// Name of the X player.
    player_x: String,
    /// Name of the O player.
    player_o: String,
    /// How it ended.
    outcome: Outcome,
    /// Winner's name.
    winner: Option<String>,
    /// Applied moves in order.
    moves: Vec<MoveRecord>,
    /// Moves the board refused.
    rejected: usize,
    /// When the first turn started.
    started_at: DateTime<Utc>,
    /// When the game ended.
    finished_at: DateTime<Utc>,
}

impl SessionReport {
    /// Number of applied moves.
    pub fn turns(&self) -> usize {
        self.moves.len()
    }

    /// One-line summary for the console.
    pub fn summary(&self) -> String {
        let result = match &self.winner {
            Some(name) => format!("{} ({})", self.outcome, name),
            None => self.outcome.to_string(),
        };
        format!("{}: {} after {} moves", self.game.title(), result, self.turns())
    }

    /// Writes the report as pretty JSON.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialise report")?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))?;
        info!("Session record written");
        Ok(())
    }
}
