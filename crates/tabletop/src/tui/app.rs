//! Application state and logic.

use crate::manager::{GameEvent, Outcome};
use tabletop_core::GameKind;
use tracing::debug;

/// Lines kept in the message log.
const LOG_CAPACITY: usize = 200;

/// Main application state.
pub struct App {
    kind: GameKind,
    board: String,
    status_message: String,
    log: Vec<String>,
    input: String,
    awaiting_human: bool,
    outcome: Option<Outcome>,
}

impl App {
    /// Creates a new application for `kind`.
    pub fn new(kind: GameKind) -> Self {
        Self {
            kind,
            board: String::new(),
            status_message: "Waiting for game to start...".to_string(),
            log: Vec::new(),
            input: String::new(),
            awaiting_human: false,
            outcome: None,
        }
    }

    /// Game being played.
    pub fn kind(&self) -> GameKind {
        self.kind
    }

    /// Board as last rendered by the game.
    pub fn board(&self) -> &str {
        &self.board
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Message log, oldest first.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Text typed so far.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether a human player is waiting for input.
    pub fn awaiting_human(&self) -> bool {
        self.awaiting_human
    }

    /// Whether the session has ended.
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Appends a typed character.
    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Removes the last typed character.
    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Hands the typed line to the waiting human player. Nothing is sent
    /// while a computer is to move or once the line has gone for this turn.
    pub fn submit(&mut self) -> Option<String> {
        if !self.awaiting_human || self.input.trim().is_empty() {
            return None;
        }
        self.awaiting_human = false;
        Some(self.take_input())
    }

    /// Takes the typed line, leaving the input empty.
    fn take_input(&mut self) -> String {
        let line = std::mem::take(&mut self.input);
        self.push_log(format!("> {}", line));
        line
    }

    /// Adds a message to the log.
    pub fn push_log(&mut self, message: String) {
        self.log.push(message);
        if self.log.len() > LOG_CAPACITY {
            let excess = self.log.len() - LOG_CAPACITY;
            self.log.drain(..excess);
        }
    }

    /// Handles a game event from the turn loop.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::TurnStarted {
                mark,
                player,
                kind,
                hint,
            } => {
                self.awaiting_human = kind == crate::players::PlayerKind::Human;
                self.status_message = if self.awaiting_human {
                    format!("{} ({}) to move. {}", player, mark, hint)
                } else {
                    format!("{} ({}) to move.", player, mark)
                };
            }
            GameEvent::Thinking { player } => {
                self.status_message = format!("{} is thinking...", player);
            }
            GameEvent::MoveMade { player, mv } => {
                self.awaiting_human = false;
                self.push_log(format!("{} played {}", player, mv.action));
            }
            GameEvent::MoveRejected { player, error } => {
                self.push_log(format!("{}: {}", player, error));
            }
            GameEvent::Effect(effect) => {
                self.push_log(effect.to_string());
            }
            GameEvent::BoardChanged(board) => {
                self.board = board;
            }
            GameEvent::GameOver { winner, outcome } => {
                self.awaiting_human = false;
                self.outcome = Some(outcome);
                let result = match (winner, outcome) {
                    (Some(player), _) => format!("{} wins!", player),
                    (None, Outcome::Abandoned) => "Game abandoned.".to_string(),
                    (None, Outcome::TurnLimit) => "Turn limit reached, draw.".to_string(),
                    (None, _) => "Game ended in a draw!".to_string(),
                };
                self.push_log(result.clone());
                self.status_message =
                    format!("{} Press 'r' to restart or 'q' to quit.", result);
            }
        }
    }

    /// Restarts the game.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.outcome = None;
        self.awaiting_human = false;
        self.input.clear();
        self.status_message = "Game restarted. Player X's turn.".to_string();
        self.push_log("--- New game ---".to_string());
    }
}
