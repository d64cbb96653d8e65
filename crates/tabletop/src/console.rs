//! Line-oriented console front end.

use crate::config::AppConfig;
use crate::manager::{GameEvent, Outcome};
use crate::players::{LineInput, PlayerKind, PlayerSpec, line_channel};
use crate::record::SessionReport;
use crate::session::{SessionSpec, build_manager, spawn_session};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use strum::IntoEnumIterator;
use tabletop_core::GameKind;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Forwards stdin lines to a shared input. The task ends at end of input.
pub fn spawn_stdin_reader() -> LineInput {
    let (tx, input) = line_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
        debug!("Stdin closed");
    });
    input
}

async fn read_line(input: &LineInput) -> Option<String> {
    input
        .lock()
        .await
        .recv()
        .await
        .map(|line| line.trim().to_string())
}

fn prompt(text: &str) {
    print!("{}", text);
    let _ = std::io::stdout().flush();
}

/// The main menu text.
pub fn menu_text() -> String {
    let mut text = String::from("\n=== Tabletop ===\n");
    for kind in GameKind::iter() {
        text.push_str(&format!("{:>2}. {}\n", kind.menu_number(), kind.title()));
    }
    text.push_str(" 0. Exit\n");
    text
}

/// Shows the main menu until the user exits or input ends.
#[instrument(skip_all)]
pub async fn run_menu(config: &AppConfig) -> Result<()> {
    let input = spawn_stdin_reader();
    loop {
        println!("{}", menu_text());
        prompt("Choose a game: ");
        let Some(choice) = read_line(&input).await else {
            return Ok(());
        };
        if choice == "0" || choice.eq_ignore_ascii_case("exit") {
            println!("Goodbye!");
            return Ok(());
        }
        let game = match choice.parse::<GameKind>() {
            Ok(game) => game,
            Err(_) => {
                println!("Unknown choice '{}'.", choice);
                continue;
            }
        };
        info!(game = %game.id(), "Game selected");

        let Some(x) = ask_player(&input, "X").await else {
            return Ok(());
        };
        let Some(o) = ask_player(&input, "O").await else {
            return Ok(());
        };
        let spec = SessionSpec { game, x, o };
        if let Err(e) = play_session(&spec, config, &input, None).await {
            println!("Session failed: {:#}", e);
        }
    }
}

async fn ask_player(input: &LineInput, seat: &str) -> Option<PlayerSpec> {
    let kind = loop {
        prompt(&format!("Player {} type [human/random/smart] (human): ", seat));
        let line = read_line(input).await?;
        if line.is_empty() {
            break PlayerKind::Human;
        }
        match line.parse::<PlayerKind>() {
            Ok(kind) => break kind,
            Err(_) => println!("Unknown player type '{}'.", line),
        }
    };
    prompt(&format!("Player {} name: ", seat));
    let name = read_line(input).await?;
    Some(PlayerSpec::new(kind, Some(name), seat))
}

/// Plays one session on the console, printing events as they arrive.
#[instrument(skip_all, fields(game = %spec.game.id()))]
pub async fn play_session(
    spec: &SessionSpec,
    config: &AppConfig,
    input: &LineInput,
    record: Option<&Path>,
) -> Result<SessionReport> {
    println!("\n{}\n{}\n", spec.game.title(), spec.game.rules());
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let manager = build_manager(spec, config, input, event_tx)?;
    let mut handle = spawn_session(manager);

    let report = loop {
        tokio::select! {
            Some(event) = event_rx.recv() => print_event(&event),
            joined = &mut handle => {
                let (_manager, report) = joined.context("Session task failed")?;
                while let Ok(event) = event_rx.try_recv() {
                    print_event(&event);
                }
                break report?;
            }
        }
    };

    println!("{}", report.summary());
    if let Some(path) = record {
        report.write_json(path)?;
        println!("Record written to {}", path.display());
    }
    Ok(report)
}

/// Console text for an event; `None` when it shows nothing.
pub fn event_text(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::TurnStarted {
            mark,
            player,
            kind: PlayerKind::Human,
            hint,
        } => Some(format!("{} ({}) to move. {}", player, mark, hint)),
        GameEvent::TurnStarted { .. } => None,
        GameEvent::Thinking { player } => Some(format!("{} is thinking...", player)),
        GameEvent::MoveMade { player, mv } => Some(format!("{} played {}", player, mv.action)),
        GameEvent::MoveRejected { error, .. } => Some(format!("{}. Try again.", error)),
        GameEvent::Effect(effect) => Some(format!("  {}", effect)),
        GameEvent::BoardChanged(board) => Some(format!("\n{}", board)),
        GameEvent::GameOver { winner, outcome } => Some(match (winner, outcome) {
            (Some(name), _) => format!("{} wins!", name),
            (None, Outcome::Abandoned) => "Game abandoned.".to_string(),
            (None, Outcome::TurnLimit) => "Turn limit reached, the game is a draw.".to_string(),
            (None, _) => "It's a draw!".to_string(),
        }),
    }
}

fn print_event(event: &GameEvent) {
    if let Some(text) = event_text(event) {
        println!("{}", text);
    }
    if let GameEvent::TurnStarted {
        kind: PlayerKind::Human,
        ..
    } = event
    {
        prompt("> ");
    }
}
