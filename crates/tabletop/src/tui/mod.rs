//! Full-screen terminal UI.

mod app;
mod ui;

pub use app::App;

use crate::config::AppConfig;
use crate::manager::GameManager;
use crate::players::line_channel;
use crate::session::{SessionHandle, SessionSpec, build_manager, spawn_session};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

use crate::manager::GameEvent;

/// Runs one game in the terminal UI until the user quits.
#[instrument(skip_all, fields(game = %spec.game.id()))]
pub async fn run_tui(spec: SessionSpec, config: AppConfig) -> Result<()> {
    info!("Starting terminal UI");

    let (line_tx, input) = line_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let manager = build_manager(&spec, &config, &input, event_tx)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(spec.game);
    let mut seat = Seat::Running(spawn_session(manager));
    let res = run_app(&mut terminal, &mut app, &mut seat, &line_tx, &mut event_rx).await;

    if let Seat::Running(handle) = &seat {
        handle.abort();
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

/// The session task, or the manager it handed back.
enum Seat {
    Running(SessionHandle),
    Finished(GameManager),
    Empty,
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    seat: &mut Seat,
    line_tx: &mpsc::UnboundedSender<String>,
    event_rx: &mut mpsc::UnboundedReceiver<GameEvent>,
) -> Result<()> {
    loop {
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }

        if matches!(seat, Seat::Running(handle) if handle.is_finished()) {
            if let Seat::Running(handle) = std::mem::replace(seat, Seat::Empty) {
                let (manager, report) = handle.await?;
                match report {
                    Ok(report) => info!(summary = %report.summary(), "Session finished"),
                    Err(e) => {
                        error!(error = %e, "Session failed");
                        app.push_log(format!("Session failed: {:#}", e));
                    }
                }
                *seat = Seat::Finished(manager);
            }
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Esc => {
                info!("User quit");
                return Ok(());
            }
            KeyCode::Char('q') if app.is_over() => {
                info!("User quit");
                return Ok(());
            }
            KeyCode::Char('r') if app.is_over() && matches!(seat, Seat::Finished(_)) => {
                if let Seat::Finished(mut manager) = std::mem::replace(seat, Seat::Empty) {
                    manager.restart();
                    app.restart();
                    *seat = Seat::Running(spawn_session(manager));
                }
            }
            KeyCode::Enter => {
                if let Some(line) = app.submit() {
                    let _ = line_tx.send(line);
                }
            }
            KeyCode::Backspace => app.pop_char(),
            KeyCode::Char(c) if app.awaiting_human() => app.push_char(c),
            _ => {}
        }
    }
}
