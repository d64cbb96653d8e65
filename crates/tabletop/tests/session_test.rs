//! Turn loop behaviour with scripted players.

use std::collections::VecDeque;
use std::time::Duration;
use tabletop::{
    GameEvent, GameManager, Outcome, Player, PlayerError, PlayerKind, RandomPlayer,
    SessionLimits, SessionReport, SmartPlayer,
};
use tabletop_core::{AnyGame, Game, GameKind, GameOptions, Mark, Move, MoveError};
use tokio::sync::mpsc;

enum Step {
    Play(Move),
    Quit,
    Fail,
}

struct Scripted {
    name: String,
    kind: PlayerKind,
    steps: VecDeque<Step>,
}

impl Scripted {
    fn new(name: &str, kind: PlayerKind, steps: Vec<Step>) -> Box<Self> {
        Box::new(Self {
            name: name.to_string(),
            kind,
            steps: steps.into(),
        })
    }

    fn places(name: &str, mark: Mark, cells: &[(usize, usize)]) -> Box<Self> {
        let steps = cells
            .iter()
            .map(|&(r, c)| Step::Play(Move::place(mark, r, c)))
            .collect();
        Self::new(name, PlayerKind::Human, steps)
    }
}

#[async_trait::async_trait]
impl Player for Scripted {
    async fn choose_move(&mut self, _game: &AnyGame) -> Result<Move, PlayerError> {
        match self.steps.pop_front() {
            Some(Step::Play(mv)) => Ok(mv),
            Some(Step::Quit) => Err(PlayerError::Quit),
            Some(Step::Fail) => Err(PlayerError::Failed("search task failed".to_string())),
            None => Err(PlayerError::NoMove),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PlayerKind {
        self.kind
    }
}

fn new_game(kind: GameKind) -> AnyGame {
    AnyGame::new(
        kind,
        &GameOptions {
            dictionary: None,
            seed: Some(3),
        },
    )
}

fn drain(rx: &mut mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_rejected_move_reprompts_same_player() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let x = Scripted::places("Xena", Mark::X, &[(0, 0), (0, 1), (0, 2)]);
    let o = Scripted::places("Otto", Mark::O, &[(0, 0), (1, 0), (1, 1)]);
    let mut manager = GameManager::new(
        new_game(GameKind::Memory),
        x,
        o,
        tx,
        SessionLimits::new(50, 3),
    );

    let report = manager.run().await.unwrap();
    assert_eq!(*report.outcome(), Outcome::Won(Mark::X));
    assert_eq!(report.winner().as_deref(), Some("Xena"));
    assert_eq!(report.turns(), 5);
    assert_eq!(*report.rejected(), 1);

    let events = drain(&mut rx);
    let rejected_at = events
        .iter()
        .position(|e| {
            matches!(
                e,
                GameEvent::MoveRejected { player, error: MoveError::CellOccupied(_) }
                    if player == "Otto"
            )
        })
        .expect("rejection reported");
    let next_turn = events[rejected_at..]
        .iter()
        .find_map(|e| match e {
            GameEvent::TurnStarted { player, .. } => Some(player.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(next_turn, "Otto");
    assert!(matches!(
        events.last(),
        Some(GameEvent::GameOver { winner: Some(name), outcome: Outcome::Won(Mark::X) }) if name == "Xena"
    ));
}

#[tokio::test]
async fn test_wrong_mark_is_rejected() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let x = Scripted::new(
        "Xena",
        PlayerKind::Human,
        vec![Step::Play(Move::place(Mark::O, 0, 0)), Step::Quit],
    );
    let o = Scripted::places("Otto", Mark::O, &[]);
    let mut manager = GameManager::new(new_game(GameKind::Misere), x, o, tx, SessionLimits::default());

    let report = manager.run().await.unwrap();
    assert_eq!(*report.outcome(), Outcome::Abandoned);
    assert!(drain(&mut rx).iter().any(|e| matches!(
        e,
        GameEvent::MoveRejected { error: MoveError::WrongTurn(Mark::O), .. }
    )));
}

#[tokio::test]
async fn test_broken_computer_player_is_an_error() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let steps = (0..10)
        .map(|_| Step::Play(Move::place(Mark::X, 9, 9)))
        .collect();
    let x = Scripted::new("Bot", PlayerKind::Random, steps);
    let o = Scripted::places("Otto", Mark::O, &[]);
    let mut manager = GameManager::new(new_game(GameKind::Misere), x, o, tx, SessionLimits::new(50, 2));

    let err = manager.run().await.unwrap_err();
    assert!(err.to_string().contains("3 invalid moves in a row"), "{}", err);
}

#[tokio::test]
async fn test_failed_player_stops_the_session() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let x = Scripted::new("Bot", PlayerKind::Smart, vec![Step::Fail]);
    let o = Scripted::places("Otto", Mark::O, &[]);
    let mut manager = GameManager::new(new_game(GameKind::Misere), x, o, tx, SessionLimits::default());

    let err = manager.run().await.unwrap_err().to_string();
    assert!(err.contains("search task failed"), "{}", err);
    assert!(!err.contains("had no move"), "{}", err);
}

#[tokio::test]
async fn test_turn_limit_ends_in_draw() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let x = Scripted::places("Xena", Mark::X, &[(0, 0), (2, 2)]);
    let o = Scripted::places("Otto", Mark::O, &[(1, 1)]);
    let mut manager = GameManager::new(new_game(GameKind::Misere), x, o, tx, SessionLimits::new(3, 3));

    let report = manager.run().await.unwrap();
    assert_eq!(*report.outcome(), Outcome::TurnLimit);
    assert_eq!(report.turns(), 3);
    assert!(report.winner().is_none());
    assert!(matches!(
        drain(&mut rx).last(),
        Some(GameEvent::GameOver { winner: None, outcome: Outcome::TurnLimit })
    ));
}

#[tokio::test]
async fn test_effects_are_reported() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let x = Scripted::new(
        "Xena",
        PlayerKind::Human,
        vec![Step::Play(Move::new(
            Mark::X,
            tabletop_core::Action::Drop { column: 3 },
        ))],
    );
    let o = Scripted::new("Otto", PlayerKind::Human, vec![Step::Quit]);
    let mut manager = GameManager::new(new_game(GameKind::ConnectFour), x, o, tx, SessionLimits::default());

    manager.run().await.unwrap();
    assert!(drain(&mut rx).iter().any(|e| matches!(
        e,
        GameEvent::Effect(tabletop_core::Effect::Landed(cell)) if cell.row == 5 && cell.col == 3
    )));
}

#[tokio::test]
async fn test_computers_finish_and_restart() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let x = Box::new(SmartPlayer::new("Smart", 2, Some(1), Duration::ZERO));
    let o = Box::new(RandomPlayer::new("Random", Some(2), Duration::ZERO));
    let mut manager = GameManager::new(new_game(GameKind::ConnectFour), x, o, tx, SessionLimits::default());

    let report: SessionReport = manager.run().await.unwrap();
    assert!(matches!(report.outcome(), Outcome::Won(_) | Outcome::Draw));
    assert!(manager.game().is_over());
    assert_eq!(*report.rejected(), 0);

    manager.restart();
    assert_eq!(manager.game().move_count(), 0);
    assert!(!manager.game().is_over());
}

#[tokio::test]
async fn test_restart_draws_new_obstacles() {
    let (tx, _rx) = mpsc::unbounded_channel();
    let x = Box::new(RandomPlayer::new("Rand X", Some(1), Duration::ZERO));
    let o = Box::new(RandomPlayer::new("Rand O", Some(2), Duration::ZERO));
    let mut manager = GameManager::new(new_game(GameKind::Obstacles), x, o, tx, SessionLimits::default());

    let seed_of = |game: &AnyGame| match game {
        AnyGame::Obstacles(obstacles) => obstacles.seed(),
        other => panic!("expected obstacles, got {}", other.kind()),
    };
    let first = seed_of(manager.game());
    manager.restart();
    let second = seed_of(manager.game());
    manager.restart();
    let third = seed_of(manager.game());
    assert_ne!(first, second);
    assert_ne!(second, third);
    assert_ne!(first, third);
    assert_eq!(manager.game().move_count(), 0);
}
