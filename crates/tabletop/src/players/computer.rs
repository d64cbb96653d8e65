//! Computer players.

use super::{Player, PlayerError, PlayerKind};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tabletop_core::AnyGame;
use tabletop_core::Move;
use tabletop_core::strategy::{random_move, smart_move};
use tracing::{debug, instrument};

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Plays uniformly random legal moves.
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
    delay: Duration,
}

impl RandomPlayer {
    /// Creates a random player; a seed makes its choices repeatable.
    pub fn new(name: impl Into<String>, seed: Option<u64>, delay: Duration) -> Self {
        Self {
            name: name.into(),
            rng: rng_from(seed),
            delay,
        }
    }
}

#[async_trait::async_trait]
impl Player for RandomPlayer {
    #[instrument(skip_all, fields(player = %self.name))]
    async fn choose_move(&mut self, game: &AnyGame) -> Result<Move, PlayerError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let mv = random_move(game, &mut self.rng).ok_or(PlayerError::NoMove)?;
        debug!(%mv, "Random player chose");
        Ok(mv)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Random
    }
}

/// Searches for the best move.
pub struct SmartPlayer {
    name: String,
    depth: u32,
    rng: StdRng,
    delay: Duration,
}

impl SmartPlayer {
    /// Creates a smart player searching `depth` plies.
    pub fn new(name: impl Into<String>, depth: u32, seed: Option<u64>, delay: Duration) -> Self {
        Self {
            name: name.into(),
            depth,
            rng: rng_from(seed),
            delay,
        }
    }
}

/// Unpacks the result of a search task.
fn searched(result: Result<Option<Move>, tokio::task::JoinError>) -> Result<Move, PlayerError> {
    result
        .map_err(|e| PlayerError::Failed(format!("search task failed: {}", e)))?
        .ok_or(PlayerError::NoMove)
}

#[async_trait::async_trait]
impl Player for SmartPlayer {
    #[instrument(skip_all, fields(player = %self.name, depth = self.depth))]
    async fn choose_move(&mut self, game: &AnyGame) -> Result<Move, PlayerError> {
        let pause = tokio::time::sleep(self.delay);
        let snapshot = game.clone();
        let depth = self.depth;
        // Search owns its own generator so the blocking task is 'static.
        let mut rng = StdRng::from_rng(&mut self.rng).unwrap_or_else(|_| StdRng::from_entropy());
        let search = tokio::task::spawn_blocking(move || smart_move(&snapshot, depth, &mut rng));
        let (chosen, ()) = tokio::join!(search, pause);
        let mv = searched(chosen)?;
        debug!(%mv, "Smart player chose");
        Ok(mv)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PlayerKind {
        PlayerKind::Smart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabletop_core::{Game, GameKind, GameOptions, Mark};

    #[tokio::test]
    async fn test_seeded_random_players_repeat() {
        let game = AnyGame::new(GameKind::Diamond, &GameOptions::default());
        let mut a = RandomPlayer::new("a", Some(4), Duration::ZERO);
        let mut b = RandomPlayer::new("b", Some(4), Duration::ZERO);
        assert_eq!(
            a.choose_move(&game).await.unwrap(),
            b.choose_move(&game).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_smart_player_finds_the_winning_column() {
        let mut game = AnyGame::new(GameKind::ConnectFour, &GameOptions::default());
        for column in [0, 6, 0, 6, 0, 5] {
            let mark = game.to_move();
            game.apply(&Move::new(mark, tabletop_core::Action::Drop { column }))
                .unwrap();
        }
        let mut player = SmartPlayer::new("s", 3, Some(1), Duration::ZERO);
        let mv = player.choose_move(&game).await.unwrap();
        assert_eq!(mv, Move::new(Mark::X, tabletop_core::Action::Drop { column: 0 }));
    }

    #[tokio::test]
    async fn test_crashed_search_is_a_failure_not_a_missing_move() {
        let crashed = tokio::task::spawn_blocking(|| -> Option<Move> { panic!("search blew up") }).await;
        assert!(matches!(searched(crashed), Err(PlayerError::Failed(_))));
        assert!(matches!(searched(Ok(None)), Err(PlayerError::NoMove)));
    }
}
