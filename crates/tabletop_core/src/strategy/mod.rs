//! Computer strategies.
//!
//! [`random_move`] picks uniformly among legal moves. [`smart_move`] takes
//! an immediate win when there is one and otherwise searches with
//! alpha-beta minimax; word tic-tac-toe uses a dictionary-driven rule set
//! instead because its branching factor is too wide to search.

mod search;
mod word;

pub use search::{WIN_SCORE, best_moves, negamax};
pub use word::word_move;

use crate::any::AnyGame;
use crate::game::{Game, GameKind};
use crate::moves::Move;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Shallowest search: the opponent's reply must be seen to block it.
const MIN_DEPTH: u32 = 2;

/// Deepest search worth running for `kind` given its branching factor.
pub fn depth_cap(kind: GameKind) -> u32 {
    match kind {
        GameKind::Misere | GameKind::Memory | GameKind::Pyramid => 9,
        GameKind::ConnectFour | GameKind::FourByFour | GameKind::Infinity => 5,
        GameKind::Sus => 4,
        GameKind::FiveByFive | GameKind::Numerical | GameKind::Ultimate => 3,
        GameKind::Diamond | GameKind::Obstacles => 2,
        GameKind::Word => 1,
    }
}

/// A uniformly random legal move.
pub fn random_move<G: Game, R: Rng + ?Sized>(game: &G, rng: &mut R) -> Option<Move> {
    game.legal_moves().choose(rng).copied()
}

/// A move that wins on the spot, if one exists.
pub fn winning_move<G: Game>(game: &G) -> Option<Move> {
    let me = game.to_move();
    game.legal_moves().into_iter().find(|mv| {
        let mut next = game.clone();
        next.apply(mv).is_ok() && next.status().winner() == Some(me)
    })
}

/// Rule-based computer move.
///
/// `depth` is raised to two plies, so an opponent's immediate win is
/// always blocked, and clamped to [`depth_cap`] for the variant. Ties between
/// equally good moves are broken with `rng`.
#[instrument(skip(game, rng), fields(kind = %game.kind()))]
pub fn smart_move<R: Rng + ?Sized>(game: &AnyGame, depth: u32, rng: &mut R) -> Option<Move> {
    if game.is_over() {
        return None;
    }
    if let AnyGame::Word(word) = game {
        return word_move(word, rng);
    }
    if let Some(mv) = winning_move(game) {
        debug!(%mv, "Taking immediate win");
        return Some(mv);
    }
    let depth = depth.max(MIN_DEPTH).min(depth_cap(game.kind()));
    let best = best_moves(game, depth);
    debug!(depth, candidates = best.len(), "Search finished");
    best.choose(rng).copied().or_else(|| random_move(game, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::any::GameOptions;
    use crate::mark::Mark;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use strum::IntoEnumIterator;

    #[test]
    fn test_random_move_is_legal_for_every_game() {
        let mut rng = StdRng::seed_from_u64(3);
        for kind in GameKind::iter() {
            let mut game = AnyGame::new(kind, &GameOptions::default());
            let mv = random_move(&game, &mut rng).unwrap();
            assert!(game.apply(&mv).is_ok(), "{}: {}", kind, mv);
        }
    }

    #[test]
    fn test_smart_move_is_legal_for_every_game() {
        let mut rng = StdRng::seed_from_u64(5);
        for kind in GameKind::iter() {
            let mut game = AnyGame::new(kind, &GameOptions::default());
            let mv = smart_move(&game, 2, &mut rng).unwrap();
            assert!(game.apply(&mv).is_ok(), "{}: {}", kind, mv);
        }
    }

    #[test]
    fn test_smart_takes_the_win() {
        let mut game = AnyGame::new(GameKind::Memory, &GameOptions::default());
        for mv in [
            Move::place(Mark::X, 0, 0),
            Move::place(Mark::O, 1, 0),
            Move::place(Mark::X, 0, 1),
            Move::place(Mark::O, 1, 1),
        ] {
            game.apply(&mv).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(smart_move(&game, 4, &mut rng), Some(Move::place(Mark::X, 0, 2)));
    }

    #[test]
    fn test_smart_prefers_win_over_block() {
        let mut game = AnyGame::new(GameKind::Pyramid, &GameOptions::default());
        // O threatens the pyramid base (2, 0) (2, 1) (2, 2).
        for mv in [
            Move::place(Mark::X, 1, 2),
            Move::place(Mark::O, 2, 0),
            Move::place(Mark::X, 1, 1),
            Move::place(Mark::O, 2, 1),
        ] {
            game.apply(&mv).unwrap();
        }
        // X can win at once through the middle row instead.
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(smart_move(&game, 3, &mut rng), Some(Move::place(Mark::X, 1, 3)));
    }

    #[test]
    fn test_blocks_at_depth_one() {
        let mut game = AnyGame::new(GameKind::ConnectFour, &GameOptions::default());
        // O stacks three in column 3; X has no win of its own.
        for (mark, column) in [
            (Mark::X, 0),
            (Mark::O, 3),
            (Mark::X, 0),
            (Mark::O, 3),
            (Mark::X, 6),
            (Mark::O, 3),
        ] {
            game.apply(&Move::new(mark, crate::moves::Action::Drop { column }))
                .unwrap();
        }
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                smart_move(&game, 1, &mut rng),
                Some(Move::new(Mark::X, crate::moves::Action::Drop { column: 3 }))
            );
        }
    }

    #[test]
    fn test_no_move_when_over() {
        let mut game = AnyGame::new(GameKind::Memory, &GameOptions::default());
        for mv in [
            Move::place(Mark::X, 0, 0),
            Move::place(Mark::O, 1, 0),
            Move::place(Mark::X, 0, 1),
            Move::place(Mark::O, 1, 1),
            Move::place(Mark::X, 0, 2),
        ] {
            game.apply(&mv).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(smart_move(&game, 4, &mut rng), None);
        assert_eq!(random_move(&game, &mut rng), None);
    }
}
