//! Dictionary-driven play for word tic-tac-toe.

use super::winning_move;
use crate::game::Game;
use crate::games::Word;
use crate::mark::Cell;
use crate::moves::Move;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

const CENTRE: Cell = Cell::new(1, 1);
const PER_OPEN_LINE: i32 = 15;
const CENTRE_BONUS: i32 = 2;
const HANDS_OVER_WIN: i32 = -1_000;

/// Picks a word tic-tac-toe move.
///
/// Wins outright when possible. Otherwise every move that leaves the
/// opponent an immediate win is heavily penalised, which also blocks any
/// threat already on the board, and the rest are scored by how many lines
/// through the cell can still spell a word.
#[instrument(skip_all)]
pub fn word_move<R: Rng + ?Sized>(game: &Word, rng: &mut R) -> Option<Move> {
    if let Some(mv) = winning_move(game) {
        debug!(%mv, "Spelling a word");
        return Some(mv);
    }

    let mut best_score = i32::MIN;
    let mut best = Vec::new();
    for mv in game.legal_moves() {
        let mut next = game.clone();
        if next.apply(&mv).is_err() {
            continue;
        }
        let Some(cell) = target(&mv) else {
            continue;
        };
        let mut score = 0;
        if !next.status().is_over() && winning_move(&next).is_some() {
            score += HANDS_OVER_WIN;
        }
        let open_lines = next
            .patterns_through(cell)
            .iter()
            .filter(|pattern| pattern.iter().any(Option::is_none))
            .filter(|pattern| next.dictionary().completions(pattern) > 0)
            .count() as i32;
        score += PER_OPEN_LINE * open_lines;
        if cell == CENTRE {
            score += CENTRE_BONUS;
        }

        if score > best_score {
            best_score = score;
            best.clear();
            best.push(mv);
        } else if score == best_score {
            best.push(mv);
        }
    }
    debug!(best_score, candidates = best.len(), "Scored letters");
    best.choose(rng).copied()
}

fn target(mv: &Move) -> Option<Cell> {
    match mv.action {
        crate::moves::Action::Letter { cell, .. } => Some(cell),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;
    use crate::mark::Mark;
    use crate::moves::Action;
    use crate::status::GameStatus;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    fn letter(mark: Mark, c: char, row: usize, col: usize) -> Move {
        Move::new(
            mark,
            Action::Letter {
                cell: Cell::new(row, col),
                letter: c,
            },
        )
    }

    #[test]
    fn test_completes_a_word() {
        let mut game = Word::new(Arc::new(Dictionary::from_text("CAT").unwrap()));
        game.apply(&letter(Mark::X, 'C', 0, 0)).unwrap();
        game.apply(&letter(Mark::O, 'A', 0, 1)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mv = word_move(&game, &mut rng).unwrap();
        game.apply(&mv).unwrap();
        assert_eq!(game.status(), GameStatus::Won(Mark::X));
    }

    #[test]
    fn test_never_sets_up_the_opponent() {
        let mut game = Word::new(Arc::new(Dictionary::from_text("CAT").unwrap()));
        game.apply(&letter(Mark::X, 'C', 0, 0)).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let mv = word_move(&game, &mut rng).unwrap();
            let mut next = game.clone();
            next.apply(&mv).unwrap();
            assert!(winning_move(&next).is_none(), "{} hands X a word", mv);
        }
    }
}
