//! Alpha-beta minimax in negamax form.

use crate::game::Game;
use crate::moves::Move;
use crate::status::GameStatus;

/// Score of a won position, reduced by the ply it is reached at so that
/// faster wins and slower losses are preferred.
pub const WIN_SCORE: i32 = 10_000;

const INFINITY: i32 = i32::MAX / 2;

/// Value of `game` for the side to move, searched `depth` plies deep.
pub fn negamax<G: Game>(game: &G, depth: u32, mut alpha: i32, beta: i32, ply: i32) -> i32 {
    match game.status() {
        GameStatus::Won(mark) if mark == game.to_move() => return WIN_SCORE - ply,
        GameStatus::Won(_) => return -(WIN_SCORE - ply),
        GameStatus::Draw => return 0,
        GameStatus::InProgress => {}
    }
    if depth == 0 {
        return game.heuristic(game.to_move());
    }
    let moves = game.legal_moves();
    if moves.is_empty() {
        return 0;
    }

    let mut best = -INFINITY;
    for mv in &moves {
        let mut child = game.clone();
        if child.apply(mv).is_err() {
            continue;
        }
        let score = -negamax(&child, depth - 1, -beta, -alpha, ply + 1);
        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }
    best
}

/// Every root move tied for the best search value.
pub fn best_moves<G: Game>(game: &G, depth: u32) -> Vec<Move> {
    let mut best_score = -INFINITY;
    let mut best = Vec::new();
    for mv in game.legal_moves() {
        let mut child = game.clone();
        if child.apply(&mv).is_err() {
            continue;
        }
        // Window just below the best so ties keep exact values.
        let alpha = best_score.saturating_sub(1).max(-INFINITY);
        let score = -negamax(&child, depth.saturating_sub(1), -INFINITY, -alpha, 1);
        if score > best_score {
            best_score = score;
            best.clear();
            best.push(mv);
        } else if score == best_score {
            best.push(mv);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::Misere;
    use crate::mark::Mark;

    #[test]
    fn test_misere_avoids_completing_a_line() {
        let mut game = Misere::new();
        for mv in [
            Move::place(Mark::X, 0, 0),
            Move::place(Mark::O, 2, 2),
            Move::place(Mark::X, 0, 1),
            Move::place(Mark::O, 2, 0),
        ] {
            game.apply(&mv).unwrap();
        }
        let best = best_moves(&game, 3);
        assert!(!best.is_empty());
        assert!(!best.contains(&Move::place(Mark::X, 0, 2)));
    }

    #[test]
    fn test_scores_terminal_positions() {
        let mut game = Misere::new();
        for mv in [
            Move::place(Mark::X, 0, 0),
            Move::place(Mark::O, 1, 0),
            Move::place(Mark::X, 0, 1),
            Move::place(Mark::O, 1, 1),
            Move::place(Mark::X, 0, 2),
        ] {
            game.apply(&mv).unwrap();
        }
        // X completed a line, so O (to move) has won.
        assert_eq!(negamax(&game, 3, -INFINITY, INFINITY, 0), WIN_SCORE);
    }
}
