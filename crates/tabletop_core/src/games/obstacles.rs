//! 6x6 tic-tac-toe where obstacles appear after every round.

use crate::error::MoveError;
use crate::game::{Game, GameKind, check_turn, wrong_action};
use crate::grid::{Grid, render_grid};
use crate::mark::{Cell, Mark};
use crate::moves::{Action, Move};
use crate::status::{Effect, GameStatus};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

const SIZE: usize = 6;
const OBSTACLES_PER_ROUND: usize = 2;
/// Mixed into the seed of copies so they never share the live stream.
const COPY_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Contents of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    /// Nothing here yet.
    Empty,
    /// A player's mark.
    Taken(Mark),
    /// Blocked for the rest of the game.
    Obstacle,
}

/// Obstacles tic-tac-toe.
///
/// A copy draws its obstacles from its own generator, so searching on a
/// copy reveals nothing about the obstacles the live board will get.
#[derive(Debug)]
pub struct Obstacles {
    board: Grid<Tile>,
    lines: Vec<Vec<Cell>>,
    seed: u64,
    rng: StdRng,
    to_move: Mark,
    moves: usize,
    status: GameStatus,
}

impl Obstacles {
    /// Creates an empty board with obstacles drawn from entropy.
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Creates an empty board with reproducible obstacles.
    pub fn with_seed(seed: u64) -> Self {
        let board = Grid::new(SIZE, SIZE, Tile::Empty);
        let lines = board.lines(4);
        Self {
            board,
            lines,
            seed,
            rng: StdRng::seed_from_u64(seed),
            to_move: Mark::X,
            moves: 0,
            status: GameStatus::InProgress,
        }
    }

    /// Seed of the obstacle generator.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restarts the obstacle generator from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        debug!(seed, "Reseeding obstacles");
        self.seed = seed;
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Contents of a cell.
    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        self.board.get(cell).copied()
    }

    fn empty_cells(&self) -> Vec<Cell> {
        self.board
            .iter()
            .filter(|(_, tile)| **tile == Tile::Empty)
            .map(|(cell, _)| cell)
            .collect()
    }

    fn add_obstacles(&mut self) -> Vec<Cell> {
        let mut empty = self.empty_cells();
        empty.shuffle(&mut self.rng);
        empty.truncate(OBSTACLES_PER_ROUND);
        for cell in &empty {
            self.board.set(*cell, Tile::Obstacle);
        }
        empty
    }
}

impl Clone for Obstacles {
    fn clone(&self) -> Self {
        let copy_seed = self.seed ^ COPY_SALT ^ self.moves as u64;
        Self {
            board: self.board.clone(),
            lines: self.lines.clone(),
            seed: self.seed,
            rng: StdRng::seed_from_u64(copy_seed),
            to_move: self.to_move,
            moves: self.moves,
            status: self.status,
        }
    }
}

impl Default for Obstacles {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Obstacles {
    fn kind(&self) -> GameKind {
        GameKind::Obstacles
    }

    fn to_move(&self) -> Mark {
        self.to_move
    }

    fn status(&self) -> GameStatus {
        self.status
    }

    fn move_count(&self) -> usize {
        self.moves
    }

    #[instrument(skip_all, fields(mv = %mv))]
    fn apply(&mut self, mv: &Move) -> Result<Vec<Effect>, MoveError> {
        check_turn(self.status, self.to_move, mv)?;
        let Action::Place(cell) = mv.action else {
            return Err(wrong_action(self.kind(), mv));
        };
        match self.board.get(cell) {
            None => return Err(MoveError::OutOfBoard(cell)),
            Some(Tile::Empty) => {}
            Some(Tile::Taken(_)) => return Err(MoveError::CellOccupied(cell)),
            Some(Tile::Obstacle) => {
                return Err(MoveError::BoardUpdate(format!("{} is blocked by an obstacle", cell)));
            }
        }
        self.board.set(cell, Tile::Taken(mv.mark));
        self.moves += 1;

        let mut effects = Vec::new();
        if self.moves % 2 == 0 {
            let added = self.add_obstacles();
            debug!(round = self.moves / 2, ?added, "End of round obstacles");
            if !added.is_empty() {
                effects.push(Effect::ObstaclesAdded(added));
            }
        }

        let mark_tile = Tile::Taken(mv.mark);
        if self.lines.iter().any(|line| self.board.line_is(line, &mark_tile)) {
            self.status = GameStatus::Won(mv.mark);
        } else if self.empty_cells().is_empty() {
            self.status = GameStatus::Draw;
        }
        self.to_move = self.to_move.opponent();
        Ok(effects)
    }

    fn legal_moves(&self) -> Vec<Move> {
        if self.status.is_over() {
            return Vec::new();
        }
        self.empty_cells()
            .into_iter()
            .map(|cell| Move::new(self.to_move, Action::Place(cell)))
            .collect()
    }

    fn render(&self, _reveal: bool) -> String {
        render_grid(&self.board, |_, tile| match tile {
            Tile::Empty => ".".to_string(),
            Tile::Taken(mark) => mark.symbol().to_string(),
            Tile::Obstacle => "#".to_string(),
        })
    }

    fn heuristic(&self, mark: Mark) -> i32 {
        let mut score = 0;
        for line in &self.lines {
            let tiles: Vec<Tile> = line.iter().filter_map(|c| self.tile(*c)).collect();
            if tiles.contains(&Tile::Obstacle) {
                continue;
            }
            let mine = tiles.iter().filter(|t| **t == Tile::Taken(mark)).count() as i32;
            let theirs = tiles
                .iter()
                .filter(|t| **t == Tile::Taken(mark.opponent()))
                .count() as i32;
            match (mine, theirs) {
                (n, 0) => score += n * n,
                (0, n) => score -= n * n,
                _ => {}
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_obstacles_after_each_round() {
        let mut game = Obstacles::with_seed(7);
        assert!(game.apply(&Move::place(Mark::X, 0, 0)).unwrap().is_empty());
        let effects = game.apply(&Move::place(Mark::O, 5, 5)).unwrap();
        let [Effect::ObstaclesAdded(cells)] = effects.as_slice() else {
            panic!("expected obstacles, got {:?}", effects);
        };
        assert_eq!(cells.len(), 2);
        for cell in cells {
            assert_eq!(game.tile(*cell), Some(Tile::Obstacle));
        }
        assert_eq!(game.legal_moves().len(), 36 - 4);
    }

    #[test]
    fn test_obstacle_cell_is_rejected() {
        let mut game = Obstacles::with_seed(1);
        game.apply(&Move::place(Mark::X, 0, 0)).unwrap();
        let effects = game.apply(&Move::place(Mark::O, 0, 1)).unwrap();
        let Some(Effect::ObstaclesAdded(cells)) = effects.first() else {
            panic!("expected obstacles");
        };
        let blocked = cells[0];
        let err = game
            .apply(&Move::new(Mark::X, Action::Place(blocked)))
            .unwrap_err();
        assert!(matches!(err, MoveError::BoardUpdate(_)));
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let play = |seed| {
            let mut game = Obstacles::with_seed(seed);
            game.apply(&Move::place(Mark::X, 2, 2)).unwrap();
            game.apply(&Move::place(Mark::O, 3, 3)).unwrap()
        };
        assert_eq!(play(42), play(42));
    }

    /// Plays `rounds` rounds on the first free cells and collects the
    /// obstacles each round adds.
    fn obstacle_draws(game: &mut Obstacles, rounds: usize) -> Vec<Vec<Cell>> {
        let mut draws = Vec::new();
        for _ in 0..rounds {
            let mut added = Vec::new();
            for _ in 0..2 {
                let mv = game.legal_moves()[0];
                for effect in game.apply(&mv).unwrap() {
                    if let Effect::ObstaclesAdded(cells) = effect {
                        added.extend(cells);
                    }
                }
            }
            draws.push(added);
        }
        draws
    }

    #[test]
    fn test_copies_do_not_share_future_obstacles() {
        let mut live = Obstacles::with_seed(21);
        let mut copy = live.clone();
        assert_eq!(copy.seed(), live.seed());
        assert_ne!(obstacle_draws(&mut live, 3), obstacle_draws(&mut copy, 3));
    }

    #[test]
    fn test_reseed_changes_the_sequence() {
        let mut first = Obstacles::with_seed(8);
        let mut second = Obstacles::with_seed(8);
        second.reseed(9);
        assert_eq!(second.seed(), 9);
        assert_ne!(obstacle_draws(&mut first, 3), obstacle_draws(&mut second, 3));
    }
}
