//! Side and coordinate types shared by every game.

use serde::{Deserialize, Serialize};

/// One of the two sides in a game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Mark {
    /// Returns the opponent mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Returns the mark as a board symbol.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// A zero-based board coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("({}, {})", row, col)]
pub struct Cell {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index, counted from the left.
    pub col: usize,
}

impl Cell {
    /// Creates a cell coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offsets the cell by a signed step, returning `None` below zero.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Self { row, col })
    }

    /// Whether `other` is one step up, down, left or right of this cell.
    pub fn is_orthogonal_neighbor(self, other: Cell) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_flips() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent().opponent(), Mark::O);
    }

    #[test]
    fn test_offset_stops_at_zero() {
        assert_eq!(Cell::new(0, 2).offset(-1, 0), None);
        assert_eq!(Cell::new(1, 1).offset(1, -1), Some(Cell::new(2, 0)));
    }

    #[test]
    fn test_orthogonal_neighbor() {
        assert!(Cell::new(1, 1).is_orthogonal_neighbor(Cell::new(0, 1)));
        assert!(!Cell::new(1, 1).is_orthogonal_neighbor(Cell::new(0, 0)));
        assert!(!Cell::new(1, 1).is_orthogonal_neighbor(Cell::new(1, 1)));
    }
}
