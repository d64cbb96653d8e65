//! Rule engines, one per variant.
//!
//! Variants that put marks on cells share the helpers below; everything
//! else about a variant lives in its own module.

mod connect_four;
mod diamond;
mod five_by_five;
mod four_by_four;
mod infinity;
mod memory;
mod misere;
mod numerical;
mod obstacles;
mod pyramid;
mod sus;
mod ultimate;
mod word;

pub use connect_four::ConnectFour;
pub use diamond::Diamond;
pub use five_by_five::{FiveByFive, MOVE_LIMIT};
pub use four_by_four::FourByFour;
pub use infinity::Infinity;
pub use memory::Memory;
pub use misere::Misere;
pub use numerical::{Numerical, TARGET, numbers_for};
pub use obstacles::{Obstacles, Tile};
pub use pyramid::Pyramid;
pub use sus::Sus;
pub use ultimate::{SubBoard, Ultimate, sub_board_of};
pub use word::Word;

use crate::error::MoveError;
use crate::grid::{Grid, render_grid};
use crate::mark::{Cell, Mark};

/// Grid of optional marks.
pub(crate) type MarkGrid = Grid<Option<Mark>>;

/// Checks that `cell` is on the board and empty.
pub(crate) fn check_empty<T>(grid: &Grid<Option<T>>, cell: Cell) -> Result<(), MoveError> {
    match grid.get(cell) {
        None => Err(MoveError::OutOfBoard(cell)),
        Some(Some(_)) => Err(MoveError::CellOccupied(cell)),
        Some(None) => Ok(()),
    }
}

/// Empty cells in row-major order.
pub(crate) fn empty_cells<T>(grid: &Grid<Option<T>>) -> Vec<Cell> {
    grid.iter()
        .filter(|(_, value)| value.is_none())
        .map(|(cell, _)| cell)
        .collect()
}

/// Whether `mark` owns every cell of any of `lines`.
pub(crate) fn owns_line(grid: &MarkGrid, lines: &[Vec<Cell>], mark: Mark) -> bool {
    lines.iter().any(|line| grid.line_is(line, &Some(mark)))
}

/// How many of `lines` are fully owned by `mark`.
pub(crate) fn count_lines(grid: &MarkGrid, lines: &[Vec<Cell>], mark: Mark) -> usize {
    lines
        .iter()
        .filter(|line| grid.line_is(line, &Some(mark)))
        .count()
}

/// Line-potential evaluation: lines still open to one side are worth the
/// square of the marks already in them.
pub(crate) fn line_potential(grid: &MarkGrid, lines: &[Vec<Cell>], mark: Mark) -> i32 {
    let mut score = 0;
    for line in lines {
        let mut mine = 0;
        let mut theirs = 0;
        for cell in line {
            match grid.get(*cell) {
                Some(Some(m)) if *m == mark => mine += 1,
                Some(Some(_)) => theirs += 1,
                _ => {}
            }
        }
        match (mine, theirs) {
            (0, 0) => {}
            (n, 0) => score += n * n,
            (0, n) => score -= n * n,
            _ => {}
        }
    }
    score
}

/// Renders a mark grid; empty cells show as `.`.
pub(crate) fn render_marks(grid: &MarkGrid) -> String {
    render_grid(grid, |_, value| match value {
        Some(mark) => mark.symbol().to_string(),
        None => ".".to_string(),
    })
}

/// Renders a grid of characters; empty cells show as `.`.
pub(crate) fn render_chars(grid: &Grid<Option<char>>) -> String {
    render_grid(grid, |_, value| value.unwrap_or('.').to_string())
}

/// The eight winning lines of a 3x3 board.
pub(crate) fn classic_lines() -> Vec<Vec<Cell>> {
    Grid::new(3, 3, ()).lines(3)
}
