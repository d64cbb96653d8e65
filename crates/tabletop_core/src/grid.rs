//! Rectangular cell storage with line enumeration.

use crate::mark::Cell;
use serde::{Deserialize, Serialize};

/// The four line directions as (row step, column step).
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Row-major grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }
}

impl<T> Grid<T> {
    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the coordinate lies inside the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Gets the value at a cell.
    pub fn get(&self, cell: Cell) -> Option<&T> {
        self.index(cell).map(|i| &self.cells[i])
    }

    /// Sets the value at a cell, returning the previous value.
    ///
    /// Returns `None` and leaves the grid untouched when the cell is outside.
    pub fn set(&mut self, cell: Cell, value: T) -> Option<T> {
        let i = self.index(cell)?;
        Some(std::mem::replace(&mut self.cells[i], value))
    }

    /// Iterates all coordinates in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }

    /// Iterates coordinates together with their values.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> + '_ {
        self.cells().zip(self.cells.iter())
    }

    /// Every straight segment of `len` cells lying inside the grid.
    ///
    /// Segments run left to right, top to bottom, and along both diagonals,
    /// always starting from the upper end.
    pub fn lines(&self, len: usize) -> Vec<Vec<Cell>> {
        let mut lines = Vec::new();
        if len == 0 {
            return lines;
        }
        for start in self.cells() {
            for (d_row, d_col) in DIRECTIONS {
                let segment: Option<Vec<Cell>> = (0..len)
                    .map(|step| {
                        let step = step as isize;
                        start
                            .offset(d_row * step, d_col * step)
                            .filter(|cell| self.contains(*cell))
                    })
                    .collect();
                if let Some(segment) = segment {
                    lines.push(segment);
                }
            }
        }
        lines
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| cell.row * self.cols + cell.col)
    }
}

impl<T: PartialEq> Grid<T> {
    /// Whether every cell of `line` holds `value`.
    pub fn line_is(&self, line: &[Cell], value: &T) -> bool {
        line.iter().all(|cell| self.get(*cell) == Some(value))
    }

    /// Number of cells holding `value`.
    pub fn count(&self, value: &T) -> usize {
        self.cells.iter().filter(|v| *v == value).count()
    }
}

/// Renders a grid as rows of `|`-separated cells with a column header.
pub fn render_grid<T>(grid: &Grid<T>, mut show: impl FnMut(Cell, &T) -> String) -> String {
    let width = grid
        .iter()
        .map(|(cell, value)| show(cell, value).chars().count())
        .max()
        .unwrap_or(1)
        .max(1);
    let mut out = String::from("   ");
    for col in 0..grid.cols() {
        out.push_str(&format!(" {:^width$}", col, width = width));
    }
    out.push('\n');
    for row in 0..grid.rows() {
        out.push_str(&format!("{:>2} ", row));
        for col in 0..grid.cols() {
            let cell = Cell::new(row, col);
            let text = grid.get(cell).map(|v| show(cell, v)).unwrap_or_default();
            out.push('|');
            out.push_str(&format!("{:^width$}", text, width = width));
        }
        out.push_str("|\n");
    }
    out
}
