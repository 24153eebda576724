use serde::Serialize;

use crate::error::ConfigError;

/// Grid cell in logical `(row, col)` coordinates.
///
/// The coordinate space is unbounded; [`Grid::in_bounds`] decides which
/// cells are playable.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    /// The top-left cell, where every session's snake starts.
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns this coordinate moved by `(d_row, d_col)`.
    #[must_use]
    pub fn offset(self, (d_row, d_col): (i32, i32)) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// Playable area dimensions, fixed for one session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Grid {
    rows: u16,
    cols: u16,
}

impl Grid {
    /// Creates a grid, rejecting a zero dimension.
    pub fn new(rows: u16, cols: u16) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid { rows, cols });
        }

        Ok(Self { rows, cols })
    }

    /// Derives the grid from a viewport measured in the same unit as the
    /// cell size. Partial cells at the right and bottom edges are dropped.
    pub fn from_viewport(
        width: u16,
        height: u16,
        cell_width: u16,
        cell_height: u16,
    ) -> Result<Self, ConfigError> {
        if cell_width == 0 || cell_height == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        Self::new(height / cell_height, width / cell_width)
    }

    #[must_use]
    pub fn rows(self) -> u16 {
        self.rows
    }

    #[must_use]
    pub fn cols(self) -> u16 {
        self.cols
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }

    /// Returns true when `c` lies inside the grid.
    #[must_use]
    pub fn in_bounds(self, c: Coordinate) -> bool {
        c.row >= 0
            && c.col >= 0
            && c.row < i32::from(self.rows)
            && c.col < i32::from(self.cols)
    }

    /// Iterates every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Coordinate> {
        let cols = i32::from(self.cols);
        (0..i32::from(self.rows))
            .flat_map(move |row| (0..cols).map(move |col| Coordinate { row, col }))
    }
}
