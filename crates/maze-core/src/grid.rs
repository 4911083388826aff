//! Rectangular wall grid.
//!
//! Cells are stored row-major in a flat `Vec<bool>` (`true` = wall).
//! The flat index doubles as the packed-integer key for per-cell
//! search state.

use crate::error::GridError;
use crate::point::Point;

/// A validated, rectangular, non-empty grid of walls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Build a grid from rows of wall flags.
    ///
    /// Fails if there are no rows, the rows are empty, or any row's
    /// length differs from the first.
    pub fn new(rows: Vec<Vec<bool>>) -> Result<Self, GridError> {
        let first = rows.first().ok_or(GridError::Empty)?;
        let cols = first.len();
        if cols == 0 {
            return Err(GridError::EmptyRow);
        }

        let num_rows = rows.len();
        let mut cells = Vec::with_capacity(num_rows * cols);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::Jagged {
                    row: idx,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Grid {
            rows: num_rows,
            cols,
            cells,
        })
    }

    /// An all-free grid of the given size. Zero dimensions are an error.
    pub fn open(rows: usize, cols: usize) -> Result<Self, GridError> {
        Grid::new(vec![vec![false; cols]; rows])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a `Grid` is at least 1x1.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat row-major index of `p`, or `None` if it lies outside the grid.
    pub fn index_of(&self, p: Point) -> Option<usize> {
        let row = usize::try_from(p.row).ok()?;
        let col = usize::try_from(p.col).ok()?;
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Inverse of [`Grid::index_of`]. `idx` must be `< self.len()`.
    pub fn point_at(&self, idx: usize) -> Point {
        Point::new((idx / self.cols) as i32, (idx % self.cols) as i32)
    }

    /// True if `p` lies inside the grid.
    pub fn contains(&self, p: Point) -> bool {
        self.index_of(p).is_some()
    }

    /// True if `p` is a wall. Points outside the grid count as walls.
    pub fn is_wall(&self, p: Point) -> bool {
        self.index_of(p).map_or(true, |idx| self.cells[idx])
    }

    /// True if `p` is inside the grid and not a wall.
    pub fn is_passable(&self, p: Point) -> bool {
        !self.is_wall(p)
    }

    /// Set or clear a wall. Returns `false` if `p` is outside the grid.
    pub fn set_wall(&mut self, p: Point, wall: bool) -> bool {
        match self.index_of(p) {
            Some(idx) => {
                self.cells[idx] = wall;
                true
            }
            None => false,
        }
    }

    /// Copy the grid back out as rows of wall flags.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells.chunks(self.cols).map(<[bool]>::to_vec).collect()
    }
}
