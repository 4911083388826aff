//! Grid coordinates.

use std::fmt;

/// A `(row, col)` cell coordinate, zero-indexed from the top-left.
///
/// Coordinates are signed so that out-of-range input coming off the
/// wire can be represented (and rejected) without wrapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: i32,
    pub col: i32,
}

/// Neighbor offsets in expansion order: up, down, left, right.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl Point {
    pub const fn new(row: i32, col: i32) -> Self {
        Point { row, col }
    }

    /// Manhattan distance to `other`, saturating at `u32::MAX`.
    pub fn manhattan(self, other: Point) -> u32 {
        self.row
            .abs_diff(other.row)
            .saturating_add(self.col.abs_diff(other.col))
    }

    /// The point shifted by `(d_row, d_col)`, or `None` on overflow.
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Point> {
        Some(Point {
            row: self.row.checked_add(d_row)?,
            col: self.col.checked_add(d_col)?,
        })
    }

    /// The four orthogonal neighbors, in expansion order.
    ///
    /// Neighbors that would overflow `i32` are skipped; bounds against
    /// a concrete grid are the caller's concern.
    pub fn neighbors(self) -> impl Iterator<Item = Point> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// True when `other` is exactly one orthogonal step away.
    pub fn is_adjacent(self, other: Point) -> bool {
        self.manhattan(other) == 1
    }
}

/// Canonical `"row,col"` key, as used in `visitedNodes`.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl From<(i32, i32)> for Point {
    fn from((row, col): (i32, i32)) -> Self {
        Point { row, col }
    }
}
