//! Plain-text grid codec, for tools and test fixtures.
//!
//! One line per row, one character per cell:
//!
//! - `.` free
//! - `#` wall
//! - `S` start (free)
//! - `G` goal (free)
//!
//! Blank lines and lines starting with `;` are skipped. Surrounding
//! whitespace on each line is ignored.

use thiserror::Error;

use maze_core::{Grid, GridError, Point};

/// A parsed text grid with its optional markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGrid {
    pub grid: Grid,
    pub start: Option<Point>,
    pub goal: Option<Point>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextGridError {
    #[error("unexpected character {ch:?} at row {row}, col {col}")]
    BadChar { ch: char, row: usize, col: usize },

    #[error("more than one {0:?} marker")]
    DuplicateMarker(char),

    #[error(transparent)]
    Shape(#[from] GridError),
}

/// Parse a text grid.
pub fn parse_text_grid(text: &str) -> Result<TextGrid, TextGridError> {
    let mut rows = Vec::new();
    let mut start = None;
    let mut goal = None;

    let lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with(';'));

    for (row_idx, line) in lines.enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for (col_idx, ch) in line.chars().enumerate() {
            let here = Point::new(row_idx as i32, col_idx as i32);
            match ch {
                '.' => row.push(false),
                '#' => row.push(true),
                'S' => {
                    set_marker(&mut start, here, 'S')?;
                    row.push(false);
                }
                'G' => {
                    set_marker(&mut goal, here, 'G')?;
                    row.push(false);
                }
                _ => {
                    return Err(TextGridError::BadChar {
                        ch,
                        row: row_idx,
                        col: col_idx,
                    })
                }
            }
        }
        rows.push(row);
    }

    Ok(TextGrid {
        grid: Grid::new(rows)?,
        start,
        goal,
    })
}

/// Render a grid, overlaying `path` cells with `*`.
///
/// The first and last path cells are drawn as `S` and `G`.
pub fn format_text_grid(grid: &Grid, path: &[Point]) -> String {
    let mut out = String::with_capacity(grid.len() + grid.rows());
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let p = Point::new(row as i32, col as i32);
            let ch = if path.first() == Some(&p) {
                'S'
            } else if path.last() == Some(&p) {
                'G'
            } else if path.contains(&p) {
                '*'
            } else if grid.is_wall(p) {
                '#'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

fn set_marker(slot: &mut Option<Point>, here: Point, marker: char) -> Result<(), TextGridError> {
    if slot.replace(here).is_some() {
        return Err(TextGridError::DuplicateMarker(marker));
    }
    Ok(())
}
