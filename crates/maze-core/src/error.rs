//! Error types for the maze core.
//!
//! The search and playback APIs are infallible for any `Grid` that
//! exists: invalid shapes are rejected when the grid is built, which
//! is the only fallible step in this crate.

use thiserror::Error;

/// Why a set of rows could not be turned into a [`crate::Grid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// No rows at all.
    #[error("grid has no rows")]
    Empty,

    /// The first row has no columns.
    #[error("grid rows have no columns")]
    EmptyRow,

    /// A row's length differs from the first row's.
    #[error("row {row} has {found} columns, expected {expected}")]
    Jagged {
        row: usize,
        expected: usize,
        found: usize,
    },
}
