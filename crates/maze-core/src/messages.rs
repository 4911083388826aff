//! Message types used by the playback controller.
//!
//! These are **transport-agnostic** logical messages:
//! - [`Command`]: what a session consumes.
//! - [`OutputEvent`]: what a session produces.
//!
//! JSON encoders live in the `maze-protocol` crate; this module is
//! purely logical.

use std::time::Duration;

use crate::grid::Grid;
use crate::point::Point;
use crate::search::SearchResult;

/// A control command into a playback session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Search and start replaying. Pre-empts any session in progress.
    Solve(SolveRequest),

    /// Suspend replay, keeping the queue.
    Pause,

    /// Continue a paused replay from where it stopped.
    Resume,

    /// Abort replay and discard everything.
    Stop,
}

/// Everything a `solve` needs. The grid is already shape-validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveRequest {
    pub grid: Grid,
    pub start: Point,
    pub goal: Point,

    /// Interval between visit events. `None` means "use the
    /// controller's default".
    pub pace: Option<Duration>,
}

/// An event emitted by a playback session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    /// One expanded cell, in expansion order.
    Visit(Point),

    /// Terminal summary of a session (or a rejected command).
    Done(DoneSummary),
}

/// Terminal summary event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoneSummary {
    pub path: Vec<Point>,

    /// Number of moves along `path`, start cell excluded.
    pub path_length: usize,

    pub visited_count: usize,

    /// `"row,col"` keys in expansion order.
    pub visited_nodes: Vec<String>,

    /// Set only when the summary reports a rejected command.
    pub error: Option<String>,
}

impl DoneSummary {
    /// Summary of a completed search.
    pub fn from_result(result: &SearchResult) -> Self {
        DoneSummary {
            path: result.path.clone(),
            path_length: result.path_length(),
            visited_count: result.visited_count(),
            visited_nodes: result.visited_nodes(),
            error: None,
        }
    }

    /// Empty summary carrying an error message.
    pub fn failed(error: impl Into<String>) -> Self {
        DoneSummary {
            error: Some(error.into()),
            ..DoneSummary::default()
        }
    }
}

impl OutputEvent {
    /// Convenience constructor for a visit event.
    pub fn visit(node: Point) -> Self {
        OutputEvent::Visit(node)
    }

    /// Convenience constructor for an error summary.
    pub fn error(message: impl Into<String>) -> Self {
        OutputEvent::Done(DoneSummary::failed(message))
    }
}
