//! Serde shapes of everything that crosses the wire.
//!
//! Field names are camelCase on the wire. The conversions to and from
//! `maze_core` types live here too; validation (bounds, walls) lives in
//! [`crate::validation`].

use serde::{Deserialize, Deserializer, Serialize};

use maze_core::{DoneSummary, OutputEvent, Point};

/// `{ "row": .., "col": .. }`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePoint {
    pub row: i32,
    pub col: i32,
}

impl From<Point> for WirePoint {
    fn from(p: Point) -> Self {
        WirePoint {
            row: p.row,
            col: p.col,
        }
    }
}

impl From<WirePoint> for Point {
    fn from(p: WirePoint) -> Self {
        Point::new(p.row, p.col)
    }
}

/// Stream commands (client → server), tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WireCommand {
    Solve(WireSolve),
    Pause,
    Resume,
    Stop,
}

/// Body of a `solve` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSolve {
    #[serde(alias = "maze")]
    pub grid: Vec<Vec<bool>>,
    pub start: WirePoint,
    pub goal: WirePoint,

    /// Milliseconds between visit events. Any JSON number is accepted:
    /// `0` means "use the default", anything else is rounded to whole
    /// milliseconds with a floor of 1.
    #[serde(
        default,
        alias = "animationSpeed",
        deserialize_with = "deserialize_pace_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub pace_ms: Option<u64>,
}

fn deserialize_pace_ms<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw
        .filter(|ms| *ms != 0.0)
        .map(|ms| ms.max(1.0).round() as u64))
}

/// Stream events (server → client), tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WireEvent {
    Visit { node: WirePoint },
    Done(WireDone),
}

/// Body of a `done` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDone {
    pub path: Vec<WirePoint>,
    pub path_length: usize,
    pub visited_count: usize,
    pub visited_nodes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&DoneSummary> for WireDone {
    fn from(s: &DoneSummary) -> Self {
        WireDone {
            path: s.path.iter().copied().map(WirePoint::from).collect(),
            path_length: s.path_length,
            visited_count: s.visited_count,
            visited_nodes: s.visited_nodes.clone(),
            error: s.error.clone(),
        }
    }
}

impl From<&OutputEvent> for WireEvent {
    fn from(ev: &OutputEvent) -> Self {
        match ev {
            OutputEvent::Visit(p) => WireEvent::Visit {
                node: WirePoint::from(*p),
            },
            OutputEvent::Done(summary) => WireEvent::Done(WireDone::from(summary)),
        }
    }
}

impl From<WireEvent> for OutputEvent {
    fn from(ev: WireEvent) -> Self {
        match ev {
            WireEvent::Visit { node } => OutputEvent::Visit(node.into()),
            WireEvent::Done(d) => OutputEvent::Done(DoneSummary {
                path: d.path.into_iter().map(Point::from).collect(),
                path_length: d.path_length,
                visited_count: d.visited_count,
                visited_nodes: d.visited_nodes,
                error: d.error,
            }),
        }
    }
}

/// Successful response of the synchronous solve endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveResponse {
    pub success: bool,
    pub path: Vec<WirePoint>,
    pub path_length: usize,
    pub visited_count: usize,
    pub visited_nodes: Vec<String>,
    pub has_path: bool,
    pub message: String,
}

/// Failure response of the synchronous solve endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            success: false,
            error: error.into(),
        }
    }
}
