//! Boundary validation.
//!
//! The search engine trusts its inputs, so everything that arrives from
//! a client goes through here first:
//! - the grid must be non-empty and rectangular,
//! - start and goal must lie inside it,
//! - optionally, neither may be a wall.
//!
//! The synchronous endpoint parses its body field by field so that each
//! failure gets its own message; the stream goes through serde in one
//! shot and only needs [`validate_solve`].

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use maze_core::{Grid, GridError, Point, SolveRequest};

use crate::wire_types::{WirePoint, WireSolve};

/// What to enforce beyond shape and bounds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ValidationPolicy {
    /// Reject a start or goal that sits on a wall.
    pub reject_walls: bool,
}

impl ValidationPolicy {
    /// Shape, bounds and walls.
    pub const STRICT: ValidationPolicy = ValidationPolicy { reject_walls: true };

    /// Shape and bounds only.
    pub const LENIENT: ValidationPolicy = ValidationPolicy {
        reject_walls: false,
    };
}

/// Client-side input error. Every variant maps to a 400-class rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid JSON body")]
    InvalidJson,

    #[error("Missing required fields: maze, start, goal")]
    MissingFields,

    #[error("Invalid maze format. Expected 2D boolean array.")]
    InvalidGridFormat,

    #[error("Invalid maze: {0}")]
    InvalidGrid(#[from] GridError),

    #[error("Invalid start/goal format. Expected {{row: number, col: number}}")]
    InvalidPointFormat,

    #[error("Start or goal point is out of maze bounds")]
    OutOfBounds,

    #[error("Start or goal point cannot be on a wall")]
    OnWall,
}

/// Turn a decoded solve into a core request, applying `policy`.
pub fn validate_solve(solve: WireSolve, policy: ValidationPolicy) -> Result<SolveRequest, ValidationError> {
    let grid = Grid::new(solve.grid)?;
    let start = Point::from(solve.start);
    let goal = Point::from(solve.goal);
    check_endpoints(&grid, start, goal, policy)?;

    Ok(SolveRequest {
        grid,
        start,
        goal,
        pace: solve.pace_ms.map(Duration::from_millis),
    })
}

/// Bounds (always) and walls (if the policy says so).
pub fn check_endpoints(
    grid: &Grid,
    start: Point,
    goal: Point,
    policy: ValidationPolicy,
) -> Result<(), ValidationError> {
    if !grid.contains(start) || !grid.contains(goal) {
        return Err(ValidationError::OutOfBounds);
    }
    if policy.reject_walls && (grid.is_wall(start) || grid.is_wall(goal)) {
        return Err(ValidationError::OnWall);
    }
    Ok(())
}

/// Parse the synchronous endpoint's body: `{maze|grid, start, goal}`.
///
/// Checks run in a fixed order and the first failure wins. The returned
/// request is validated against `policy`.
pub fn parse_solve_body(body: &[u8], policy: ValidationPolicy) -> Result<SolveRequest, ValidationError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ValidationError::InvalidJson)?;

    let grid = value.get("maze").or_else(|| value.get("grid"));
    let (Some(grid), Some(start), Some(goal)) = (grid, value.get("start"), value.get("goal")) else {
        return Err(ValidationError::MissingFields);
    };
    if [grid, start, goal].into_iter().any(is_blank) {
        return Err(ValidationError::MissingFields);
    }

    let rows: Vec<Vec<bool>> =
        serde_json::from_value(grid.clone()).map_err(|_| ValidationError::InvalidGridFormat)?;
    let grid = Grid::new(rows).map_err(|_| ValidationError::InvalidGridFormat)?;

    let start = parse_point(start)?;
    let goal = parse_point(goal)?;
    check_endpoints(&grid, start, goal, policy)?;

    Ok(SolveRequest {
        grid,
        start,
        goal,
        pace: None,
    })
}

/// `null`, `false`, `0` and `""` count as absent.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn parse_point(value: &Value) -> Result<Point, ValidationError> {
    let wire: WirePoint =
        serde_json::from_value(value.clone()).map_err(|_| ValidationError::InvalidPointFormat)?;
    Ok(wire.into())
}
