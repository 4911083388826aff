//! One-shot solve: validate, search, build the response. No pacing.

use maze_core::{search, SearchResult};

use crate::validation::{parse_solve_body, ValidationError, ValidationPolicy};
use crate::wire_types::{SolveResponse, WirePoint};

/// Handle a synchronous solve body end to end.
///
/// Validation is strict (walls on start/goal are rejected) and happens
/// before the engine is touched.
pub fn solve_body(body: &[u8]) -> Result<SolveResponse, ValidationError> {
    let req = parse_solve_body(body, ValidationPolicy::STRICT)?;
    let result = search(&req.grid, req.start, req.goal);
    Ok(SolveResponse::from_result(&result))
}

impl SolveResponse {
    pub fn from_result(result: &SearchResult) -> Self {
        let message = if result.has_path() {
            format!("Path found with {} steps", result.path_length())
        } else {
            "No path found between start and goal".to_string()
        };

        SolveResponse {
            success: true,
            path: result.path.iter().copied().map(WirePoint::from).collect(),
            path_length: result.path_length(),
            visited_count: result.visited_count(),
            visited_nodes: result.visited_nodes(),
            has_path: result.has_path(),
            message,
        }
    }
}
