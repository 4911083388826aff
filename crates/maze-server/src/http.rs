//! HTTP endpoint for one-shot solves.
//!
//! - `POST /solve` validates the body, runs the search off the async
//!   runtime and returns the whole result at once. Client errors are
//!   400 with `{success: false, error}`.
//! - `GET /solve` describes the endpoint.

use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use maze_protocol::{solve_body, ErrorResponse};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Build the router.
pub fn router() -> Router {
    Router::new().route("/solve", post(solve).get(usage))
}

/// Serve the router on an already-bound listener.
pub async fn serve(listener: TcpListener) -> anyhow::Result<()> {
    axum::serve(listener, router()).await?;
    Ok(())
}

async fn solve(body: Bytes) -> Response {
    let outcome = tokio::task::spawn_blocking(move || solve_body(&body)).await;

    match outcome {
        Ok(Ok(resp)) => {
            info!(
                path_length = resp.path_length,
                visited = resp.visited_count,
                "POST /solve completed"
            );
            (StatusCode::OK, Json(resp)).into_response()
        }
        Ok(Err(err)) => {
            warn!(%err, "POST /solve rejected");
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(err.to_string()))).into_response()
        }
        Err(join_err) => {
            error!(error = %join_err, "POST /solve failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "Internal server error processing pathfinding request",
                )),
            )
                .into_response()
        }
    }
}

async fn usage() -> Json<serde_json::Value> {
    Json(json!({
        "message": "POST /solve endpoint is available. Send a POST request with maze, start, and goal parameters."
    }))
}
