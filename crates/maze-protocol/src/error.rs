//! Codec errors.

use thiserror::Error;

/// A line or body could not be decoded / encoded.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Blank input where a message was expected.
    #[error("empty message")]
    Empty,

    /// Not JSON, unknown `type`, missing field or wrong field type.
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
}
