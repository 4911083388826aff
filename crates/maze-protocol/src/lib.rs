//! maze-protocol
//!
//! Wire-level encoding/decoding for the maze server.
//!
//! This crate is responsible for turning logical messages
//! (`maze_core::Command` / `OutputEvent`) into JSON lines and back,
//! and for rejecting bad client input before it reaches the engine.
//!
//! - [`json_codec`] : newline-delimited JSON for the playback stream
//! - [`validation`] : shape / bounds / wall checks
//! - [`sync_solve`] : one-shot solve used by the HTTP endpoint
//! - [`text_grid`]  : ASCII grids for tools and fixtures

pub mod wire_types;
pub mod error;
pub mod json_codec;
pub mod validation;
pub mod sync_solve;
pub mod text_grid;

pub use error::ProtocolError;
pub use validation::{ValidationError, ValidationPolicy};

pub use json_codec::{
    CommandError,
    decode_command,
    decode_event,
    encode_command,
    encode_event,
    parse_command_line,
};

pub use sync_solve::solve_body;
pub use wire_types::{ErrorResponse, SolveResponse, WireCommand, WireEvent, WirePoint, WireSolve};
