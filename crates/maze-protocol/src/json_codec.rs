//! Newline-delimited JSON codec for the playback stream.
//!
//! Each command or event is one JSON object on one line:
//!
//! ```text
//! → {"type":"solve","grid":[[false,true],[false,false]],"start":{"row":0,"col":0},"goal":{"row":1,"col":1},"paceMs":50}
//! → {"type":"pause"}
//! ← {"type":"visit","node":{"row":0,"col":0}}
//! ← {"type":"done","path":[...],"pathLength":2,"visitedCount":3,"visitedNodes":["0,0","1,0","1,1"]}
//! ```
//!
//! Decoding a command is two steps: [`decode_command`] turns a line into
//! a [`WireCommand`], then [`parse_command_line`] also validates a solve
//! into a `maze_core::Command`.

use maze_core::{Command, OutputEvent};

use crate::validation::{validate_solve, ValidationPolicy};
use crate::wire_types::{WireCommand, WireEvent};
use crate::{ProtocolError, ValidationError};

/// Decode one line into a wire command without validating it.
pub fn decode_command(line: &str) -> Result<WireCommand, ProtocolError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ProtocolError::Empty);
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Decode and validate one line into a core [`Command`].
pub fn parse_command_line(line: &str, policy: ValidationPolicy) -> Result<Command, CommandError> {
    let cmd = match decode_command(line)? {
        WireCommand::Solve(solve) => Command::Solve(validate_solve(solve, policy)?),
        WireCommand::Pause => Command::Pause,
        WireCommand::Resume => Command::Resume,
        WireCommand::Stop => Command::Stop,
    };
    Ok(cmd)
}

/// Encode one command as a line (no trailing newline).
pub fn encode_command(cmd: &WireCommand) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(cmd)?)
}

/// Encode one event as a line (no trailing newline).
pub fn encode_event(event: &OutputEvent) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(&WireEvent::from(event))?)
}

/// Decode one event line. Used by clients.
pub fn decode_event(line: &str) -> Result<OutputEvent, ProtocolError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ProtocolError::Empty);
    }
    let wire: WireEvent = serde_json::from_str(trimmed)?;
    Ok(wire.into())
}

/// Why a command line was rejected.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
