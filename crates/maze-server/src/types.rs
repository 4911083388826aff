//! Shared types for the maze server.
//!
//! This module defines:
//! - `ClientId`: a lightweight handle for connected clients
//! - channel aliases between the reader, the session task and the writer
//! - `SessionInput`: messages flowing from the reader into a session

use std::collections::HashMap;
use std::sync::Arc;

use maze_core::{Command, OutputEvent, TickId};
use tokio::sync::mpsc;
use tokio::sync::RwLock;

/// Identifier for a connected client.
///
/// This is intentionally opaque; we just guarantee uniqueness
/// over the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub u64);

/// Outbound events from a session to its client's writer.
pub type OutboundTx = mpsc::UnboundedSender<OutputEvent>;
pub type OutboundRx = mpsc::UnboundedReceiver<OutputEvent>;

/// Registry of connected clients and their session input channels.
///
/// Sessions are never reached through here by other clients; it
/// exists for connection accounting.
pub type ClientRegistry = Arc<RwLock<HashMap<ClientId, SessionTx>>>;

/// What the reader hands to a session.
#[derive(Debug)]
pub enum SessionInput {
    /// A decoded, validated command.
    Command(Command),

    /// A line that failed to decode or validate, with the reason.
    Rejected(String),
}

/// Channel from a client's reader → its session task.
pub type SessionTx = mpsc::UnboundedSender<SessionInput>;
pub type SessionRx = mpsc::UnboundedReceiver<SessionInput>;

/// Channel from a session's timers → its session task.
pub type TickTx = mpsc::UnboundedSender<TickId>;
pub type TickRx = mpsc::UnboundedReceiver<TickId>;
