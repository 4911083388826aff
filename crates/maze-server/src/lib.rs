//! maze-server
//!
//! Multi-client async server for the maze pathfinder: a paced
//! playback stream over TCP plus a one-shot HTTP solve endpoint.

pub mod config;
pub mod types;
pub mod server;
pub mod session;
pub mod scheduler;
pub mod http;

// internal module, not re-exported
mod client;
