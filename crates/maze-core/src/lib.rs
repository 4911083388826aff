//! maze-core
//!
//! Pure maze logic:
//! - grid and point types
//! - A* search producing a path and a full visit trace
//! - logical command / event messages
//! - per-connection playback state machine

pub mod point;
pub mod grid;
pub mod search;
pub mod messages;
pub mod scheduler;
pub mod playback;
pub mod error;

pub use point::Point;
pub use grid::Grid;

pub use search::{search, search_with_callback, SearchResult};

pub use messages::{
    Command,
    DoneSummary,
    OutputEvent,
    SolveRequest,
};

pub use scheduler::{EventSink, ManualScheduler, TickId, TickScheduler};
pub use playback::{PlaybackController, PlaybackState, DEFAULT_PACE};
pub use error::GridError;
