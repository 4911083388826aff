//! Seams between the playback state machine and its runtime.
//!
//! The controller never sleeps and never does I/O. It asks a
//! [`TickScheduler`] to deliver a tick later and hands events to an
//! [`EventSink`]. The server backs these with tokio timers and
//! channels; tests use [`ManualScheduler`] and a `Vec`.

use std::time::Duration;

use crate::messages::OutputEvent;

/// Handle for one scheduled tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

/// Schedule-with-handle, cancel-by-handle.
///
/// When a tick is due, the runtime calls
/// [`crate::PlaybackController::on_tick`] with its id. Cancelling is
/// best effort on the runtime side; the controller ignores any tick
/// whose id it is no longer waiting for.
pub trait TickScheduler {
    fn schedule(&mut self, delay: Duration) -> TickId;
    fn cancel(&mut self, id: TickId);
}

/// Receiver of emitted events.
pub trait EventSink {
    fn emit(&mut self, event: OutputEvent);
}

impl EventSink for Vec<OutputEvent> {
    fn emit(&mut self, event: OutputEvent) {
        self.push(event);
    }
}

/// Deterministic scheduler: records pending ticks and lets the caller
/// decide when they fire.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<(TickId, Duration)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        ManualScheduler::default()
    }

    /// Ticks scheduled and not yet fired or cancelled.
    pub fn pending(&self) -> &[(TickId, Duration)] {
        &self.pending
    }

    /// Remove and return the oldest pending tick.
    pub fn fire_next(&mut self) -> Option<(TickId, Duration)> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TickId {
        let id = TickId(self.next_id);
        self.next_id += 1;
        self.pending.push((id, delay));
        id
    }

    fn cancel(&mut self, id: TickId) {
        self.pending.retain(|(pending, _)| *pending != id);
    }
}
