//! Per-connection playback session.
//!
//! This task owns one `PlaybackController` and is the only thing that
//! touches it. Commands (from the client's reader) and ticks (from the
//! controller's own timers) are serialized through one `select!` loop,
//! commands first, so a pause or stop is always applied before a tick
//! that raced it.
//!
//! The session ends when the reader side drops its sender; that runs the
//! same cleanup as an explicit `stop`.

use std::time::Duration;

use maze_core::{EventSink, OutputEvent, PlaybackController};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::scheduler::TokioScheduler;
use crate::types::{ClientId, OutboundTx, SessionInput, SessionRx, TickRx, TickTx};

/// Run the playback session for one client until its input closes.
pub async fn run_session(
    client_id: ClientId,
    mut session_rx: SessionRx,
    out_tx: OutboundTx,
    default_pace: Duration,
) {
    let (tick_tx, mut tick_rx): (TickTx, TickRx) = mpsc::unbounded_channel();
    let mut controller =
        PlaybackController::with_default_pace(TokioScheduler::new(tick_tx), default_pace);
    let mut sink = ChannelSink {
        client_id,
        tx: out_tx,
    };

    loop {
        tokio::select! {
            biased;

            input = session_rx.recv() => match input {
                Some(SessionInput::Command(cmd)) => {
                    debug!(client = client_id.0, ?cmd, "command");
                    controller.handle_command(cmd);
                    debug!(client = client_id.0, state = ?controller.state(), "state");
                }
                Some(SessionInput::Rejected(reason)) => {
                    controller.reject(reason, &mut sink);
                }
                None => break,
            },

            Some(id) = tick_rx.recv() => {
                controller.on_tick(id, &mut sink);
            }
        }
    }

    controller.shutdown();
    debug!(client = client_id.0, "session closed");
}

/// Forwards events to the client's writer task.
struct ChannelSink {
    client_id: ClientId,
    tx: OutboundTx,
}

impl EventSink for ChannelSink {
    fn emit(&mut self, event: OutputEvent) {
        if let OutputEvent::Done(summary) = &event {
            match &summary.error {
                Some(error) => info!(client = self.client_id.0, %error, "sending error summary"),
                None => info!(
                    client = self.client_id.0,
                    path_length = summary.path_length,
                    visited = summary.visited_count,
                    "playback done"
                ),
            }
        }
        if self.tx.send(event).is_err() {
            debug!(client = self.client_id.0, "writer gone, dropping event");
        }
    }
}
