//! Tokio-backed [`TickScheduler`].
//!
//! Each scheduled tick is a spawned task that sleeps and then sends its
//! id into the session's tick channel. Only one tick is ever pending;
//! scheduling a new one or cancelling aborts the old task. A tick that
//! was already sent before the abort is filtered out by the controller.

use std::time::Duration;

use maze_core::{TickId, TickScheduler};
use tokio::task::JoinHandle;
use tracing::trace;

use crate::types::TickTx;

#[derive(Debug)]
pub struct TokioScheduler {
    tick_tx: TickTx,
    next_id: u64,
    pending: Option<(TickId, JoinHandle<()>)>,
}

impl TokioScheduler {
    pub fn new(tick_tx: TickTx) -> Self {
        TokioScheduler {
            tick_tx,
            next_id: 0,
            pending: None,
        }
    }

    fn abort_pending(&mut self) {
        if let Some((id, handle)) = self.pending.take() {
            trace!(?id, "aborting tick task");
            handle.abort();
        }
    }
}

impl TickScheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TickId {
        self.abort_pending();

        let id = TickId(self.next_id);
        self.next_id += 1;

        let tx = self.tick_tx.clone();
        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let _ = tx.send(id);
        });
        self.pending = Some((id, handle));
        id
    }

    fn cancel(&mut self, id: TickId) {
        if self.pending.as_ref().map(|(pending, _)| *pending) == Some(id) {
            self.abort_pending();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        self.abort_pending();
    }
}
