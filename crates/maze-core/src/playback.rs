//! Playback controller: replays a search's visit trace as paced events.
//!
//! One controller per connection. It owns the session record
//! (state, pending queue, result, pace) and at most one outstanding
//! tick. All calls must be serialized by the owner; nothing here is
//! shared.
//!
//! Transition table:
//!
//! | From            | Input          | To      | Effect                                   |
//! |-----------------|----------------|---------|------------------------------------------|
//! | any             | `Solve`        | Solving | cancel tick, search, queue trace, tick now |
//! | Solving         | tick, queue>0  | Solving | emit `Visit`, tick after pace            |
//! | Solving         | tick, queue=0  | Idle    | emit `Done`                              |
//! | Solving         | `Pause`        | Paused  | cancel tick, keep queue                  |
//! | Paused          | `Resume`       | Solving | tick after pace                          |
//! | Solving/Paused  | `Stop`         | Idle    | cancel tick, discard queue and result    |
//!
//! Every other `(state, input)` pair is a no-op.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::debug;

use crate::messages::{Command, DoneSummary, OutputEvent, SolveRequest};
use crate::point::Point;
use crate::scheduler::{EventSink, TickId, TickScheduler};
use crate::search::{search_with_callback, SearchResult};

/// Pace used when a solve does not specify one.
pub const DEFAULT_PACE: Duration = Duration::from_millis(100);

/// Session state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Solving,
    Paused,
    /// Transient: entered by `Stop` and folded into `Idle` before the
    /// command returns.
    Stopped,
}

/// Per-connection playback state machine.
#[derive(Debug)]
pub struct PlaybackController<S: TickScheduler> {
    scheduler: S,
    default_pace: Duration,

    state: PlaybackState,
    pending: VecDeque<Point>,
    result: Option<SearchResult>,
    pace: Duration,

    /// The only tick this controller will act on.
    scheduled: Option<TickId>,
}

impl<S: TickScheduler> PlaybackController<S> {
    /// Create an idle controller using [`DEFAULT_PACE`].
    pub fn new(scheduler: S) -> Self {
        Self::with_default_pace(scheduler, DEFAULT_PACE)
    }

    /// Create an idle controller with a custom default pace.
    pub fn with_default_pace(scheduler: S, default_pace: Duration) -> Self {
        PlaybackController {
            scheduler,
            default_pace,
            state: PlaybackState::Idle,
            pending: VecDeque::new(),
            result: None,
            pace: default_pace,
            scheduled: None,
        }
    }

    /// Apply a control command.
    ///
    /// Commands never emit directly; a solve's first visit arrives via
    /// a zero-delay tick.
    pub fn handle_command(&mut self, cmd: Command) {
        match (self.state, cmd) {
            (_, Command::Solve(req)) => self.start_solve(req),
            (PlaybackState::Solving, Command::Pause) => self.pause(),
            (PlaybackState::Paused, Command::Resume) => self.resume(),
            (PlaybackState::Solving | PlaybackState::Paused, Command::Stop) => self.stop(),
            (state, cmd) => {
                debug!(?state, ?cmd, "command has no effect in this state");
            }
        }
    }

    /// Report a command that could not be decoded or validated.
    ///
    /// Emits an error summary; the current session is left untouched.
    pub fn reject(&mut self, error: impl Into<String>, sink: &mut impl EventSink) {
        let error = error.into();
        debug!(%error, state = ?self.state, "rejecting command");
        sink.emit(OutputEvent::error(error));
    }

    /// A scheduled tick is due.
    ///
    /// Returns `false` (and does nothing) if `id` is not the tick this
    /// controller is waiting for, e.g. one that was cancelled while
    /// already in flight.
    pub fn on_tick(&mut self, id: TickId, sink: &mut impl EventSink) -> bool {
        if self.scheduled != Some(id) || self.state != PlaybackState::Solving {
            debug!(?id, expected = ?self.scheduled, "ignoring stale tick");
            return false;
        }
        self.scheduled = None;

        match self.pending.pop_front() {
            Some(node) => {
                sink.emit(OutputEvent::visit(node));
                self.schedule_tick(self.pace);
            }
            None => {
                let summary = self
                    .result
                    .take()
                    .map(|r| DoneSummary::from_result(&r))
                    .unwrap_or_default();
                debug!(
                    path_length = summary.path_length,
                    visited = summary.visited_count,
                    "playback complete"
                );
                sink.emit(OutputEvent::Done(summary));
                self.clear();
            }
        }
        true
    }

    /// Connection went away: same cleanup as `Stop`, from any state.
    pub fn shutdown(&mut self) {
        if self.state != PlaybackState::Idle || self.scheduled.is_some() {
            self.stop();
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Visit events still to be emitted.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Result of the session in progress, if any.
    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    /// Pace of the current session.
    pub fn pace(&self) -> Duration {
        self.pace
    }

    /// The tick the controller is waiting for, if any.
    pub fn scheduled_tick(&self) -> Option<TickId> {
        self.scheduled
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    fn start_solve(&mut self, req: SolveRequest) {
        self.cancel_tick();
        self.pending.clear();
        self.result = None;

        self.pace = match req.pace {
            Some(pace) if !pace.is_zero() => pace,
            _ => self.default_pace,
        };
        self.state = PlaybackState::Solving;

        let mut queue = VecDeque::new();
        let result = search_with_callback(&req.grid, req.start, req.goal, |p| queue.push_back(p));
        debug!(
            start = %req.start,
            goal = %req.goal,
            visited = result.visited_count(),
            path_length = result.path_length(),
            pace_ms = self.pace.as_millis() as u64,
            "solve started"
        );

        self.pending = queue;
        self.result = Some(result);
        self.schedule_tick(Duration::ZERO);
    }

    fn pause(&mut self) {
        self.cancel_tick();
        self.state = PlaybackState::Paused;
        debug!(remaining = self.pending.len(), "paused");
    }

    fn resume(&mut self) {
        self.state = PlaybackState::Solving;
        self.schedule_tick(self.pace);
        debug!(remaining = self.pending.len(), "resumed");
    }

    fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.clear();
        debug!("stopped");
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// Reset to `Idle` with no queue, result or tick.
    fn clear(&mut self) {
        self.cancel_tick();
        self.pending.clear();
        self.result = None;
        self.state = PlaybackState::Idle;
    }

    fn schedule_tick(&mut self, delay: Duration) {
        self.cancel_tick();
        self.scheduled = Some(self.scheduler.schedule(delay));
    }

    fn cancel_tick(&mut self) {
        if let Some(id) = self.scheduled.take() {
            self.scheduler.cancel(id);
        }
    }
}
