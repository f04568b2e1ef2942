use std::time::Duration;

use tracing::{debug, debug_span};

use super::types::{AbortReason, SessionState};
use super::TypingSession;

impl TypingSession {
    /// Idle -> Running. Clears all match state and starts the clock. A session
    /// with nothing to type completes on the spot.
    pub fn start(&mut self) -> bool {
        let _span = debug_span!("start").entered();
        if self.state != SessionState::Idle {
            return false;
        }
        self.matcher.clear();
        self.stopwatch.start(self.clock.now());
        self.state = SessionState::Running;
        debug!(tokens = self.matcher.tokens.len(), "running");
        if self.matcher.is_complete() {
            self.finish();
        }
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Running {
            return false;
        }
        self.stopwatch.pause(self.clock.now());
        self.state = SessionState::Paused;
        debug!("paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != SessionState::Paused {
            return false;
        }
        self.stopwatch.resume(self.clock.now());
        self.state = SessionState::Running;
        debug!("resumed");
        true
    }

    /// Back to Idle from any state, keeping the loaded text.
    pub fn reset(&mut self) {
        self.matcher.clear();
        self.stopwatch = Default::default();
        self.state = SessionState::Idle;
        debug!("reset");
    }

    /// End a Running or Paused session early.
    pub fn abort(&mut self, reason: AbortReason) -> bool {
        let _span = debug_span!("abort", ?reason).entered();
        if !matches!(self.state, SessionState::Running | SessionState::Paused) {
            return false;
        }
        self.stopwatch.stop(self.clock.now());
        self.state = SessionState::Aborted(reason);
        debug!(
            token_index = self.matcher.token_index,
            typed = self.matcher.total_typed,
            "aborted"
        );
        true
    }

    /// Active time since `start()`, paused intervals excluded.
    pub fn elapsed(&self) -> Duration {
        self.stopwatch.elapsed(self.clock.now())
    }

    pub(crate) fn finish(&mut self) {
        self.stopwatch.stop(self.clock.now());
        self.state = SessionState::Completed;
        debug!(elapsed_ms = self.elapsed().as_millis() as u64, "completed");
    }
}
