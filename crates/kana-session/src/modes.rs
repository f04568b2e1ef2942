//! Game-mode policies layered over a [`TypingSession`].
//!
//! Each wrapper only observes outcomes and elapsed time through the public
//! session API and ends the run with [`TypingSession::abort`]; the matcher
//! knows nothing about lives or deadlines.

use std::time::Duration;

use kana_core::settings::settings;
use tracing::debug;

use crate::{AbortReason, KeystrokeOutcome, SessionState, TypingSession};

/// Every miss costs a life; the run ends with `Death` at zero.
pub struct SurvivalMode {
    session: TypingSession,
    lives: u32,
    max_lives: u32,
}

impl SurvivalMode {
    /// Lives from `[survival] lives` in the settings.
    pub fn new(session: TypingSession) -> Self {
        Self::with_lives(session, settings().survival.lives)
    }

    pub fn with_lives(session: TypingSession, lives: u32) -> Self {
        Self {
            session,
            lives,
            max_lives: lives,
        }
    }

    pub fn on_keystroke(&mut self, key: char) -> KeystrokeOutcome {
        let outcome = self.session.on_keystroke(key);
        if let KeystrokeOutcome::Miss { .. } = outcome {
            self.lives = self.lives.saturating_sub(1);
            debug!(lives = self.lives, "life lost");
            if self.lives == 0 {
                self.session.abort(AbortReason::Death);
            }
        }
        outcome
    }

    /// Restart the run with full lives.
    pub fn reset(&mut self) {
        self.session.reset();
        self.lives = self.max_lives;
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    pub fn session(&self) -> &TypingSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut TypingSession {
        &mut self.session
    }

    pub fn into_inner(self) -> TypingSession {
        self.session
    }
}

/// The run ends with `Timeout` once active time reaches the limit.
pub struct TimeAttackMode {
    session: TypingSession,
    limit: Duration,
}

impl TimeAttackMode {
    /// Limit from `[time_attack] limit_secs` in the settings.
    pub fn new(session: TypingSession) -> Self {
        Self::with_limit(
            session,
            Duration::from_secs_f64(settings().time_attack.limit_secs),
        )
    }

    pub fn with_limit(session: TypingSession, limit: Duration) -> Self {
        Self { session, limit }
    }

    /// Check the deadline. Call from the host's timer; returns true when this
    /// call ended the run.
    pub fn tick(&mut self) -> bool {
        let live = matches!(
            self.session.state(),
            SessionState::Running | SessionState::Paused
        );
        if live && self.session.elapsed() >= self.limit {
            debug!(limit_ms = self.limit.as_millis() as u64, "time up");
            return self.session.abort(AbortReason::Timeout);
        }
        false
    }

    /// Keystrokes arriving after the deadline are dropped.
    pub fn on_keystroke(&mut self, key: char) -> KeystrokeOutcome {
        self.tick();
        self.session.on_keystroke(key)
    }

    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.session.elapsed())
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    pub fn session(&self) -> &TypingSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut TypingSession {
        &mut self.session
    }

    pub fn into_inner(self) -> TypingSession {
        self.session
    }
}
