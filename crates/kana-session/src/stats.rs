use super::types::{accuracy, words_per_minute, SessionResults, SessionState, SessionStats};
use super::TypingSession;

impl TypingSession {
    /// Point-in-time numbers; safe to poll from a UI timer in any state.
    pub fn current_stats(&self) -> SessionStats {
        let m = &self.matcher;
        SessionStats {
            wpm: words_per_minute(m.total_typed, self.chars_per_word, self.elapsed()),
            accuracy: accuracy(m.total_typed, m.total_errors),
            total_typed: m.total_typed,
            total_errors: m.total_errors,
            total_misses: m.total_misses,
            progress: self.progress(),
        }
    }

    /// Fraction of tokens completed, `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let total = self.matcher.tokens.len();
        if total == 0 {
            return if self.state == SessionState::Completed {
                1.0
            } else {
                0.0
            };
        }
        self.matcher.token_index.min(total) as f64 / total as f64
    }

    /// Final numbers. `None` until the session is Completed or Aborted.
    pub fn results(&self) -> Option<SessionResults> {
        let aborted = match self.state {
            SessionState::Completed => None,
            SessionState::Aborted(reason) => Some(reason),
            _ => return None,
        };
        let m = &self.matcher;
        let duration = self.elapsed();
        Some(SessionResults {
            wpm: words_per_minute(m.total_typed, self.chars_per_word, duration),
            accuracy: accuracy(m.total_typed, m.total_errors),
            total_typed: m.total_typed,
            total_errors: m.total_errors,
            total_misses: m.total_misses,
            duration,
            error_log: self.error_log(),
            aborted,
        })
    }
}
