use std::time::Duration;

use serde::Serialize;

/// Lifecycle of a typing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Running,
    /// Input is frozen and the clock does not count.
    Paused,
    Completed,
    Aborted(AbortReason),
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Aborted(_))
    }
}

/// Why a session ended before completion. Set by mode wrappers or the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbortReason {
    /// Survival mode ran out of lives.
    Death,
    /// Time attack limit reached.
    Timeout,
    Manual,
}

/// Result of a single keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeystrokeOutcome {
    /// Session not running, or a control character.
    Ignored,
    /// Valid continuation of the current token.
    Partial,
    /// Token `index` was completed; the cursor moved to the next token.
    TokenCompleted { index: usize },
    /// The last token was completed.
    Completed,
    /// Wrong key. Still appended to the input; backspace to fix.
    Miss { expected: char, actual: char },
}

/// One wrong keystroke at a position in the typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub position: usize,
    pub expected: char,
    pub actual: char,
}

/// Point-in-time numbers for a UI refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStats {
    pub wpm: f64,
    pub accuracy: f64,
    pub total_typed: usize,
    pub total_errors: usize,
    /// Wrong keystrokes ever made, including ones later backspaced.
    pub total_misses: usize,
    pub progress: f64,
}

/// Final numbers once a session is Completed or Aborted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionResults {
    pub wpm: f64,
    pub accuracy: f64,
    pub total_typed: usize,
    pub total_errors: usize,
    pub total_misses: usize,
    pub duration: Duration,
    pub error_log: Vec<ErrorEntry>,
    pub aborted: Option<AbortReason>,
}

/// `(typed / chars_per_word) / minutes`; zero before any time has passed.
pub(crate) fn words_per_minute(typed: usize, chars_per_word: u32, elapsed: Duration) -> f64 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    if minutes <= 0.0 || chars_per_word == 0 {
        return 0.0;
    }
    (typed as f64 / chars_per_word as f64) / minutes
}

/// Percentage of typed characters that are not errors; 100 with nothing typed.
pub(crate) fn accuracy(typed: usize, errors: usize) -> f64 {
    if typed == 0 {
        return 100.0;
    }
    typed.saturating_sub(errors) as f64 / typed as f64 * 100.0
}
