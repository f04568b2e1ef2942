//! Typing-session state machine for romaji input against kana practice text.
//!
//! `TypingSession` owns the loaded token sequence and the match state, and
//! processes each keystroke or correction the host UI reports. Mode policies
//! (lives, countdown) live in [`modes`] and only talk to the public API.

pub mod clock;
pub mod modes;

mod hints;
mod key_handlers;
mod lifecycle;
mod matcher;
mod stats;
mod types;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use kana_core::romaji::KanaTable;
use kana_core::settings::Settings;
use kana_core::tokenizer::{tokenize, Token};

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use types::{
    AbortReason, ErrorEntry, KeystrokeOutcome, SessionResults, SessionState, SessionStats,
};

use clock::Stopwatch;
use matcher::MatchState;

/// One practice run over a kana text.
pub struct TypingSession {
    table: &'static KanaTable,
    clock: Arc<dyn Clock>,

    text: String,
    state: SessionState,
    matcher: MatchState,
    stopwatch: Stopwatch,

    // Settings
    chars_per_word: u32,
    /// Lowercase ASCII capitals before matching (caps lock, shifted keys).
    fold_uppercase: bool,
}

impl TypingSession {
    /// Session over the global table, timed by the wall clock.
    pub fn new() -> Self {
        Self::with_clock(KanaTable::global(), Arc::new(MonotonicClock::new()))
    }

    pub fn with_clock(table: &'static KanaTable, clock: Arc<dyn Clock>) -> Self {
        let mut session = Self {
            table,
            clock,
            text: String::new(),
            state: SessionState::Idle,
            matcher: MatchState::new(Vec::<Token>::new().into()),
            stopwatch: Stopwatch::default(),
            chars_per_word: 5,
            fold_uppercase: true,
        };
        session.apply_settings(kana_core::settings::settings());
        session
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.chars_per_word = settings.scoring.chars_per_word;
        self.fold_uppercase = settings.input.fold_uppercase;
    }

    pub fn set_fold_uppercase(&mut self, enabled: bool) {
        self.fold_uppercase = enabled;
    }

    /// Tokenize `text` and prepare a new run. Does not start the clock.
    pub fn load(&mut self, text: &str) -> &[Token] {
        let tokens: Arc<[Token]> = tokenize(self.table, text).into();
        tracing::debug!(tokens = tokens.len(), "session loaded");
        self.text = text.to_string();
        self.matcher = MatchState::new(tokens);
        self.stopwatch = Stopwatch::default();
        self.state = SessionState::Idle;
        &self.matcher.tokens
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.matcher.tokens
    }

    /// Index of the token being typed; equals the token count once done.
    pub fn token_index(&self) -> usize {
        self.matcher.token_index
    }

    /// Keystrokes attributed to the current token.
    pub fn input_buffer(&self) -> String {
        self.matcher.input_buffer()
    }

    /// Everything still in the host's input field.
    pub fn typed(&self) -> String {
        self.matcher.typed.iter().collect()
    }

    /// Error entries ordered by position.
    pub fn error_log(&self) -> Vec<ErrorEntry> {
        self.matcher.error_log.values().copied().collect()
    }
}

impl Default for TypingSession {
    fn default() -> Self {
        Self::new()
    }
}
