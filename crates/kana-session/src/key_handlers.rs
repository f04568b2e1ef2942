use tracing::{debug, debug_span};

use super::matcher::Step;
use super::types::{KeystrokeOutcome, SessionState};
use super::TypingSession;

impl TypingSession {
    /// Feed one keystroke. Ignored unless Running; control characters are
    /// always ignored.
    pub fn on_keystroke(&mut self, key: char) -> KeystrokeOutcome {
        let _span = debug_span!("on_keystroke", ?key).entered();

        if self.state != SessionState::Running || key.is_control() {
            return KeystrokeOutcome::Ignored;
        }
        let key = if self.fold_uppercase {
            key.to_ascii_lowercase()
        } else {
            key
        };

        match self.matcher.advance(key) {
            Step::Partial => KeystrokeOutcome::Partial,
            Step::Miss { expected, actual } => {
                debug!(%expected, %actual, position = self.matcher.typed.len() - 1, "miss");
                KeystrokeOutcome::Miss { expected, actual }
            }
            Step::Completed { index } if self.matcher.is_complete() => {
                debug!(index, "last token completed");
                self.finish();
                KeystrokeOutcome::Completed
            }
            Step::Completed { index } => KeystrokeOutcome::TokenCompleted { index },
        }
    }

    /// Convenience for hosts that deliver text chunks (paste, IME commit).
    pub fn on_text(&mut self, text: &str) -> Vec<KeystrokeOutcome> {
        text.chars().map(|c| self.on_keystroke(c)).collect()
    }

    /// The host's input field now holds `new_len` characters. Re-derives the
    /// whole match state from that prefix. Returns false (no-op) unless
    /// Running and `new_len` is shorter than what was typed.
    pub fn on_backspace(&mut self, new_len: usize) -> bool {
        let _span = debug_span!("on_backspace", new_len).entered();

        let typed = self.matcher.typed.len();
        if self.state != SessionState::Running || new_len >= typed {
            return false;
        }
        self.matcher.rederive(new_len);
        debug!(
            removed = typed - new_len,
            token_index = self.matcher.token_index,
            errors = self.matcher.total_errors,
            "rederived"
        );
        true
    }

    /// Remove the last typed character.
    pub fn backspace(&mut self) -> bool {
        match self.matcher.typed.len().checked_sub(1) {
            Some(len) => self.on_backspace(len),
            None => false,
        }
    }
}
