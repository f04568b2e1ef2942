use kana_core::tokenizer::Token;

use super::matcher::accepted;
use super::types::SessionState;
use super::TypingSession;

impl TypingSession {
    /// Token under the cursor, if any remain.
    pub fn current_token(&self) -> Option<&Token> {
        self.matcher.current_token()
    }

    /// Patterns of the current token the buffer is a prefix of, in table
    /// order. Empty unless Running.
    ///
    /// With nothing typed for the current token, a letter that turns the
    /// previous token into a longer spelling is listed too: after "n" for ん
    /// before か, "n" is still accepted as the second half of "nn".
    pub fn valid_continuations(&self) -> Vec<&str> {
        if self.state != SessionState::Running || self.matcher.is_complete() {
            return Vec::new();
        }
        let m = &self.matcher;
        let buffer = m.input_buffer();
        let mut out: Vec<&str> = m
            .current_patterns()
            .into_iter()
            .filter(|p| p.starts_with(buffer.as_str()))
            .collect();

        let Some(previous) = m.token_index.checked_sub(1) else {
            return out;
        };
        if !buffer.is_empty() {
            return out;
        }
        let typed = m.token_input(previous);
        let before = if previous > 0 {
            m.token_input(previous - 1)
        } else {
            String::new()
        };
        for pattern in accepted(&m.tokens, previous, &before) {
            let Some(extra) = pattern.strip_prefix(typed.as_str()) else {
                continue;
            };
            if extra.chars().count() != 1 || out.iter().any(|p| p.starts_with(extra)) {
                continue;
            }
            out.push(extra);
        }
        out
    }

    /// Canonical romaji left to type: the rest of the first continuation of
    /// the current token, then every later token's first pattern. When the
    /// buffer has gone wrong the current token's canonical is shown whole.
    pub fn remaining_romaji(&self) -> String {
        let m = &self.matcher;
        let Some(token) = m.current_token() else {
            return String::new();
        };
        let buffer = m.input_buffer();
        let patterns = m.current_patterns();
        let mut out = match patterns.iter().find(|p| p.starts_with(buffer.as_str())) {
            Some(p) => p[buffer.len()..].to_string(),
            None => token.canonical().to_string(),
        };
        for t in &m.tokens[m.token_index + 1..] {
            out.push_str(t.canonical());
        }
        out
    }
}
