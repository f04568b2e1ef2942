use serde::Serialize;

use kana_core::tokenizer::Token;
use kana_session::{KeystrokeOutcome, SessionState, SessionStats};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("IO error: {msg}")]
    Io { msg: String },
    #[error("invalid data: {msg}")]
    InvalidData { msg: String },
}

// ---------------------------------------------------------------------------
// Records (owned values handed to the host)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenView {
    pub kana: String,
    pub patterns: Vec<String>,
    pub start: usize,
    pub end: usize,
    pub literal: bool,
}

impl From<&Token> for TokenView {
    fn from(t: &Token) -> Self {
        Self {
            kana: t.kana.clone(),
            patterns: t.patterns.clone(),
            start: t.start,
            end: t.end,
            literal: t.literal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeyResult {
    Ignored,
    Partial,
    TokenCompleted { index: usize },
    Completed,
    Miss { expected: char, actual: char },
}

impl From<KeystrokeOutcome> for KeyResult {
    fn from(outcome: KeystrokeOutcome) -> Self {
        match outcome {
            KeystrokeOutcome::Ignored => Self::Ignored,
            KeystrokeOutcome::Partial => Self::Partial,
            KeystrokeOutcome::TokenCompleted { index } => Self::TokenCompleted { index },
            KeystrokeOutcome::Completed => Self::Completed,
            KeystrokeOutcome::Miss { expected, actual } => Self::Miss { expected, actual },
        }
    }
}

/// Everything a UI needs to redraw after an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSnapshot {
    pub state: SessionState,
    pub token_index: usize,
    pub token_count: usize,
    pub input_buffer: String,
    pub typed: String,
    pub continuations: Vec<String>,
    pub remaining: String,
    pub stats: SessionStats,
}
