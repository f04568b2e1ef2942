//! Romaji typing engine for kana practice texts.
//!
//! Re-exports the table, tokenizer and session crates, and adds the
//! host-facing [`api`] layer plus optional browser bindings.

pub mod api;
mod trace_init;
#[cfg(feature = "wasm")]
mod wasm;

pub use kana_core::romaji::{KanaTable, TableError};
pub use kana_core::settings::{settings, Settings, SettingsError};
pub use kana_core::tokenizer::{tokenize, Token};
pub use kana_session::modes::{SurvivalMode, TimeAttackMode};
pub use kana_session::{
    AbortReason, Clock, ErrorEntry, KeystrokeOutcome, ManualClock, MonotonicClock,
    SessionResults, SessionState, SessionStats, TypingSession,
};

pub use trace_init::init_tracing;
