mod backspace;
mod coverage;

use std::sync::Arc;
use std::time::Duration;

use kana_core::romaji::KanaTable;

use super::{KeystrokeOutcome, ManualClock, TypingSession};

/// Session over `text` on a manual clock, not yet started.
pub(super) fn make_session(text: &str) -> (TypingSession, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let mut session = TypingSession::with_clock(KanaTable::global(), clock.clone());
    session.load(text);
    (session, clock)
}

/// Session over `text`, already Running.
pub(super) fn running(text: &str) -> TypingSession {
    let (mut session, _clock) = make_session(text);
    assert!(session.start());
    session
}

// Helper: simulate typing a string one character at a time
pub(super) fn type_str(session: &mut TypingSession, s: &str) -> Vec<KeystrokeOutcome> {
    s.chars().map(|c| session.on_keystroke(c)).collect()
}

pub(super) fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
