use std::sync::{Arc, Mutex, MutexGuard};

use kana_core::romaji::KanaTable;
use kana_session::{
    AbortReason, Clock, MonotonicClock, SessionResults, SessionStats, TypingSession,
};

use super::types::{EngineSnapshot, KeyResult, TokenView};

/// Host-facing typing session. Every call takes the lock for its duration
/// and returns owned values.
pub struct TypingEngine {
    session: Mutex<TypingSession>,
}

impl TypingEngine {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(MonotonicClock::new()))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            session: Mutex::new(TypingSession::with_clock(KanaTable::global(), clock)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TypingSession> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn load_session(&self, text: &str) -> Vec<TokenView> {
        self.lock().load(text).iter().map(TokenView::from).collect()
    }

    pub fn start(&self) -> bool {
        self.lock().start()
    }

    pub fn pause(&self) -> bool {
        self.lock().pause()
    }

    pub fn resume(&self) -> bool {
        self.lock().resume()
    }

    pub fn reset(&self) {
        self.lock().reset()
    }

    pub fn abort(&self, reason: AbortReason) -> bool {
        self.lock().abort(reason)
    }

    pub fn on_keystroke(&self, key: char) -> KeyResult {
        self.lock().on_keystroke(key).into()
    }

    pub fn on_backspace(&self, new_len: usize) -> bool {
        self.lock().on_backspace(new_len)
    }

    pub fn current_stats(&self) -> SessionStats {
        self.lock().current_stats()
    }

    pub fn valid_continuations(&self) -> Vec<String> {
        self.lock()
            .valid_continuations()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn results(&self) -> Option<SessionResults> {
        self.lock().results()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let session = self.lock();
        EngineSnapshot {
            state: session.state(),
            token_index: session.token_index(),
            token_count: session.tokens().len(),
            input_buffer: session.input_buffer(),
            typed: session.typed(),
            continuations: session
                .valid_continuations()
                .into_iter()
                .map(str::to_string)
                .collect(),
            remaining: session.remaining_romaji(),
            stats: session.current_stats(),
        }
    }
}

impl Default for TypingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use kana_session::{ManualClock, SessionState};

    use super::*;

    fn engine() -> (TypingEngine, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        (TypingEngine::with_clock(clock.clone()), clock)
    }

    #[test]
    fn full_run() {
        let (engine, clock) = engine();
        let tokens = engine.load_session("こんにちは");
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[1].patterns, vec!["nn", "xn", "n"]);
        assert!(engine.start());
        for c in "konnichiha".chars() {
            clock.advance(Duration::from_millis(100));
            engine.on_keystroke(c);
        }
        let results = engine.results().unwrap();
        assert_eq!(results.total_errors, 0);
        assert_eq!(results.duration, Duration::from_secs(1));
    }

    #[test]
    fn snapshot_tracks_progress() {
        let (engine, _clock) = engine();
        engine.load_session("しゃしん");
        engine.start();
        assert_eq!(engine.on_keystroke('s'), KeyResult::Partial);
        let snap = engine.snapshot();
        assert_eq!(snap.state, SessionState::Running);
        assert_eq!(snap.input_buffer, "s");
        assert_eq!(&snap.continuations[..2], &["sha", "sya"]);
        // split spellings through し also start with "s"
        assert!(snap.continuations.iter().any(|p| p == "shixya"));
        assert!(!snap.continuations.iter().any(|p| p.starts_with('c')));
        assert_eq!(snap.remaining, "hashinn");
        assert_eq!(snap.token_count, 3);
    }

    #[test]
    fn miss_and_correction() {
        let (engine, _clock) = engine();
        engine.load_session("か");
        engine.start();
        assert_eq!(
            engine.on_keystroke('z'),
            KeyResult::Miss {
                expected: 'k',
                actual: 'z'
            }
        );
        assert!(engine.on_backspace(0));
        assert_eq!(engine.current_stats().total_errors, 0);
        assert_eq!(engine.valid_continuations(), vec!["ka", "ca"]);
    }

    #[test]
    fn key_result_json_shape() {
        let json = serde_json::to_string(&KeyResult::TokenCompleted { index: 2 }).unwrap();
        assert_eq!(json, r#"{"kind":"token_completed","index":2}"#);
        let snap = TypingEngine::new().snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains(r#""state":"idle""#));
    }

    #[test]
    fn engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypingEngine>();
    }
}
