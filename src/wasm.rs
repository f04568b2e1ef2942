//! Browser bindings. Structured values cross the boundary as JSON strings.

use std::sync::Arc;
use std::time::Duration;

use wasm_bindgen::prelude::*;

use kana_session::{AbortReason, Clock};

use crate::api::{self, TypingEngine};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// `performance.now()` in milliseconds, measured from construction.
struct PerformanceClock {
    origin_ms: f64,
}

impl Clock for PerformanceClock {
    fn now(&self) -> Duration {
        Duration::from_secs_f64((performance_now() - self.origin_ms).max(0.0) / 1000.0)
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!(r#"{{"error":"{e}"}}"#))
}

#[wasm_bindgen]
pub struct KanaTypingEngine {
    inner: TypingEngine,
}

#[wasm_bindgen]
impl KanaTypingEngine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let clock = PerformanceClock {
            origin_ms: performance_now(),
        };
        Self {
            inner: TypingEngine::with_clock(Arc::new(clock)),
        }
    }

    /// Token list as JSON.
    #[wasm_bindgen(js_name = loadSession)]
    pub fn load_session(&self, text: &str) -> String {
        to_json(&self.inner.load_session(text))
    }

    pub fn start(&self) -> bool {
        self.inner.start()
    }

    pub fn pause(&self) -> bool {
        self.inner.pause()
    }

    pub fn resume(&self) -> bool {
        self.inner.resume()
    }

    pub fn reset(&self) {
        self.inner.reset()
    }

    /// `reason` is "death", "timeout" or anything else for manual.
    pub fn abort(&self, reason: &str) -> bool {
        let reason = match reason {
            "death" => AbortReason::Death,
            "timeout" => AbortReason::Timeout,
            _ => AbortReason::Manual,
        };
        self.inner.abort(reason)
    }

    /// Feeds every character of `key` (an `input` event's data) and returns
    /// the last outcome as JSON.
    #[wasm_bindgen(js_name = onKeystroke)]
    pub fn on_keystroke(&self, key: &str) -> String {
        let mut last = api::KeyResult::Ignored;
        for c in key.chars() {
            last = self.inner.on_keystroke(c);
        }
        to_json(&last)
    }

    #[wasm_bindgen(js_name = onBackspace)]
    pub fn on_backspace(&self, new_len: usize) -> bool {
        self.inner.on_backspace(new_len)
    }

    #[wasm_bindgen(js_name = currentStats)]
    pub fn current_stats(&self) -> String {
        to_json(&self.inner.current_stats())
    }

    #[wasm_bindgen(js_name = validContinuations)]
    pub fn valid_continuations(&self) -> Vec<String> {
        self.inner.valid_continuations()
    }

    /// Results as JSON, or `null` while the run is live.
    pub fn results(&self) -> String {
        to_json(&self.inner.results())
    }

    pub fn snapshot(&self) -> String {
        to_json(&self.inner.snapshot())
    }
}

impl Default for KanaTypingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
pub fn tokenize(text: &str) -> String {
    to_json(&api::tokenize(text))
}

#[wasm_bindgen(js_name = engineVersion)]
pub fn engine_version() -> String {
    api::engine_version()
}
