//! Host-facing layer: owned, serializable values over the typing engine.

mod engine;
mod types;

pub use engine::TypingEngine;
pub use types::{EngineError, EngineSnapshot, KeyResult, TokenView};

use std::path::Path;

use kana_core::romaji::KanaTable;
use tracing::info;

// ---------------------------------------------------------------------------
// Top-level functions
// ---------------------------------------------------------------------------

pub fn engine_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Tokens for `text` without starting a session.
pub fn tokenize(text: &str) -> Vec<TokenView> {
    kana_core::tokenizer::tokenize(KanaTable::global(), text)
        .iter()
        .map(TokenView::from)
        .collect()
}

/// Install a custom kana table. Must run before the first session is built.
pub fn table_load_config(path: &str) -> Result<(), EngineError> {
    let content = std::fs::read_to_string(path).map_err(|e| EngineError::Io {
        msg: format!("{path}: {e}"),
    })?;
    KanaTable::init_custom(content).map_err(|e| EngineError::InvalidData { msg: e.to_string() })?;
    info!(path, "custom kana table installed");
    Ok(())
}

pub fn settings_load_config(path: &str) -> Result<(), EngineError> {
    let content = std::fs::read_to_string(path).map_err(|e| EngineError::Io {
        msg: format!("{path}: {e}"),
    })?;
    kana_core::settings::init_custom(content)
        .map_err(|e| EngineError::InvalidData { msg: e.to_string() })?;
    info!(path, "custom settings installed");
    Ok(())
}

pub fn table_default_config() -> String {
    kana_core::romaji::default_toml().to_string()
}

pub fn settings_default_config() -> String {
    kana_core::settings::default_toml().to_string()
}

/// Start the JSON trace log (feature `trace`). False when tracing is
/// compiled out or the host already installed a subscriber.
pub fn trace_init(log_dir: &str) -> bool {
    crate::trace_init::init_tracing(Path::new(log_dir))
}
