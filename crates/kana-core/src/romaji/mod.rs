//! Kana romanization table.
//!
//! Maps each kana grapheme (a single kana or a two-character digraph such as
//! きゃ) to its accepted romaji spellings, and derives the context-dependent
//! spellings of っ and ん from the grapheme that follows them.

mod config;
mod derive;
mod table;

pub use config::{parse_table_toml, TableError};
pub use table::{default_toml, KanaTable};

pub use derive::is_geminate_pair;

pub(crate) use derive::push_unique;
