use std::collections::BTreeMap;

use serde::Deserialize;

use crate::unicode::{hiragana_to_katakana, is_hiragana};

#[derive(Deserialize)]
struct TableConfig {
    #[serde(default)]
    options: TableOptions,
    kana: BTreeMap<String, Vec<String>>,
}

#[derive(Deserialize)]
#[serde(default)]
struct TableOptions {
    /// Mirror every hiragana entry into katakana.
    katakana: bool,
    /// Also accept a two-character grapheme typed as its two parts ("kixya").
    split_digraphs: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            katakana: true,
            split_digraphs: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[kana] table is empty")]
    Empty,
    #[error("grapheme must be 1 or 2 characters: {0:?}")]
    BadGrapheme(String),
    #[error("no spellings for grapheme: {0}")]
    NoSpellings(String),
    #[error("invalid spelling {spelling:?} for grapheme {grapheme}")]
    InvalidSpelling { grapheme: String, spelling: String },
    #[error("kana table already initialized")]
    AlreadyInitialized,
}

/// Parse table TOML into a sorted `BTreeMap<grapheme, spellings>`, with
/// katakana mirrors and split digraph spellings already expanded.
pub fn parse_table_toml(toml_str: &str) -> Result<BTreeMap<String, Vec<String>>, TableError> {
    let config: TableConfig =
        toml::from_str(toml_str).map_err(|e| TableError::Parse(e.to_string()))?;

    if config.kana.is_empty() {
        return Err(TableError::Empty);
    }

    for (grapheme, spellings) in &config.kana {
        validate_entry(grapheme, spellings)?;
    }

    let mut map = config.kana;
    if config.options.katakana {
        mirror_katakana(&mut map);
    }
    if config.options.split_digraphs {
        add_split_spellings(&mut map);
    }
    Ok(map)
}

fn validate_entry(grapheme: &str, spellings: &[String]) -> Result<(), TableError> {
    let len = grapheme.chars().count();
    if len == 0 || len > 2 {
        return Err(TableError::BadGrapheme(grapheme.to_string()));
    }
    if spellings.is_empty() {
        return Err(TableError::NoSpellings(grapheme.to_string()));
    }
    for spelling in spellings {
        if !is_valid_spelling(spelling) {
            return Err(TableError::InvalidSpelling {
                grapheme: grapheme.to_string(),
                spelling: spelling.clone(),
            });
        }
    }
    Ok(())
}

/// Non-empty printable ASCII, no uppercase.
fn is_valid_spelling(spelling: &str) -> bool {
    !spelling.is_empty()
        && spelling
            .chars()
            .all(|c| (c.is_ascii_graphic() || c == ' ') && !c.is_ascii_uppercase())
}

fn mirror_katakana(map: &mut BTreeMap<String, Vec<String>>) {
    let mirrored: Vec<(String, Vec<String>)> = map
        .iter()
        .filter(|(grapheme, _)| grapheme.chars().any(is_hiragana))
        .map(|(grapheme, spellings)| (hiragana_to_katakana(grapheme), spellings.clone()))
        .collect();
    for (grapheme, spellings) in mirrored {
        // An explicit katakana entry wins over the mirror.
        map.entry(grapheme).or_insert(spellings);
    }
}

fn add_split_spellings(map: &mut BTreeMap<String, Vec<String>>) {
    let mut additions = Vec::new();
    for (grapheme, spellings) in map.iter() {
        let mut chars = grapheme.chars();
        let (Some(first), Some(second), None) = (chars.next(), chars.next(), chars.next()) else {
            continue;
        };
        let heads = map.get(first.to_string().as_str());
        let tails = map.get(second.to_string().as_str());
        let (Some(heads), Some(tails)) = (heads, tails) else {
            continue;
        };

        let mut extra: Vec<String> = Vec::new();
        for head in heads {
            for tail in tails {
                let joined = format!("{head}{tail}");
                if !spellings.contains(&joined) && !extra.contains(&joined) {
                    extra.push(joined);
                }
            }
        }
        if !extra.is_empty() {
            additions.push((grapheme.clone(), extra));
        }
    }
    for (grapheme, extra) in additions {
        if let Some(spellings) = map.get_mut(&grapheme) {
            spellings.extend(extra);
        }
    }
}
