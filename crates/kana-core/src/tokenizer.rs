//! Longest-match segmentation of a kana practice text into typing tokens.

use tracing::{debug_span, warn};

use crate::romaji::{push_unique, KanaTable};

/// One typing unit: a kana grapheme and the romaji that completes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kana: String,
    /// Accepted spellings; the first is the canonical hint.
    pub patterns: Vec<String>,
    /// Character offsets into the source text, `start..end`.
    pub start: usize,
    pub end: usize,
    /// Not in the table: the character itself is the only spelling.
    pub literal: bool,
}

impl Token {
    fn new(kana: String, patterns: Vec<String>, start: usize, end: usize) -> Self {
        Self {
            kana,
            patterns,
            start,
            end,
            literal: false,
        }
    }

    fn literal(c: char, start: usize) -> Self {
        Self {
            kana: c.to_string(),
            patterns: vec![c.to_string()],
            start,
            end: start + 1,
            literal: true,
        }
    }

    pub fn canonical(&self) -> &str {
        self.patterns.first().map(String::as_str).unwrap_or("")
    }

    /// っ or ッ.
    pub fn is_sokuon(&self) -> bool {
        matches!(self.kana.as_str(), "っ" | "ッ")
    }

    fn is_moraic_nasal(&self) -> bool {
        matches!(self.kana.as_str(), "ん" | "ン")
    }
}

/// Split `text` into tokens. Never fails: characters missing from the table
/// become literal tokens.
pub fn tokenize(table: &KanaTable, text: &str) -> Vec<Token> {
    let _span = debug_span!("tokenize", chars = text.chars().count()).entered();

    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if i + 1 < chars.len() {
            let pair: String = chars[i..i + 2].iter().collect();
            if let Some(spellings) = table.lookup(&pair) {
                tokens.push(Token::new(pair, spellings.to_vec(), i, i + 2));
                i += 2;
                continue;
            }
        }

        let single = chars[i].to_string();
        match table.lookup(&single) {
            Some(spellings) => tokens.push(Token::new(single, spellings.to_vec(), i, i + 1)),
            None => {
                warn!(character = %chars[i], position = i, "unsupported character, typed literally");
                tokens.push(Token::literal(chars[i], i));
            }
        }
        i += 1;
    }

    resolve_context(table, &mut tokens);
    tokens
}

/// Second pass: っ and ん take their spellings from the token after them.
fn resolve_context(table: &KanaTable, tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        let derived = {
            let next = tokens
                .get(i + 1)
                .filter(|t| !t.literal)
                .map(|t| t.kana.as_str());
            let token = &tokens[i];
            if token.is_sokuon() {
                Some(geminate_onsets(table, next))
            } else if token.is_moraic_nasal() {
                Some(table.derive_moraic_nasal(next))
            } else {
                None
            }
        };
        if let Some(patterns) = derived {
            tokens[i].patterns = patterns;
        }
    }
}

/// Patterns for a sokuon token. Each doubled spelling from `derive_geminate`
/// ("kka") spans the next grapheme, so the sokuon keeps only its leading
/// letter ("k") and the rest is typed against the next token, which then only
/// accepts spellings that pair with that letter (see `is_geminate_pair`).
/// Onsets that would shadow a literal spelling ("x" vs "xtu") are dropped.
fn geminate_onsets(table: &KanaTable, next: Option<&str>) -> Vec<String> {
    let literals = table.sokuon_literals();
    let mut onsets = Vec::new();
    for derived in table.derive_geminate(next) {
        if literals.contains(&derived) {
            push_unique(&mut onsets, derived);
            continue;
        }
        let onset: String = derived.chars().take(1).collect();
        if literals.iter().any(|l| l.starts_with(&onset)) {
            continue;
        }
        push_unique(&mut onsets, onset);
    }
    onsets
}

/// Characters of `text` that would degrade to literal tokens, with their
/// character offsets.
pub fn unsupported_chars(table: &KanaTable, text: &str) -> Vec<(usize, char)> {
    tokenize(table, text)
        .into_iter()
        .filter(|t| t.literal)
        .filter_map(|t| t.kana.chars().next().map(|c| (t.start, c)))
        .collect()
}
