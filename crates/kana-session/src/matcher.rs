//! Per-keystroke matching of typed romaji against the token sequence.
//!
//! The whole state is a function of the typed characters: appending runs one
//! step of [`MatchState::advance`], and a correction re-derives everything from
//! the kept prefix with [`MatchState::rederive`].

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;

use kana_core::romaji::is_geminate_pair;
use kana_core::tokenizer::Token;
use tracing::debug;

use crate::types::ErrorEntry;

/// How many completed tokens a boundary re-split may reach back over.
const RESPLIT_WINDOW: usize = 8;

/// What one appended character did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Partial,
    Completed { index: usize },
    Miss { expected: char, actual: char },
}

pub(crate) struct MatchState {
    pub(crate) tokens: Arc<[Token]>,
    pub(crate) token_index: usize,
    /// Every character still present in the host's input field.
    pub(crate) typed: Vec<char>,
    /// `starts[i]` is where token `i` begins in `typed`; one entry per token
    /// up to and including the current one.
    pub(crate) starts: Vec<usize>,
    pub(crate) error_log: BTreeMap<usize, ErrorEntry>,
    pub(crate) total_typed: usize,
    pub(crate) total_errors: usize,
    pub(crate) total_misses: usize,
}

impl MatchState {
    pub(crate) fn new(tokens: Arc<[Token]>) -> Self {
        Self {
            tokens,
            token_index: 0,
            typed: Vec::new(),
            starts: vec![0],
            error_log: BTreeMap::new(),
            total_typed: 0,
            total_errors: 0,
            total_misses: 0,
        }
    }

    /// Back to the first token with nothing typed. Tokens are kept.
    pub(crate) fn clear(&mut self) {
        *self = Self::new(Arc::clone(&self.tokens));
    }

    pub(crate) fn is_complete(&self) -> bool {
        self.token_index >= self.tokens.len()
    }

    pub(crate) fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.token_index)
    }

    fn current_start(&self) -> usize {
        self.starts[self.token_index]
    }

    /// Characters attributed to the current token.
    pub(crate) fn input_buffer(&self) -> String {
        self.typed[self.current_start()..].iter().collect()
    }

    /// Characters attributed to token `index`, which must not be past the
    /// current one.
    pub(crate) fn token_input(&self, index: usize) -> String {
        let end = self
            .starts
            .get(index + 1)
            .copied()
            .unwrap_or(self.typed.len());
        self.typed[self.starts[index]..end].iter().collect()
    }

    /// Input of the token before `index`, empty for the first token.
    fn input_before(&self, index: usize) -> String {
        match index.checked_sub(1) {
            Some(previous) => self.token_input(previous),
            None => String::new(),
        }
    }

    /// Patterns the current token accepts, in table order.
    pub(crate) fn current_patterns(&self) -> Vec<&str> {
        accepted(
            &self.tokens,
            self.token_index,
            &self.input_before(self.token_index),
        )
    }

    /// Append one character.
    pub(crate) fn advance(&mut self, key: char) -> Step {
        let tokens = Arc::clone(&self.tokens);
        if self.is_complete() {
            return Step::Partial;
        }
        let patterns = accepted(
            &tokens,
            self.token_index,
            &self.input_before(self.token_index),
        );

        let old_buffer = self.input_buffer();
        let mut candidate = old_buffer.clone();
        candidate.push(key);
        self.typed.push(key);
        self.total_typed += 1;

        if patterns.iter().any(|p| p.starts_with(candidate.as_str())) {
            if patterns.iter().any(|p| *p == candidate) {
                return self.complete_current();
            }
            return Step::Partial;
        }

        if patterns.iter().any(|p| p.starts_with(old_buffer.as_str())) {
            if let Some(step) = self.resplit() {
                return step;
            }
        }

        let expected = expected_char(&patterns, &old_buffer);
        let position = self.typed.len() - 1;
        self.error_log.insert(
            position,
            ErrorEntry {
                position,
                expected,
                actual: key,
            },
        );
        self.total_errors += 1;
        self.total_misses += 1;
        Step::Miss {
            expected,
            actual: key,
        }
    }

    fn complete_current(&mut self) -> Step {
        let index = self.token_index;
        self.token_index += 1;
        self.starts.push(self.typed.len());
        Step::Completed { index }
    }

    /// The last typed key does not fit the current token. Re-segment the
    /// typed tail from an earlier token, nearest first: every token up to the
    /// cursor takes an exact pattern, and the token left under the cursor
    /// keeps a valid prefix. A lone "n" completes ん eagerly, so this is how
    /// "nn" still works afterwards, also across runs like "んん" or "んっ".
    fn resplit(&mut self) -> Option<Step> {
        let current = self.token_index;
        let tokens = Arc::clone(&self.tokens);
        let floor = current.saturating_sub(RESPLIT_WINDOW);

        for from in (floor..current).rev() {
            let before = self.input_before(from);
            let mut lengths = Vec::new();
            let Some(cursor) = split_tail(
                &tokens,
                from,
                &before,
                &self.typed[self.starts[from]..],
                current,
                &mut lengths,
            ) else {
                continue;
            };

            let mut position = self.starts[from];
            self.starts.truncate(from + 1);
            for len in lengths {
                position += len;
                self.starts.push(position);
            }
            self.token_index = cursor;
            debug!(from, token_index = cursor, "token boundaries re-split");
            if cursor > current {
                return Some(Step::Completed { index: cursor - 1 });
            }
            return Some(Step::Partial);
        }
        None
    }

    /// Keep only the first `len` typed characters and re-derive token index,
    /// boundaries, counts and the error log from them. Misses are not
    /// re-derived: they count every wrong keystroke ever made.
    pub(crate) fn rederive(&mut self, len: usize) {
        let kept: Vec<char> = self.typed[..len.min(self.typed.len())].to_vec();
        let misses = self.total_misses;
        self.clear();
        for key in kept {
            if self.is_complete() {
                break;
            }
            self.advance(key);
        }
        self.total_misses = misses;
    }
}

/// Patterns of `tokens[index]` given `before`, the input of the token ahead
/// of it. After a っ typed as a single onset letter only the spellings that
/// pair with that letter count ("k" then "ka", never "c" then "ti").
pub(crate) fn accepted<'a>(tokens: &'a [Token], index: usize, before: &str) -> Vec<&'a str> {
    let Some(token) = tokens.get(index) else {
        return Vec::new();
    };
    let all: Vec<&str> = token.patterns.iter().map(String::as_str).collect();
    let follows_sokuon = index
        .checked_sub(1)
        .is_some_and(|previous| tokens[previous].is_sokuon());
    let mut letters = before.chars();
    let onset = match (letters.next(), letters.next()) {
        (Some(c), None) if follows_sokuon => c,
        _ => return all,
    };
    let paired: Vec<&str> = all
        .iter()
        .copied()
        .filter(|p| is_geminate_pair(onset, p))
        .collect();
    if paired.is_empty() {
        all
    } else {
        paired
    }
}

/// Split `input` over `tokens[index..]`. Tokens take exact patterns, longest
/// first, until the input runs out; the token left under the cursor keeps a
/// valid prefix. The cursor must end at `min_index` or later. Pushes the
/// length of each completed token and returns the cursor.
fn split_tail(
    tokens: &[Token],
    index: usize,
    before: &str,
    input: &[char],
    min_index: usize,
    lengths: &mut Vec<usize>,
) -> Option<usize> {
    if input.is_empty() && index >= min_index {
        return Some(index);
    }
    let mut patterns = accepted(tokens, index, before);
    patterns.sort_by_key(|p| Reverse(p.chars().count()));

    for pattern in &patterns {
        let len = pattern.chars().count();
        if len > input.len() || !pattern.chars().eq(input[..len].iter().copied()) {
            continue;
        }
        lengths.push(len);
        if let Some(cursor) = split_tail(tokens, index + 1, pattern, &input[len..], min_index, lengths) {
            return Some(cursor);
        }
        lengths.pop();
    }

    let fits = index >= min_index
        && patterns.iter().any(|p| {
            p.chars().count() > input.len() && p.chars().zip(input).all(|(a, &b)| a == b)
        });
    fits.then_some(index)
}

/// The character the user should have typed: the next one of the pattern
/// sharing the longest prefix with `buffer` (earliest pattern on ties).
pub(crate) fn expected_char(patterns: &[&str], buffer: &str) -> char {
    let mut best: Option<(usize, &str)> = None;
    for &pattern in patterns {
        let shared = pattern
            .chars()
            .zip(buffer.chars())
            .take_while(|(a, b)| a == b)
            .count();
        if best.map_or(true, |(longest, _)| shared > longest) {
            best = Some((shared, pattern));
        }
    }
    best.and_then(|(shared, pattern)| pattern.chars().nth(shared))
        .or_else(|| patterns.first().and_then(|p| p.chars().next()))
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}
