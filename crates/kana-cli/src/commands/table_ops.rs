use std::fs;
use std::process;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use kana_core::romaji::KanaTable;
use kana_core::tokenizer::{tokenize, unsupported_chars, Token};
use kana_core::unicode::{is_hiragana, is_kanji, is_katakana};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn table_export() {
    print!("{}", kana_core::romaji::default_toml());
}

pub fn table_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(kana_core::romaji::parse_table_toml(&content), "Error: {}");
    let spellings: usize = map.values().map(Vec::len).sum();
    println!("OK: {} graphemes, {} spellings", map.len(), spellings);
}

pub fn settings_export() {
    print!("{}", kana_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        kana_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: scoring.chars_per_word={}, input.fold_uppercase={}, survival.lives={}, time_attack.limit_secs={}",
        s.scoring.chars_per_word, s.input.fold_uppercase, s.survival.lives, s.time_attack.limit_secs
    );
}

#[derive(Debug, Serialize)]
pub struct TokenRow<'a> {
    pub kana: &'a str,
    pub start: usize,
    pub end: usize,
    pub literal: bool,
    pub patterns: &'a [String],
}

pub fn token_rows(tokens: &[Token]) -> Vec<TokenRow<'_>> {
    tokens
        .iter()
        .map(|t| TokenRow {
            kana: &t.kana,
            start: t.start,
            end: t.end,
            literal: t.literal,
            patterns: &t.patterns,
        })
        .collect()
}

/// One line per token: `[start,end] kana  patterns`, kana padded by display
/// width so full-width and half-width text line up.
pub fn format_tokens(tokens: &[Token]) -> String {
    let pad_width: usize = 6;
    let mut out = String::new();
    for t in tokens {
        let width = UnicodeWidthStr::width(t.kana.as_str());
        let pad = " ".repeat(pad_width.saturating_sub(width));
        let marker = if t.literal { "  (literal)" } else { "" };
        out.push_str(&format!(
            "[{},{}] {}{}{}{}\n",
            t.start,
            t.end,
            t.kana,
            pad,
            t.patterns.join(" "),
            marker,
        ));
    }
    out
}

pub fn tokenize_cmd(text: &str, json: bool) {
    let tokens = tokenize(KanaTable::global(), text);
    if json {
        let rows = token_rows(&tokens);
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&rows), "Error encoding JSON: {}")
        );
    } else {
        print!("{}", format_tokens(&tokens));
    }
}

/// Characters that would be typed literally, reported as `line:column`
/// (1-based, in characters).
pub fn find_unsupported(table: &KanaTable, content: &str) -> Vec<(usize, usize, char)> {
    content
        .lines()
        .enumerate()
        .flat_map(|(line, text)| {
            unsupported_chars(table, text)
                .into_iter()
                .filter(|(_, c)| !c.is_whitespace())
                .map(move |(col, c)| (line + 1, col + 1, c))
        })
        .collect()
}

/// Rough script label for a coverage report line.
pub fn char_kind(c: char) -> &'static str {
    if is_kanji(c) {
        "kanji"
    } else if is_hiragana(c) {
        "hiragana"
    } else if is_katakana(c) {
        "katakana"
    } else if c.is_ascii() {
        "ascii"
    } else {
        "symbol"
    }
}

pub fn coverage_cmd(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let found = find_unsupported(KanaTable::global(), &content);
    for (line, col, c) in &found {
        println!(
            "{file}:{line}:{col}: {c} (U+{:04X}, {})",
            *c as u32,
            char_kind(*c)
        );
    }
    if found.is_empty() {
        println!("OK: every character is in the table");
    } else {
        eprintln!("{} unsupported characters", found.len());
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_aligns_by_display_width() {
        let tokens = tokenize(KanaTable::global(), "きゃa");
        let text = format_tokens(&tokens);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "[0,2] きゃ  kya kilya kixya");
        assert_eq!(lines[1], "[2,3] a     a  (literal)");
    }

    #[test]
    fn rows_mirror_tokens() {
        let tokens = tokenize(KanaTable::global(), "かっぱ");
        let rows = token_rows(&tokens);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].kana, "っ");
        assert_eq!(rows[1].patterns[0], "p");
        let json = serde_json::to_string(&rows).unwrap();
        assert!(json.contains("\"kana\":\"か\""));
    }

    #[test]
    fn unsupported_reports_line_and_column() {
        let found = find_unsupported(KanaTable::global(), "かな\nひら漢がな☆\n");
        assert_eq!(found, vec![(2, 3, '漢'), (2, 6, '☆')]);
    }

    #[test]
    fn char_kinds() {
        assert_eq!(char_kind('漢'), "kanji");
        assert_eq!(char_kind('ヷ'), "katakana");
        assert_eq!(char_kind('#'), "ascii");
        assert_eq!(char_kind('☆'), "symbol");
    }

    #[test]
    fn whitespace_is_not_reported() {
        let found = find_unsupported(KanaTable::global(), "か\tな");
        assert!(found.is_empty());
    }
}
