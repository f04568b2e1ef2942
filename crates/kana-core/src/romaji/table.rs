use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::config::{parse_table_toml, TableError};

pub(crate) const DEFAULT_TOML: &str = include_str!("default_table.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Returns the embedded default table TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

/// Immutable grapheme -> spellings table, shared by every session.
#[derive(Debug)]
pub struct KanaTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl KanaTable {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), TableError> {
        // Validate eagerly
        parse_table_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| TableError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static KanaTable {
        static INSTANCE: OnceLock<KanaTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let entries = parse_table_toml(toml_str).expect("kana table TOML must be valid");
            KanaTable { entries }
        })
    }

    /// Build a standalone (non-global) table.
    pub fn from_toml(toml_str: &str) -> Result<Self, TableError> {
        Ok(Self {
            entries: parse_table_toml(toml_str)?,
        })
    }

    /// Ordered spellings for an exact grapheme. `None` means the grapheme is
    /// typed literally.
    pub fn lookup(&self, grapheme: &str) -> Option<&[String]> {
        self.entries.get(grapheme).map(Vec::as_slice)
    }

    pub fn contains(&self, grapheme: &str) -> bool {
        self.entries.contains_key(grapheme)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in grapheme order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(grapheme, spellings)| (grapheme.as_str(), spellings.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spellings(table: &KanaTable, grapheme: &str) -> Vec<String> {
        table.lookup(grapheme).unwrap().to_vec()
    }

    #[test]
    fn test_vowels() {
        let table = KanaTable::global();
        for (kana, romaji) in [("あ", "a"), ("い", "i"), ("う", "u"), ("え", "e"), ("お", "o")] {
            assert_eq!(table.lookup(kana).unwrap()[0], romaji);
        }
    }

    #[test]
    fn test_canonical_first() {
        let table = KanaTable::global();
        assert_eq!(spellings(table, "し")[..3], ["shi", "si", "ci"]);
        assert_eq!(spellings(table, "ち")[..2], ["chi", "ti"]);
        assert_eq!(spellings(table, "つ")[..2], ["tsu", "tu"]);
        assert_eq!(spellings(table, "ふ")[..2], ["fu", "hu"]);
    }

    #[test]
    fn test_katakana_mirrors_hiragana() {
        let table = KanaTable::global();
        assert_eq!(spellings(table, "カ"), spellings(table, "か"));
        assert_eq!(spellings(table, "ヴ"), vec!["vu"]);
        assert_eq!(spellings(table, "ッ"), spellings(table, "っ"));
        assert_eq!(spellings(table, "ン"), spellings(table, "ん"));
        assert_eq!(spellings(table, "ファ")[0], "fa");
        assert_eq!(spellings(table, "ティ")[0], "thi");
    }

    #[test]
    fn test_youon_variants() {
        let table = KanaTable::global();
        assert_eq!(spellings(table, "きゃ")[0], "kya");
        let ja = spellings(table, "じゃ");
        assert_eq!(ja[..3], ["ja", "zya", "jya"]);
        let cha = spellings(table, "ちゃ");
        assert!(cha.contains(&"chixya".to_string()));
        assert!(cha.contains(&"tilya".to_string()));
    }

    #[test]
    fn test_coverage_minimum() {
        let table = KanaTable::global();
        let required = [
            "あいうえお",
            "かきくけこさしすせそたちつてとなにぬねのはひふへほまみむめもやゆよらりるれろわをん",
            "がぎぐげござじずぜぞだぢづでどばびぶべぼぱぴぷぺぽゔ",
            "ぁぃぅぇぉゃゅょゎっ",
            "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン",
            "ガギグゲゴザジズゼゾダヂヅデドバビブベボパピプペポヴ",
            "ァィゥェォャュョヮッ",
            "ー、。！？　 ",
        ];
        for group in required {
            for c in group.chars() {
                assert!(table.contains(&c.to_string()), "missing grapheme {c:?}");
            }
        }
        for digraph in [
            "きゃ", "しゃ", "ちゃ", "にゃ", "ひゃ", "みゃ", "りゃ", "ぎゃ", "じゃ", "びゃ", "ぴゃ",
            "ファ", "フィ", "フェ", "フォ", "ティ", "ディ", "トゥ", "ドゥ", "ウィ", "ウェ", "ウォ",
            "ツァ", "ツィ", "ツェ", "ツォ", "クァ", "クィ", "クェ", "クォ", "イェ", "ヴァ",
        ] {
            assert!(table.contains(digraph), "missing digraph {digraph}");
        }
    }

    #[test]
    fn test_punctuation_is_literal() {
        let table = KanaTable::global();
        assert_eq!(spellings(table, "ー"), vec!["-"]);
        assert_eq!(spellings(table, "、"), vec![","]);
        assert_eq!(spellings(table, "。"), vec!["."]);
        assert_eq!(spellings(table, "！"), vec!["!"]);
        assert_eq!(spellings(table, "？"), vec!["?"]);
        assert_eq!(spellings(table, "　"), vec![" "]);
        assert_eq!(spellings(table, " "), vec![" "]);
    }

    #[test]
    fn test_unsupported_is_none() {
        let table = KanaTable::global();
        assert!(table.lookup("☆").is_none());
        assert!(table.lookup("漢").is_none());
        assert!(table.lookup("").is_none());
    }

    #[test]
    fn test_all_spellings_valid() {
        let table = KanaTable::global();
        for (grapheme, spellings) in table.iter() {
            assert!(!spellings.is_empty(), "no spellings for {grapheme}");
            let count = grapheme.chars().count();
            assert!((1..=2).contains(&count), "bad grapheme {grapheme:?}");
            for s in spellings {
                assert!(!s.is_empty());
                assert!(
                    s.chars().all(|c| c.is_ascii() && !c.is_ascii_uppercase()),
                    "bad spelling {s:?} for {grapheme}"
                );
            }
        }
    }

    #[test]
    fn test_from_toml_is_independent() {
        let table = KanaTable::from_toml("[kana]\n\"か\" = [\"ka\"]\n").unwrap();
        assert_eq!(table.len(), 2); // か + カ
        assert!(table.lookup("き").is_none());
        assert!(KanaTable::global().lookup("き").is_some());
    }
}
