//! Context-sensitive spellings for the sokuon (っ) and the moraic nasal (ん).

use crate::unicode::is_romaji_vowel;

use super::table::KanaTable;

/// Used when a custom table has no entry for っ.
const SOKUON_FALLBACK: [&str; 3] = ["ltu", "xtu", "ltsu"];

pub(crate) fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

/// Whether `spelling` may follow the letter `onset` typed for a preceding っ:
/// the doubled first letter ("k" + "ka"), or "t" before Hepburn "ch"
/// ("t" + "cha").
pub fn is_geminate_pair(onset: char, spelling: &str) -> bool {
    spelling.starts_with(onset) || (onset == 't' && spelling.starts_with("ch"))
}

impl KanaTable {
    /// The table's own spellings for a standalone small tsu.
    pub fn sokuon_literals(&self) -> Vec<String> {
        match self.lookup("っ") {
            Some(spellings) => spellings.to_vec(),
            None => SOKUON_FALLBACK.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Spellings for っ/ッ given the grapheme that follows it.
    ///
    /// Every spelling of `next` with its first letter doubled ("ka" -> "kka"),
    /// plus the Hepburn "tch" form for "ch" spellings, then the literal
    /// small-tsu spellings, deduplicated. An absent or unsupported `next`
    /// yields the literals only.
    pub fn derive_geminate(&self, next: Option<&str>) -> Vec<String> {
        let mut derived = Vec::new();
        if let Some(spellings) = next.and_then(|g| self.lookup(g)) {
            for spelling in spellings {
                let Some(first) = spelling.chars().next() else {
                    continue;
                };
                if !first.is_ascii_alphabetic() {
                    continue;
                }
                push_unique(&mut derived, format!("{first}{spelling}"));
                if spelling.starts_with("ch") {
                    push_unique(&mut derived, format!("t{spelling}"));
                }
            }
        }
        for literal in self.sokuon_literals() {
            push_unique(&mut derived, literal);
        }
        derived
    }

    /// Spellings for ん/ン given the grapheme that follows it.
    ///
    /// A lone "n" is only offered when the next primary spelling does not start
    /// with a vowel or "y"; otherwise "na"/"nya" would swallow it.
    pub fn derive_moraic_nasal(&self, next: Option<&str>) -> Vec<String> {
        let onset = next
            .and_then(|g| self.lookup(g))
            .and_then(|spellings| spellings.first())
            .and_then(|primary| primary.chars().next());
        match onset {
            Some(c) if is_romaji_vowel(c) || c == 'y' => vec!["nn".into(), "xn".into()],
            _ => vec!["nn".into(), "xn".into(), "n".into()],
        }
    }
}
