//! Whole-table checks: every spelling types its grapheme, and canonical
//! spellings type whole texts.

use super::*;
use crate::SessionState;

#[test]
fn every_spelling_completes_its_grapheme() {
    let table = KanaTable::global();
    for (kana, spellings) in table.iter() {
        for spelling in spellings {
            let mut session = running(kana);
            let outcomes = type_str(&mut session, spelling);
            let completions = outcomes
                .iter()
                .filter(|o| {
                    matches!(
                        o,
                        KeystrokeOutcome::Completed | KeystrokeOutcome::TokenCompleted { .. }
                    )
                })
                .count();
            assert_eq!(completions, 1, "{kana} typed as {spelling:?}");
            assert_eq!(session.state(), SessionState::Completed, "{kana} {spelling:?}");
            assert_eq!(
                session.current_stats().total_errors,
                0,
                "{kana} typed as {spelling:?}"
            );
        }
    }
}

fn canonical_input(session: &TypingSession) -> String {
    session.tokens().iter().map(|t| t.canonical()).collect()
}

#[test]
fn canonical_spellings_complete_texts() {
    let texts = [
        "こんにちは",
        "きょうはいいてんきですね。",
        "がっこうへいきます",
        "ちょっとまって、だいじょうぶ！",
        "しんぶん",
        "きんようび",
        "ほんや",
        "コンピューター",
        "ファイルをひらく",
        "ヴァイオリン",
        "ティーカップ",
        "ウェブサイト",
        "あっ",
        "まっちゃ",
        "でんわ　ばんごう",
        "うんん、",
        "んんか",
        "かんんき",
        "んっな",
        "ほんっと",
    ];
    for text in texts {
        let mut session = running(text);
        let input = canonical_input(&session);
        type_str(&mut session, &input);
        assert_eq!(session.state(), SessionState::Completed, "{text}: {input}");
        let stats = session.current_stats();
        assert_eq!(stats.total_errors, 0, "{text}: {input}");
        assert_eq!(stats.accuracy, 100.0, "{text}: {input}");
    }
}

#[test]
fn canonical_hint_matches_remaining_romaji() {
    let session = running("きょうはいいてんきですね。");
    assert_eq!(session.remaining_romaji(), canonical_input(&session));
    assert_eq!(session.remaining_romaji(), "kyouhaiitennkidesune.");
}

#[test]
fn literal_symbol_round_trip() {
    let mut session = running("☆ほし☆");
    let input = canonical_input(&session);
    assert_eq!(input, "☆hoshi☆");
    type_str(&mut session, &input);
    assert_eq!(session.state(), SessionState::Completed);
}
