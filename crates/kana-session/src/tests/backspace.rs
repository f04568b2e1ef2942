use super::*;
use crate::SessionState;

#[test]
fn test_backspace_clears_error() {
    let mut session = running("か");
    type_str(&mut session, "kx");
    assert_eq!(session.current_stats().total_errors, 1);

    assert!(session.on_backspace(1));
    let stats = session.current_stats();
    assert_eq!(stats.total_errors, 0);
    assert_eq!(stats.total_typed, 1);
    assert_eq!(stats.total_misses, 1);
    assert_eq!(stats.accuracy, 100.0);
    assert_eq!(session.input_buffer(), "k");

    assert_eq!(session.on_keystroke('a'), KeystrokeOutcome::Completed);
}

#[test]
fn test_backspace_across_token_boundary() {
    let mut session = running("かき");
    type_str(&mut session, "kak");
    assert_eq!(session.token_index(), 1);

    assert!(session.on_backspace(1));
    assert_eq!(session.token_index(), 0);
    assert_eq!(session.input_buffer(), "k");
    assert_eq!(session.current_stats().total_typed, 1);
}

#[test]
fn test_backspace_to_zero() {
    let mut session = running("かき");
    type_str(&mut session, "kaxi");
    assert!(session.on_backspace(0));
    assert_eq!(session.token_index(), 0);
    assert_eq!(session.typed(), "");
    assert!(session.error_log().is_empty());
    assert_eq!(session.current_stats().total_misses, 2);
}

#[test]
fn test_backspace_keeps_earlier_errors() {
    let mut session = running("かき");
    type_str(&mut session, "xkak");
    // "x" then "xk", "xka", "xkak" all miss: the buffer never recovers
    assert_eq!(session.current_stats().total_errors, 4);
    assert!(session.on_backspace(2));
    let log = session.error_log();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].position, 0);
    assert_eq!(log[1].position, 1);
}

#[test]
fn test_single_backspace() {
    let mut session = running("かき");
    type_str(&mut session, "kaki");
    // completed; nothing more to correct
    assert!(!session.backspace());

    let mut session = running("かき");
    type_str(&mut session, "kak");
    assert!(session.backspace());
    assert_eq!(session.typed(), "ka");
    assert_eq!(session.token_index(), 1);
}

#[test]
fn test_backspace_noop_cases() {
    let mut session = running("かき");
    type_str(&mut session, "ka");
    assert!(!session.on_backspace(2));
    assert!(!session.on_backspace(10));
    assert_eq!(session.current_stats().total_typed, 2);

    let (mut idle, _clock) = make_session("かき");
    assert!(!idle.on_backspace(0));
    assert!(!idle.backspace());
}

#[test]
fn test_backspace_while_paused_is_ignored() {
    let mut session = running("かき");
    type_str(&mut session, "ka");
    session.pause();
    assert!(!session.on_backspace(0));
    assert_eq!(session.token_index(), 1);
}

#[test]
fn test_backspace_undoes_nasal_extension() {
    let mut session = running("んか");
    type_str(&mut session, "nn");
    assert_eq!(session.typed(), "nn");
    assert_eq!(session.input_buffer(), "");

    assert!(session.on_backspace(1));
    // the lone "n" already completes ん
    assert_eq!(session.token_index(), 1);
    assert_eq!(session.input_buffer(), "");

    type_str(&mut session, "ka");
    assert_eq!(session.state(), SessionState::Completed);
}

#[test]
fn test_backspace_matches_fresh_typing() {
    let text = "こんにちは";
    let mut corrected = running(text);
    type_str(&mut corrected, "konnixhi");
    corrected.on_backspace(5);
    type_str(&mut corrected, "chiha");

    let mut fresh = running(text);
    type_str(&mut fresh, "konnichiha");

    assert_eq!(corrected.typed(), fresh.typed());
    assert_eq!(corrected.token_index(), fresh.token_index());
    assert_eq!(corrected.error_log(), fresh.error_log());
    assert_eq!(corrected.state(), SessionState::Completed);
    assert_eq!(fresh.state(), SessionState::Completed);
    assert_eq!(
        corrected.current_stats().total_typed,
        fresh.current_stats().total_typed
    );
    assert_eq!(corrected.current_stats().total_misses, 3);
}
