use std::process;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use kana_core::romaji::KanaTable;
use kana_session::{
    KeystrokeOutcome, ManualClock, SessionResults, SessionState, SessionStats, TypingSession,
};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Input character that stands for one backspace in a simulated run.
pub const BACKSPACE_MARK: char = '<';

#[derive(Debug, Serialize)]
pub struct SimStep {
    pub key: String,
    pub outcome: String,
    pub token_index: usize,
    pub buffer: String,
}

#[derive(Debug, Serialize)]
pub struct SimReport {
    pub text: String,
    pub state: SessionState,
    pub steps: Vec<SimStep>,
    pub stats: SessionStats,
    pub results: Option<SessionResults>,
    pub remaining: String,
}

fn outcome_label(outcome: KeystrokeOutcome) -> String {
    match outcome {
        KeystrokeOutcome::Ignored => "ignored".to_string(),
        KeystrokeOutcome::Partial => "partial".to_string(),
        KeystrokeOutcome::TokenCompleted { index } => format!("token {index} done"),
        KeystrokeOutcome::Completed => "completed".to_string(),
        KeystrokeOutcome::Miss { expected, actual } => {
            format!("miss (expected {expected:?}, got {actual:?})")
        }
    }
}

/// Type `input` into a fresh session over `text`, one key every `ms_per_key`
/// on a manual clock. `<` deletes the last typed character.
pub fn simulate(text: &str, input: &str, ms_per_key: u64) -> SimReport {
    let clock = Arc::new(ManualClock::new());
    let mut session = TypingSession::with_clock(KanaTable::global(), clock.clone());
    session.load(text);
    session.start();

    let mut steps = Vec::new();
    for key in input.chars() {
        clock.advance(Duration::from_millis(ms_per_key));
        let outcome = if key == BACKSPACE_MARK {
            if session.backspace() {
                "backspace".to_string()
            } else {
                "ignored".to_string()
            }
        } else {
            outcome_label(session.on_keystroke(key))
        };
        steps.push(SimStep {
            key: key.to_string(),
            outcome,
            token_index: session.token_index(),
            buffer: session.input_buffer(),
        });
    }

    SimReport {
        text: text.to_string(),
        state: session.state(),
        steps,
        stats: session.current_stats(),
        results: session.results(),
        remaining: session.remaining_romaji(),
    }
}

pub fn format_report(report: &SimReport) -> String {
    let mut out = format!("=== {} ===\n", report.text);
    for (i, step) in report.steps.iter().enumerate() {
        out.push_str(&format!(
            "{:>4}  {:<3} {:<40} token={} buffer={:?}\n",
            i + 1,
            step.key,
            step.outcome,
            step.token_index,
            step.buffer,
        ));
    }
    let s = &report.stats;
    out.push_str(&format!(
        "\nstate={:?} typed={} errors={} misses={} accuracy={:.1}% wpm={:.1} progress={:.0}%\n",
        report.state,
        s.total_typed,
        s.total_errors,
        s.total_misses,
        s.accuracy,
        s.wpm,
        s.progress * 100.0,
    ));
    if !report.remaining.is_empty() {
        out.push_str(&format!("remaining: {}\n", report.remaining));
    }
    if let Some(r) = &report.results {
        out.push_str(&format!("duration: {:.3}s\n", r.duration.as_secs_f64()));
        for e in &r.error_log {
            out.push_str(&format!(
                "  error at {}: expected {:?}, got {:?}\n",
                e.position, e.expected, e.actual
            ));
        }
    }
    out
}

pub fn simulate_cmd(text: &str, input: &str, ms_per_key: u64, json: bool) {
    let report = simulate(text, input, ms_per_key);
    if json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&report), "Error encoding JSON: {}")
        );
    } else {
        print!("{}", format_report(&report));
    }
}
