//! Text rendering for the log feed and the end-of-battle summary.

use arena_core::{BattleSummary, LogEntry, Outcome, Side};

/// One feed line: `[T3 #17] Enemy: ...`, prefixed with who acted.
pub fn format_log_entry(entry: &LogEntry) -> String {
    let marker = match entry.side {
        Some(Side::Human) => '>',
        Some(Side::Opponent) => '<',
        None => '*',
    };
    format!("{marker} {entry}")
}

pub fn format_summary(summary: &BattleSummary) -> String {
    let headline = match summary.outcome {
        Outcome::Victory => "VICTORY",
        Outcome::Defeat => "DEFEAT",
    };
    format!(
        "{headline}\n  turns: {}\n  units remaining: {}\n  opponents defeated: {}\n  best combo: {}",
        summary.turns, summary.remaining_human_units, summary.opponents_defeated, summary.max_combo
    )
}
