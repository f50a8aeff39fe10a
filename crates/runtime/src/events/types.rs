//! Typed payloads carried on the event bus.

use serde::{Deserialize, Serialize};

use arena_core::{ActionResult, BattleSummary, Difficulty, Side};

/// Battle lifecycle and action results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    Started {
        difficulty: Difficulty,
    },
    ActionApplied {
        side: Option<Side>,
        action: String,
        result: ActionResult,
    },
    ActionRejected {
        side: Option<Side>,
        action: String,
        reason: String,
    },
    /// Published exactly once when the match reaches victory or defeat.
    Ended(BattleSummary),
    Reset,
}

/// Emitted whenever the active side or the turn number changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    pub turn: u32,
    pub active_side: Side,
}
