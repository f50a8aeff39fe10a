//! Authoritative match state representation.
//!
//! This module owns the data structures that describe both sides, the match
//! phase and the append-only log. Runtime layers clone or query this state
//! but mutate it exclusively through the engine.
mod invariants;
pub mod types;

#[cfg(feature = "serde")]
mod fingerprint;

pub use invariants::{InvariantViolation, check_invariants};
pub use types::{
    ActiveEffects, AttackKind, BaseStats, BattleStats, Creature, CreatureId, CreatureRef,
    Difficulty, DifficultyProfile, Effect, EffectFamily, EffectKind, Item, ItemCategory, ItemId,
    ItemType, LogEntry, Rarity, Side, SideState, StatDeltas, StatKind, Zone,
};

#[cfg(feature = "serde")]
pub use fingerprint::FingerprintError;

use crate::config::BattleConfig;

/// Lifecycle of a match.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    #[default]
    Setup,
    Battle,
    Victory,
    Defeat,
}

impl Phase {
    /// Victory and defeat only leave through an explicit reset.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// Terminal result from the human side's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    Victory,
    Defeat,
}

impl From<Outcome> for Phase {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Victory => Phase::Victory,
            Outcome::Defeat => Phase::Defeat,
        }
    }
}

/// Statistics published once the match reaches a terminal phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSummary {
    pub outcome: Outcome,
    pub turns: u32,
    pub remaining_human_units: usize,
    pub opponents_defeated: usize,
    pub max_combo: u32,
}

/// Canonical snapshot of a match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    pub phase: Phase,
    /// Starts at 1; incremented once per full human→opponent cycle.
    pub turn: u32,
    pub active_side: Side,
    pub difficulty: Difficulty,
    /// Opponent tuning captured at battle start.
    pub rules: DifficultyProfile,
    pub config: BattleConfig,
    pub human: SideState,
    pub opponent: SideState,
    pub log: Vec<LogEntry>,
    /// Highest combo counter reached by either side.
    pub max_combo: u32,
    /// Opponent creatures at battle start, used for the terminal summary.
    pub opponent_roster_size: usize,
}

impl MatchState {
    /// Creates a fresh match in the setup phase.
    pub fn new(difficulty: Difficulty, rules: DifficultyProfile) -> Self {
        Self {
            phase: Phase::Setup,
            turn: 1,
            active_side: Side::Human,
            difficulty,
            rules,
            config: BattleConfig::default(),
            human: SideState::default(),
            opponent: SideState::default(),
            log: Vec::new(),
            max_combo: 0,
            opponent_roster_size: 0,
        }
    }

    #[inline]
    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Human => &self.human,
            Side::Opponent => &self.opponent,
        }
    }

    #[inline]
    pub fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Human => &mut self.human,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Appends a turn-stamped line to the log.
    pub fn push_log(&mut self, side: Option<Side>, message: impl Into<String>) {
        let seq = self.log.len() as u64;
        self.log.push(LogEntry {
            seq,
            turn: self.turn,
            side,
            message: message.into(),
        });
    }

    /// Field capacity for a side: fixed for the human, tiered for the opponent.
    pub fn field_capacity(&self, side: Side) -> usize {
        let capacity = match side {
            Side::Human => BattleConfig::HUMAN_FIELD_CAPACITY,
            Side::Opponent => self.rules.field_capacity,
        };
        capacity.min(BattleConfig::MAX_FIELD_SLOTS)
    }

    /// Maximum hand size before drawing stops.
    pub fn hand_cap(&self, side: Side) -> usize {
        match side {
            Side::Human => BattleConfig::HUMAN_HAND_CAP,
            Side::Opponent => self.rules.initial_hand_size + 1,
        }
    }

    /// True when the side's hand is below its cap and its deck is nonempty.
    pub fn can_draw(&self, side: Side) -> bool {
        let state = self.side(side);
        state.hand.len() < self.hand_cap(side) && !state.deck.is_empty()
    }

    /// Checks both sides for exhaustion. The opponent is checked first, so a
    /// simultaneous wipe is a victory.
    pub fn evaluate_outcome(&self) -> Option<Outcome> {
        if self.opponent.is_exhausted() {
            Some(Outcome::Victory)
        } else if self.human.is_exhausted() {
            Some(Outcome::Defeat)
        } else {
            None
        }
    }

    /// Moves the match into a terminal phase if a side is exhausted.
    /// Only acts during battle.
    pub fn resolve_outcome(&mut self) -> Option<Outcome> {
        if self.phase != Phase::Battle {
            return None;
        }
        let outcome = self.evaluate_outcome()?;
        self.phase = outcome.into();
        let message = match outcome {
            Outcome::Victory => "Victory! The enemy has no creatures left.",
            Outcome::Defeat => "Defeat! You have no creatures left.",
        };
        self.push_log(None, message);
        Some(outcome)
    }

    /// Returns the terminal summary once the match has ended.
    pub fn summary(&self) -> Option<BattleSummary> {
        let outcome = match self.phase {
            Phase::Victory => Outcome::Victory,
            Phase::Defeat => Outcome::Defeat,
            Phase::Setup | Phase::Battle => return None,
        };
        let opponent_remaining = self.opponent.remaining_units() + self.opponent.deck.len();
        Some(BattleSummary {
            outcome,
            turns: self.turn,
            remaining_human_units: self.human.remaining_units(),
            opponents_defeated: self.opponent_roster_size.saturating_sub(opponent_remaining),
            max_combo: self.max_combo,
        })
    }

    /// Records one more successful action for `side`.
    pub fn bump_combo(&mut self, side: Side) -> u32 {
        let state = self.side_mut(side);
        state.consecutive_actions += 1;
        let streak = state.consecutive_actions;
        self.max_combo = self.max_combo.max(streak);
        streak
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(Difficulty::default(), DifficultyProfile::default())
    }
}
