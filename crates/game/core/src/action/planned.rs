//! Pre-planned actions produced by the decision engine.
//!
//! A plan carries the energy cost the planner assumed. The engine never
//! trusts it: every step is re-validated against the live state when it is
//! replayed and skipped if it became illegal.

use crate::state::{MatchState, Side};

use super::combat::CombatAction;

/// One step of an AI plan.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannedAction {
    pub action: CombatAction,
    /// Energy the planner budgeted for this step.
    pub cost: u32,
}

impl PlannedAction {
    /// Plans `action` at its canonical cost in `state`.
    pub fn priced(action: impl Into<CombatAction>, state: &MatchState) -> Self {
        let action = action.into();
        let cost = action.cost(state);
        Self { action, cost }
    }

    pub fn side(&self) -> Side {
        self.action.side()
    }
}

/// Ordered steps for one side, replayed in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSequence {
    pub side: Side,
    pub steps: Vec<PlannedAction>,
}

impl ActionSequence {
    pub fn new(side: Side, steps: Vec<PlannedAction>) -> Self {
        Self { side, steps }
    }

    pub fn total_cost(&self) -> u32 {
        self.steps.iter().map(|step| step.cost).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// What happened to each step of a replayed plan.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceReport {
    pub applied: usize,
    pub skipped: usize,
    /// Steps never attempted because the battle ended first.
    pub dropped: usize,
}
