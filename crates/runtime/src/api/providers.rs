//! Asynchronous abstraction for sourcing side intent.
//!
//! Runtime users plug in [`ActionProvider`] implementations so a match can
//! run with human input, scripted fixtures, or AI policies.
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use arena_core::{Action, ActionSequence, MatchState, PlannedAction, Side};

use super::errors::{Result, RuntimeError};

/// What a side wants to do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    EndTurn,
    Single(PlannedAction),
    /// Ordered steps, each replayed against the state left by the previous one.
    Sequence(Vec<PlannedAction>),
}

impl Decision {
    /// Converts the decision into an engine action. `EndTurn` has none.
    pub fn into_action(self, side: Side) -> Option<Action> {
        match self {
            Decision::EndTurn => None,
            Decision::Single(step) => Some(Action::Planned(step)),
            Decision::Sequence(steps) => Some(Action::Sequence(ActionSequence::new(side, steps))),
        }
    }

    /// Total energy the decision budgets for.
    pub fn planned_cost(&self) -> u32 {
        match self {
            Decision::EndTurn => 0,
            Decision::Single(step) => step.cost,
            Decision::Sequence(steps) => steps.iter().map(|step| step.cost).sum(),
        }
    }
}

/// Trait for providing decisions based on the current match state.
///
/// Different implementations can handle:
/// - Player input (from UI/CLI)
/// - AI decisions
/// - Scripted/replayed actions
/// - Testing fixtures
#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Decide the next step for `side` from a read-only snapshot.
    async fn decide(&self, side: Side, state: &MatchState) -> Result<Decision>;

    /// Asked after a single action landed: act again this turn?
    async fn chain_after_single(&self, _side: Side, _state: &MatchState) -> bool {
        false
    }
}

/// A provider that always ends the turn.
/// Useful for testing or as a passive side.
pub struct EndTurnProvider;

#[async_trait]
impl ActionProvider for EndTurnProvider {
    async fn decide(&self, _side: Side, _state: &MatchState) -> Result<Decision> {
        Ok(Decision::EndTurn)
    }
}

/// Replays a fixed list of decisions, then ends every turn.
#[derive(Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<Decision>>,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().map(|script| script.len()).unwrap_or(0)
    }
}

#[async_trait]
impl ActionProvider for ScriptedProvider {
    async fn decide(&self, _side: Side, _state: &MatchState) -> Result<Decision> {
        let mut script = self.script.lock().map_err(|_| RuntimeError::Provider {
            provider: "scripted",
            reason: "script lock poisoned".into(),
        })?;
        Ok(script.pop_front().unwrap_or(Decision::EndTurn))
    }

    async fn chain_after_single(&self, _side: Side, _state: &MatchState) -> bool {
        self.remaining() > 0
    }
}
