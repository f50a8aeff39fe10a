//! Match transition pipeline.
//!
//! The [`BattleEngine`] is the authoritative reducer for [`MatchState`].
//! Every mutation, side actions and bookkeeping alike, goes through
//! [`BattleEngine::execute`]: the transition runs pre_validate → apply →
//! post_validate on a working copy, the outcome check and invariant check
//! run on that copy, and only then is it committed. A rejected action
//! leaves the state exactly as it was.

mod errors;
mod reducer;
mod transition;
mod turns;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use reducer::{record_rejection, reduce, try_reduce};
pub use turns::{TurnError, TurnReport};

use crate::action::{Action, ActionResult};
use crate::state::{LogEntry, MatchState, Outcome, Phase, check_invariants};

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Action-specific execution result.
    pub result: ActionResult,

    /// Log lines appended by this action, in order.
    pub new_entries: Vec<LogEntry>,

    pub phase_before: Phase,
    pub phase: Phase,
}

impl ExecutionOutcome {
    /// Returns the outcome if this action ended the battle.
    pub fn ended(&self) -> Option<Outcome> {
        if self.phase_before == self.phase {
            return None;
        }
        match self.phase {
            Phase::Victory => Some(Outcome::Victory),
            Phase::Defeat => Some(Outcome::Defeat),
            Phase::Setup | Phase::Battle => None,
        }
    }
}

/// Battle engine that validates, applies and commits transitions.
pub struct BattleEngine<'a> {
    state: &'a mut MatchState,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut MatchState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &MatchState {
        self.state
    }

    /// Executes an action atomically.
    ///
    /// After a successful transition the win/loss check runs (victory is
    /// checked first), followed by the structural invariants. Any failure
    /// discards the working copy.
    pub fn execute(&mut self, action: &Action) -> Result<ExecutionOutcome, ExecuteError> {
        let phase_before = self.state.phase;
        let log_before = self.state.log.len();

        let mut working = self.state.clone();
        let result = transition::execute_transition(action, &mut working)?;
        working.resolve_outcome();

        let violations = check_invariants(&working);
        if !violations.is_empty() {
            return Err(ExecuteError::InvariantViolated { violations });
        }

        let new_entries = working
            .log
            .get(log_before..)
            .map(<[LogEntry]>::to_vec)
            .unwrap_or_default();
        *self.state = working;

        Ok(ExecutionOutcome {
            result,
            new_entries,
            phase_before,
            phase: self.state.phase,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionError, AttackAction, DeployAction, Loadout, StartBattleAction};
    use crate::state::{
        BaseStats, BattleStats, Creature, CreatureId, Difficulty, DifficultyProfile, Side,
    };

    fn creature(id: u32, form_level: u32) -> Creature {
        Creature::new(
            CreatureId(id),
            format!("Mon{id}"),
            form_level,
            BaseStats::new(4, 4, 4, 4, 4),
            BattleStats {
                max_health: 30,
                physical_attack: 9,
                magical_attack: 5,
                physical_defense: 3,
                magical_defense: 3,
                initiative: 4,
                energy_cost: 0,
            },
        )
    }

    fn started() -> MatchState {
        let mut state = MatchState::default();
        let start = StartBattleAction::new(
            Difficulty::Medium,
            DifficultyProfile::default(),
            Loadout::new((1..=4).map(|id| creature(id, 0)).collect()),
            Loadout::new((100..=103).map(|id| creature(id, 1)).collect()),
        );
        BattleEngine::new(&mut state)
            .execute(&Action::system(start))
            .unwrap();
        state
    }

    #[test]
    fn start_battle_yields_no_outcome() {
        let state = started();
        assert_eq!(state.phase, Phase::Battle);
        assert_eq!(state.evaluate_outcome(), None);
    }

    #[test]
    fn scenario_a_deploy_form_zero() {
        let mut state = started();
        let outcome = BattleEngine::new(&mut state)
            .execute(&Action::combat(DeployAction::new(Side::Human, CreatureId(1))))
            .unwrap();

        assert_eq!(outcome.result, ActionResult::Deployed { cost: 5 });
        assert_eq!(state.human.energy, 5);
        assert_eq!(state.human.field.len(), 1);
        assert_eq!(state.human.hand.len(), 2);
        assert_eq!(outcome.new_entries.len(), 1);
    }

    #[test]
    fn scenario_b_rejection_leaves_state_untouched() {
        let mut state = started();
        state.active_side = Side::Opponent;
        state.opponent.field.push(creature(200, 0));
        state.human.field.push(creature(50, 0));
        state.opponent.energy = 1;
        let before = state.clone();

        let err = BattleEngine::new(&mut state)
            .execute(&Action::combat(AttackAction::new(
                Side::Opponent,
                CreatureId(200),
                CreatureId(50),
            )))
            .unwrap_err();
        assert!(matches!(
            err.action_error(),
            Some(ActionError::InsufficientEnergy {
                required: 2,
                available: 1,
                ..
            })
        ));
        assert_eq!(err.phase(), Some(TransitionPhase::PreValidate));
        assert_eq!(state, before);
    }

    #[test]
    fn invariant_violation_is_not_committed() {
        let mut state = started();
        state.human.energy = 40;
        let before = state.clone();
        let err = BattleEngine::new(&mut state)
            .execute(&Action::combat(DeployAction::new(Side::Human, CreatureId(1))))
            .unwrap_err();
        assert!(matches!(err, ExecuteError::InvariantViolated { .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn scenario_e_empty_human_is_defeat() {
        let mut state = started();
        state.human.hand.clear();
        state.human.deck.clear();
        state.human.field.push(creature(60, 0));
        state.human.field[0].current_health = 1;
        state.active_side = Side::Opponent;
        state.opponent.field.push(creature(100, 5));
        state.opponent.hand.retain(|c| c.id != CreatureId(100));
        state.opponent.field[0].stats.physical_attack = 50;

        let outcome = BattleEngine::new(&mut state)
            .execute(&Action::combat(AttackAction::new(
                Side::Opponent,
                CreatureId(100),
                CreatureId(60),
            )))
            .unwrap();
        assert_eq!(outcome.ended(), Some(Outcome::Defeat));
        assert_eq!(state.phase, Phase::Defeat);
        assert!(state.summary().is_some());
    }
}
