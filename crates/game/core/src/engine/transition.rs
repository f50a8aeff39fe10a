//! Action transition dispatch and execution logic.

use crate::action::combat::ensure_turn;
use crate::action::{
    Action, ActionError, ActionResult, ActionSequence, ActionTransition, CombatAction, PlannedAction,
    SequenceReport, SystemActionKind,
};
use crate::state::{MatchState, Phase};

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the match state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut MatchState,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes an action to its transition. Mutates `state` in place; the engine
/// hands in a working copy and decides whether to commit it.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut MatchState,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::Combat(combat) => execute_combat(combat, state),
        Action::System { kind } => execute_system(kind, state),
        Action::Planned(planned) => execute_planned(planned, state),
        Action::Sequence(sequence) => execute_sequence(sequence, state).map(ActionResult::Sequence),
    }
}

fn execute_combat(action: &CombatAction, state: &mut MatchState) -> Result<ActionResult, ExecuteError> {
    match action {
        CombatAction::Deploy(transition) => {
            let cost = drive_transition(transition, state).map_err(ExecuteError::Deploy)?;
            Ok(ActionResult::Deployed { cost })
        }
        CombatAction::Attack(transition) => {
            let outcome = drive_transition(transition, state).map_err(ExecuteError::Attack)?;
            Ok(ActionResult::Attack(outcome))
        }
        CombatAction::UseTool(transition) => {
            let outcome = drive_transition(transition, state).map_err(ExecuteError::UseTool)?;
            Ok(ActionResult::Item(outcome))
        }
        CombatAction::UseSpell(transition) => {
            let outcome = drive_transition(transition, state).map_err(ExecuteError::UseSpell)?;
            Ok(ActionResult::Item(outcome))
        }
        CombatAction::Defend(transition) => {
            drive_transition(transition, state).map_err(ExecuteError::Defend)?;
            Ok(ActionResult::Defended)
        }
    }
}

fn execute_system(
    kind: &SystemActionKind,
    state: &mut MatchState,
) -> Result<ActionResult, ExecuteError> {
    match kind {
        SystemActionKind::StartBattle(transition) => {
            drive_transition(transition, state).map_err(ExecuteError::StartBattle)?;
            Ok(ActionResult::Done)
        }
        SystemActionKind::DrawCard(transition) => {
            let id = drive_transition(transition, state).map_err(ExecuteError::DrawCard)?;
            Ok(ActionResult::Drew(id))
        }
        SystemActionKind::RegenerateEnergy(transition) => {
            let report =
                drive_transition(transition, state).map_err(ExecuteError::RegenerateEnergy)?;
            Ok(ActionResult::Regenerated(report))
        }
        SystemActionKind::ApplyEnergyDecay(transition) => {
            let amount =
                drive_transition(transition, state).map_err(ExecuteError::ApplyEnergyDecay)?;
            Ok(ActionResult::Decayed { amount })
        }
        SystemActionKind::SetActiveSide(transition) => {
            drive_transition(transition, state).map_err(ExecuteError::SetActiveSide)?;
            Ok(ActionResult::Done)
        }
        SystemActionKind::IncrementTurn(transition) => {
            let turn = drive_transition(transition, state).map_err(ExecuteError::IncrementTurn)?;
            Ok(ActionResult::TurnAdvanced { turn })
        }
        SystemActionKind::ApplyOngoingEffects(transition) => {
            let removed =
                drive_transition(transition, state).map_err(ExecuteError::ApplyOngoingEffects)?;
            Ok(ActionResult::EffectsApplied { removed })
        }
        SystemActionKind::AddLog(transition) => match drive_transition(transition, state) {
            Ok(()) => Ok(ActionResult::Done),
            Err(never) => match never.error {},
        },
        SystemActionKind::ComboBonus(transition) => {
            let boosted = drive_transition(transition, state).map_err(ExecuteError::ComboBonus)?;
            Ok(ActionResult::ComboBonus { boosted })
        }
        SystemActionKind::Reset(transition) => {
            drive_transition(transition, state).map_err(ExecuteError::Reset)?;
            Ok(ActionResult::Done)
        }
    }
}

/// Runs one planned step on a scratch copy, committing it on success.
/// A failing step is logged and reported as skipped.
fn replay_step(step: &PlannedAction, state: &mut MatchState) -> bool {
    let mut scratch = state.clone();
    match execute_combat(&step.action, &mut scratch) {
        Ok(_) => {
            *state = scratch;
            state.resolve_outcome();
            true
        }
        Err(error) => {
            let side = step.side();
            state.push_log(
                Some(side),
                format!(
                    "{} skipped {}: {}",
                    side.label(),
                    step.action.as_snake_case(),
                    error
                ),
            );
            false
        }
    }
}

fn execute_planned(planned: &PlannedAction, state: &mut MatchState) -> Result<ActionResult, ExecuteError> {
    ensure_turn(state, planned.side())
        .map_err(|error| ExecuteError::Plan(TransitionPhaseError::new(TransitionPhase::PreValidate, error)))?;

    if replay_step(planned, state) {
        Ok(ActionResult::Done)
    } else {
        Ok(ActionResult::Skipped)
    }
}

/// Replays a plan step by step against the live state.
///
/// Steps that became illegal (energy spent by an earlier step, target
/// already defeated, field filled) are skipped. Once the battle ends the
/// remaining steps are dropped.
pub(super) fn execute_sequence(
    sequence: &ActionSequence,
    state: &mut MatchState,
) -> Result<SequenceReport, ExecuteError> {
    ensure_turn(state, sequence.side)
        .map_err(|error| ExecuteError::Plan(TransitionPhaseError::new(TransitionPhase::PreValidate, error)))?;

    let mut report = SequenceReport::default();
    for (index, step) in sequence.steps.iter().enumerate() {
        if state.phase != Phase::Battle {
            report.dropped = sequence.steps.len() - index;
            break;
        }
        if step.side() != sequence.side {
            let error = ActionError::StepSideMismatch {
                expected: sequence.side,
                found: step.side(),
            };
            state.push_log(
                Some(sequence.side),
                format!(
                    "{} skipped {}: {}",
                    sequence.side.label(),
                    step.action.as_snake_case(),
                    error
                ),
            );
            report.skipped += 1;
            continue;
        }
        if replay_step(step, state) {
            report.applied += 1;
        } else {
            report.skipped += 1;
        }
    }
    Ok(report)
}
