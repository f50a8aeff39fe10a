//! Pure reducer facade over [`BattleEngine`].

use crate::action::Action;
use crate::state::MatchState;

use super::{BattleEngine, ExecuteError, ExecutionOutcome};

/// Applies `action` to a copy of `state`, surfacing the rejection reason.
pub fn try_reduce(
    state: &MatchState,
    action: &Action,
) -> Result<(MatchState, ExecutionOutcome), ExecuteError> {
    let mut next = state.clone();
    let outcome = BattleEngine::new(&mut next).execute(action)?;
    Ok((next, outcome))
}

/// Caller-facing reducer: always yields a state.
///
/// On rejection the input comes back unchanged apart from exactly one
/// appended log line describing why.
pub fn reduce(state: &MatchState, action: &Action) -> MatchState {
    match try_reduce(state, action) {
        Ok((next, _)) => next,
        Err(error) => {
            let mut next = state.clone();
            record_rejection(&mut next, action, &error);
            next
        }
    }
}

/// Appends the single log line describing why `action` was rejected.
pub fn record_rejection(state: &mut MatchState, action: &Action, error: &ExecuteError) {
    state.push_log(
        action.side(),
        format!("Rejected {}: {}", action.as_snake_case(), error),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{DeployAction, ResetAction};
    use crate::state::{CreatureId, Phase, Side};

    #[test]
    fn rejection_appends_single_log_line() {
        let state = MatchState::default();
        let action = Action::combat(DeployAction::new(Side::Human, CreatureId(1)));
        let next = reduce(&state, &action);

        assert_eq!(next.log.len(), 1);
        assert!(next.log[0].message.starts_with("Rejected deploy"));
        let mut expected = next.clone();
        expected.log.clear();
        assert_eq!(expected, state);
    }

    #[test]
    fn reset_is_allowed_from_any_phase() {
        let mut state = MatchState::default();
        state.phase = Phase::Victory;
        let next = reduce(&state, &Action::system(ResetAction));
        assert_eq!(next.phase, Phase::Setup);
    }
}
