use crate::action::ActionTransition;
use crate::action::error::SystemActionError;
use crate::effects::tick_field;
use crate::state::{MatchState, Side};

use super::ensure_battle;

/// Ticks every active effect on both fields and removes creatures the
/// effects defeated. Returns the number of creatures removed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplyOngoingEffectsAction;

impl ActionTransition for ApplyOngoingEffectsAction {
    type Error = SystemActionError;
    type Result = usize;

    fn pre_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        ensure_battle(state)
    }

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        let mut removed = 0;
        for side in [Side::Human, Side::Opponent] {
            let ticked = tick_field(&state.side(side).field);
            removed += ticked.fallen.len();
            state.side_mut(side).field = ticked.survivors;
            for line in ticked.lines {
                state.push_log(Some(side), line);
            }
        }
        Ok(removed)
    }

    fn post_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        for side in [Side::Human, Side::Opponent] {
            if let Some(stale) = state
                .side(side)
                .field
                .iter()
                .find(|c| c.active_effects.iter().any(|e| e.duration == 0))
            {
                return Err(SystemActionError::expired_effect_kept(
                    side, stale.id, state.turn,
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        BaseStats, BattleStats, Creature, CreatureId, Effect, Phase, StatDeltas,
    };

    fn creature(id: u32, health: i32) -> Creature {
        let mut creature = Creature::new(
            CreatureId(id),
            "Sprout",
            0,
            BaseStats::default(),
            BattleStats {
                max_health: 50,
                ..BattleStats::default()
            },
        );
        creature.current_health = health;
        creature
    }

    #[test]
    fn removes_creatures_killed_by_effects() {
        let mut state = MatchState::default();
        state.phase = Phase::Battle;

        let mut doomed = creature(1, 3);
        doomed
            .active_effects
            .push(Effect::new("Poison", StatDeltas::new(), -5, 2));
        state.human.field.push(doomed);
        state.opponent.field.push(creature(2, 50));

        let removed = ApplyOngoingEffectsAction.apply(&mut state).unwrap();
        assert_eq!(removed, 1);
        assert!(state.human.field.is_empty());
        assert_eq!(state.opponent.field.len(), 1);
        assert!(
            state
                .log
                .iter()
                .any(|l| l.message.contains("defeated by ongoing effects"))
        );
        ApplyOngoingEffectsAction.post_validate(&state).unwrap();
    }

    #[test]
    fn zero_duration_effect_fails_validation() {
        let mut state = MatchState::default();
        state.phase = Phase::Battle;
        let mut stale = creature(7, 30);
        stale
            .active_effects
            .push(Effect::new("Spent", StatDeltas::new(), 0, 0));
        state.opponent.field.push(stale);

        assert!(matches!(
            ApplyOngoingEffectsAction.post_validate(&state),
            Err(SystemActionError::ExpiredEffectKept { id: CreatureId(7), .. })
        ));
    }
}
