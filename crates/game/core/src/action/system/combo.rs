use crate::action::ActionTransition;
use crate::action::error::SystemActionError;
use crate::config::BattleConfig;
use crate::state::{MatchState, Side, StatKind};

use super::ensure_battle;

/// Rewards a streak of at least [`BattleConfig::COMBO_THRESHOLD`] actions
/// with +2 physical and magical attack on every fielded creature of `side`.
///
/// `streak` is supplied by the caller because the opponent's counter is
/// already reset by the time its bonus is granted. The counter itself is
/// left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboBonusAction {
    pub side: Side,
    pub streak: u32,
}

impl ComboBonusAction {
    pub fn new(side: Side, streak: u32) -> Self {
        Self { side, streak }
    }
}

impl ActionTransition for ComboBonusAction {
    type Error = SystemActionError;
    type Result = usize;

    fn pre_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        ensure_battle(state)?;
        if self.streak < BattleConfig::COMBO_THRESHOLD {
            return Err(SystemActionError::combo_below_threshold(
                self.side,
                self.streak,
                state.turn,
            ));
        }
        Ok(())
    }

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        let bonus = BattleConfig::COMBO_ATTACK_BONUS;
        let field = &mut state.side_mut(self.side).field;
        for creature in field.iter_mut() {
            creature.add_stat(StatKind::PhysicalAttack, bonus);
            creature.add_stat(StatKind::MagicalAttack, bonus);
        }
        let boosted = field.len();

        state.push_log(
            Some(self.side),
            format!(
                "{} combo bonus! {}-action streak grants +{} attack to {} creature(s)",
                self.side.label(),
                self.streak,
                bonus,
                boosted
            ),
        );
        Ok(boosted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BaseStats, BattleStats, Creature, CreatureId, Phase};

    #[test]
    fn boosts_field_without_resetting_counter() {
        let mut state = MatchState::default();
        state.phase = Phase::Battle;
        state.human.consecutive_actions = 3;
        state.human.field.push(Creature::new(
            CreatureId(1),
            "Ember",
            0,
            BaseStats::default(),
            BattleStats {
                max_health: 10,
                physical_attack: 4,
                magical_attack: 1,
                ..BattleStats::default()
            },
        ));

        let action = ComboBonusAction::new(Side::Human, 3);
        action.pre_validate(&state).unwrap();
        assert_eq!(action.apply(&mut state).unwrap(), 1);

        let creature = &state.human.field[0];
        assert_eq!(creature.stats.physical_attack, 6);
        assert_eq!(creature.stats.magical_attack, 3);
        assert_eq!(state.human.consecutive_actions, 3);
    }

    #[test]
    fn short_streak_is_rejected() {
        let mut state = MatchState::default();
        state.phase = Phase::Battle;
        assert!(matches!(
            ComboBonusAction::new(Side::Opponent, 2).pre_validate(&state),
            Err(SystemActionError::ComboBelowThreshold { streak: 2, .. })
        ));
    }
}
