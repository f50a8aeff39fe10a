//! Energy regeneration and decay as logged transitions.

use crate::action::ActionTransition;
use crate::action::error::SystemActionError;
use crate::energy::{self, RegenReport};
use crate::state::{MatchState, Side};

use super::ensure_battle;

/// Start-of-turn regeneration for one side. The opponent also receives the
/// tier's regeneration bonus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenerateEnergyAction {
    pub side: Side,
}

impl RegenerateEnergyAction {
    pub fn new(side: Side) -> Self {
        Self { side }
    }
}

impl ActionTransition for RegenerateEnergyAction {
    type Error = SystemActionError;
    type Result = RegenReport;

    fn pre_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        ensure_battle(state)
    }

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        let tier_bonus = match self.side {
            Side::Human => 0,
            Side::Opponent => state.rules.energy_regen_bonus,
        };
        let report = energy::regenerate(state.side_mut(self.side), tier_bonus);

        let mut message = format!("{} gained +{} energy", self.side.label(), report.gained);
        let bonus = report.field_bonus + report.momentum_bonus;
        if bonus > 0 {
            message.push_str(&format!(
                " (field +{}, momentum +{})",
                report.field_bonus, report.momentum_bonus
            ));
        }
        state.push_log(Some(self.side), message);
        Ok(report)
    }
}

/// Anti-hoarding decay for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplyEnergyDecayAction {
    pub side: Side,
}

impl ApplyEnergyDecayAction {
    pub fn new(side: Side) -> Self {
        Self { side }
    }
}

impl ActionTransition for ApplyEnergyDecayAction {
    type Error = SystemActionError;
    type Result = u32;

    fn pre_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        ensure_battle(state)
    }

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        let lost = energy::decay(state.side_mut(self.side));
        if lost > 0 {
            state.push_log(
                Some(self.side),
                format!("{} lost {} energy to decay", self.side.label(), lost),
            );
        }
        Ok(lost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::state::{DifficultyProfile, Phase};

    fn battle() -> MatchState {
        let mut state = MatchState::default();
        state.phase = Phase::Battle;
        state
    }

    #[test]
    fn opponent_receives_tier_bonus() {
        let mut state = battle();
        state.rules = DifficultyProfile::new(5, 4, 3, 70, 8);
        state.human.energy = 5;
        state.opponent.energy = 5;

        RegenerateEnergyAction::new(Side::Human).apply(&mut state).unwrap();
        RegenerateEnergyAction::new(Side::Opponent).apply(&mut state).unwrap();
        assert_eq!(state.human.energy, 8);
        assert_eq!(state.opponent.energy, 11);
        assert_eq!(state.log.len(), 2);
    }

    #[test]
    fn negative_tier_bonus_reduces_regen() {
        let mut state = battle();
        state.rules = DifficultyProfile::new(3, 2, -2, 10, 5);
        state.opponent.energy = 0;
        RegenerateEnergyAction::new(Side::Opponent).apply(&mut state).unwrap();
        assert_eq!(state.opponent.energy, 1);
    }

    #[test]
    fn regen_is_capped() {
        let mut state = battle();
        state.human.energy = BattleConfig::MAX_ENERGY;
        let report = RegenerateEnergyAction::new(Side::Human).apply(&mut state).unwrap();
        assert_eq!(report.gained, 0);
        assert_eq!(state.human.energy, BattleConfig::MAX_ENERGY);
    }

    #[test]
    fn decay_is_silent_at_threshold() {
        let mut state = battle();
        state.human.energy = 10;
        assert_eq!(ApplyEnergyDecayAction::new(Side::Human).apply(&mut state).unwrap(), 0);
        assert!(state.log.is_empty());

        state.human.energy = 20;
        assert_eq!(ApplyEnergyDecayAction::new(Side::Human).apply(&mut state).unwrap(), 2);
        assert_eq!(state.human.energy, 18);
    }
}
