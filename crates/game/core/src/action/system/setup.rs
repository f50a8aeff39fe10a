//! Battle start and reset.

use std::collections::BTreeSet;

use crate::action::ActionTransition;
use crate::action::error::SystemActionError;
use crate::config::BattleConfig;
use crate::state::{Creature, Item, MatchState, Phase, Side, SideState};
use crate::state::{Difficulty, DifficultyProfile};

/// Creatures and consumables one side brings into a match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    /// Roster in draw order; the opening hand is taken from the front.
    pub roster: Vec<Creature>,
    pub tools: Vec<Item>,
    pub spells: Vec<Item>,
}

impl Loadout {
    pub fn new(roster: Vec<Creature>) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    pub fn with_items(mut self, tools: Vec<Item>, spells: Vec<Item>) -> Self {
        self.tools = tools;
        self.spells = spells;
        self
    }

    fn validate(&self, side: Side) -> Result<(), SystemActionError> {
        if self.roster.is_empty() {
            return Err(SystemActionError::empty_roster(side));
        }
        let mut seen = BTreeSet::new();
        for creature in &self.roster {
            if !seen.insert(creature.id) {
                return Err(SystemActionError::duplicate_creature(side, creature.id));
            }
        }
        Ok(())
    }

    /// Splits the roster into an opening hand and a deck.
    fn into_side(self, opening_hand: usize) -> SideState {
        let mut deck = self.roster;
        let hand_len = opening_hand.min(deck.len());
        let hand: Vec<Creature> = deck.drain(..hand_len).collect();
        SideState {
            deck,
            hand,
            field: Vec::new(),
            energy: BattleConfig::STARTING_ENERGY,
            tools: self.tools,
            spells: self.spells,
            consecutive_actions: 0,
            energy_momentum: 0,
            last_item_family: None,
        }
    }
}

/// Moves a match from setup into battle.
///
/// The human opening hand is `config.opening_hand_size` creatures (3 by
/// default); the opponent's is the tier's `initial_hand_size`. Both sides
/// start with empty fields and [`BattleConfig::STARTING_ENERGY`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartBattleAction {
    pub difficulty: Difficulty,
    pub rules: DifficultyProfile,
    pub human: Loadout,
    pub opponent: Loadout,
}

impl StartBattleAction {
    pub fn new(
        difficulty: Difficulty,
        rules: DifficultyProfile,
        human: Loadout,
        opponent: Loadout,
    ) -> Self {
        Self {
            difficulty,
            rules,
            human,
            opponent,
        }
    }
}

impl ActionTransition for StartBattleAction {
    type Error = SystemActionError;
    type Result = ();

    fn pre_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        if state.phase != Phase::Setup {
            return Err(SystemActionError::wrong_phase(
                Phase::Setup,
                state.phase,
                state.turn,
            ));
        }
        self.human.validate(Side::Human)?;
        self.opponent.validate(Side::Opponent)
    }

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        let log = std::mem::take(&mut state.log);
        let config = state.config.clone();

        let mut next = MatchState::new(self.difficulty, self.rules);
        next.config = config;
        next.log = log;
        next.opponent_roster_size = self.opponent.roster.len();

        next.human = self.human.clone().into_side(next.config.opening_hand_size);
        next.opponent = self
            .opponent
            .clone()
            .into_side(self.rules.initial_hand_size);
        next.phase = Phase::Battle;

        next.push_log(
            None,
            format!("Battle started! Difficulty: {}", self.difficulty),
        );
        let specials = self.opponent.tools.len() + self.opponent.spells.len();
        next.push_log(
            Some(Side::Human),
            format!("Your turn. The enemy has {specials} special items!"),
        );
        *state = next;
        Ok(())
    }
}

/// Returns the match to setup from any phase. The log is kept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResetAction;

impl ActionTransition for ResetAction {
    type Error = SystemActionError;
    type Result = ();

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        let log = std::mem::take(&mut state.log);
        let mut next = MatchState::new(state.difficulty, state.rules);
        next.config = state.config.clone();
        next.log = log;
        next.push_log(None, "Battle reset");
        *state = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BaseStats, BattleStats, CreatureId};

    fn roster(ids: impl IntoIterator<Item = u32>) -> Vec<Creature> {
        ids.into_iter()
            .map(|id| {
                Creature::new(
                    CreatureId(id),
                    format!("Mon{id}"),
                    0,
                    BaseStats::default(),
                    BattleStats {
                        max_health: 20,
                        ..BattleStats::default()
                    },
                )
            })
            .collect()
    }

    fn start(human: Vec<Creature>, opponent: Vec<Creature>) -> StartBattleAction {
        StartBattleAction::new(
            Difficulty::Hard,
            DifficultyProfile::new(4, 3, 2, 50, 7),
            Loadout::new(human),
            Loadout::new(opponent),
        )
    }

    #[test]
    fn splits_opening_hands_and_deck() {
        let mut state = MatchState::default();
        let action = start(roster(1..=5), roster(100..=101));
        action.pre_validate(&state).unwrap();
        action.apply(&mut state).unwrap();
        action.post_validate(&state).unwrap();

        assert_eq!(state.phase, Phase::Battle);
        assert_eq!(state.turn, 1);
        assert_eq!(state.active_side, Side::Human);
        assert_eq!(state.human.hand.len(), 3);
        assert_eq!(state.human.deck.len(), 2);
        assert_eq!(state.opponent.hand.len(), 2);
        assert!(state.opponent.deck.is_empty());
        assert_eq!(state.human.energy, BattleConfig::STARTING_ENERGY);
        assert_eq!(state.field_capacity(Side::Opponent), 4);
        assert_eq!(state.opponent_roster_size, 2);
        assert_eq!(state.difficulty, Difficulty::Hard);
    }

    #[test]
    fn rejects_empty_roster_and_duplicates() {
        let state = MatchState::default();
        assert!(matches!(
            start(roster(1..=2), Vec::new()).pre_validate(&state),
            Err(SystemActionError::EmptyRoster {
                side: Side::Opponent,
                ..
            })
        ));
        assert!(matches!(
            start(roster([1, 1]), roster([2])).pre_validate(&state),
            Err(SystemActionError::DuplicateCreature { .. })
        ));
    }

    #[test]
    fn only_starts_from_setup() {
        let mut state = MatchState::default();
        state.phase = Phase::Victory;
        assert!(matches!(
            start(roster([1]), roster([2])).pre_validate(&state),
            Err(SystemActionError::WrongPhase { .. })
        ));
    }

    #[test]
    fn reset_keeps_log_and_returns_to_setup() {
        let mut state = MatchState::default();
        start(roster([1]), roster([2])).apply(&mut state).unwrap();
        state.phase = Phase::Defeat;

        ResetAction.apply(&mut state).unwrap();
        assert_eq!(state.phase, Phase::Setup);
        assert!(state.human.hand.is_empty());
        assert_eq!(state.log.len(), 3);
        assert_eq!(state.log[2].message, "Battle reset");
        assert_eq!(state.difficulty, Difficulty::Hard);
    }
}
