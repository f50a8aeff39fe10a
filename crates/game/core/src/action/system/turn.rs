//! Turn bookkeeping: side switches, turn counter and card draws.

use crate::action::ActionTransition;
use crate::action::error::SystemActionError;
use crate::state::{CreatureId, MatchState, Side};

use super::ensure_battle;

/// Hands the turn to `side`.
///
/// Switching resets both combo counters and the item-synergy memory of
/// both sides. Setting the side that is already active is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetActiveSideAction {
    pub side: Side,
}

impl SetActiveSideAction {
    pub fn new(side: Side) -> Self {
        Self { side }
    }
}

impl ActionTransition for SetActiveSideAction {
    type Error = SystemActionError;
    type Result = ();

    fn pre_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        ensure_battle(state)?;
        if state.active_side == self.side {
            return Err(SystemActionError::already_active(self.side, state.turn));
        }
        Ok(())
    }

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        state.active_side = self.side;
        for side in [Side::Human, Side::Opponent] {
            let side = state.side_mut(side);
            side.consecutive_actions = 0;
            side.last_item_family = None;
        }
        Ok(())
    }

    fn post_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        if state.human.consecutive_actions != 0 || state.opponent.consecutive_actions != 0 {
            return Err(SystemActionError::combo_not_reset(state.turn));
        }
        Ok(())
    }
}

/// Advances the turn counter after the opponent finishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncrementTurnAction;

impl ActionTransition for IncrementTurnAction {
    type Error = SystemActionError;
    type Result = u32;

    fn pre_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        ensure_battle(state)
    }

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        state.turn = state.turn.saturating_add(1);
        Ok(state.turn)
    }
}

/// Moves the front of a side's deck into its hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DrawCardAction {
    pub side: Side,
}

impl DrawCardAction {
    pub fn new(side: Side) -> Self {
        Self { side }
    }
}

impl ActionTransition for DrawCardAction {
    type Error = SystemActionError;
    type Result = CreatureId;

    fn pre_validate(&self, state: &MatchState) -> Result<(), Self::Error> {
        ensure_battle(state)?;
        let side = state.side(self.side);
        if side.deck.is_empty() {
            return Err(SystemActionError::deck_empty(self.side, state.turn));
        }
        if side.hand.len() >= state.hand_cap(self.side) {
            return Err(SystemActionError::hand_full(self.side, state.turn));
        }
        Ok(())
    }

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        let turn = state.turn;
        let side = state.side_mut(self.side);
        if side.deck.is_empty() {
            return Err(SystemActionError::deck_empty(self.side, turn));
        }
        let drawn = side.deck.remove(0);
        let id = drawn.id;
        let message = match self.side {
            Side::Human => format!("You drew {}", drawn.species),
            Side::Opponent => "Enemy drew a creature".to_string(),
        };
        side.hand.push(drawn);
        state.push_log(Some(self.side), message);
        Ok(id)
    }
}
