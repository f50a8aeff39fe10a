//! System actions that drive the match lifecycle.
//!
//! These transitions are issued by the turn orchestrator and the runtime
//! rather than by a side. They go through the same pre-validate / apply /
//! post-validate pipeline as combat actions, so every bookkeeping step
//! (draws, regeneration, decay, side switches, effect ticks) is logged and
//! checked like any other state change.

mod combo;
mod effects;
mod energy;
mod log;
mod setup;
mod turn;

pub use combo::ComboBonusAction;
pub use effects::ApplyOngoingEffectsAction;
pub use energy::{ApplyEnergyDecayAction, RegenerateEnergyAction};
pub use log::AddLogAction;
pub use setup::{Loadout, ResetAction, StartBattleAction};
pub use turn::{DrawCardAction, IncrementTurnAction, SetActiveSideAction};

use crate::state::{MatchState, Phase};

use super::error::SystemActionError;

/// Bookkeeping steps only run while a battle is in progress.
pub(crate) fn ensure_battle(state: &MatchState) -> Result<(), SystemActionError> {
    if state.phase != Phase::Battle {
        return Err(SystemActionError::wrong_phase(
            Phase::Battle,
            state.phase,
            state.turn,
        ));
    }
    Ok(())
}

/// Closed set of system transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SystemActionKind {
    StartBattle(StartBattleAction),
    DrawCard(DrawCardAction),
    RegenerateEnergy(RegenerateEnergyAction),
    ApplyEnergyDecay(ApplyEnergyDecayAction),
    SetActiveSide(SetActiveSideAction),
    IncrementTurn(IncrementTurnAction),
    ApplyOngoingEffects(ApplyOngoingEffectsAction),
    AddLog(AddLogAction),
    ComboBonus(ComboBonusAction),
    Reset(ResetAction),
}

impl SystemActionKind {
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Self::StartBattle(_) => "start_battle",
            Self::DrawCard(_) => "draw_card",
            Self::RegenerateEnergy(_) => "regenerate_energy",
            Self::ApplyEnergyDecay(_) => "apply_energy_decay",
            Self::SetActiveSide(_) => "set_active_side",
            Self::IncrementTurn(_) => "increment_turn",
            Self::ApplyOngoingEffects(_) => "apply_ongoing_effects",
            Self::AddLog(_) => "add_log",
            Self::ComboBonus(_) => "combo_bonus",
            Self::Reset(_) => "reset",
        }
    }
}

macro_rules! impl_from_system {
    ($($variant:ident => $action:ty),* $(,)?) => {
        $(
            impl From<$action> for SystemActionKind {
                fn from(action: $action) -> Self {
                    Self::$variant(action)
                }
            }
        )*
    };
}

impl_from_system! {
    StartBattle => StartBattleAction,
    DrawCard => DrawCardAction,
    RegenerateEnergy => RegenerateEnergyAction,
    ApplyEnergyDecay => ApplyEnergyDecayAction,
    SetActiveSide => SetActiveSideAction,
    IncrementTurn => IncrementTurnAction,
    ApplyOngoingEffects => ApplyOngoingEffectsAction,
    AddLog => AddLogAction,
    ComboBonus => ComboBonusAction,
    Reset => ResetAction,
}
