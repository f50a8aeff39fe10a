//! Action domain: the closed set of match transitions.
//!
//! # Module Structure
//!
//! - `transition`: the [`ActionTransition`] pre-validate / apply / post-validate contract
//! - `combat`: side-issued actions (deploy, attack, tool, spell, defend)
//! - `system`: lifecycle and bookkeeping (start, draw, regen, decay, switch, ...)
//! - `planned`: AI plans replayed with per-step re-validation
//! - `error`: `ActionError` and `SystemActionError`
//! - `types`: `ActionResult`

pub mod combat;
pub mod error;
pub mod planned;
pub mod system;
pub mod transition;
pub mod types;

pub use combat::{
    AttackAction, AttackOutcome, CombatAction, DefendAction, DeployAction, ItemOutcome,
    UseSpellAction, UseToolAction,
};
pub use error::{ActionError, SystemActionError};
pub use planned::{ActionSequence, PlannedAction, SequenceReport};
pub use system::{
    AddLogAction, ApplyEnergyDecayAction, ApplyOngoingEffectsAction, ComboBonusAction,
    DrawCardAction, IncrementTurnAction, Loadout, RegenerateEnergyAction, ResetAction,
    SetActiveSideAction, StartBattleAction, SystemActionKind,
};
pub use transition::ActionTransition;
pub use types::ActionResult;

use crate::state::Side;

/// Top-level action consumed by [`crate::engine::BattleEngine::execute`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// A side-issued action, validated strictly.
    Combat(CombatAction),

    /// Lifecycle and bookkeeping transitions.
    System { kind: SystemActionKind },

    /// One AI-planned step; skipped rather than rejected when it became illegal.
    Planned(PlannedAction),

    /// Ordered AI-planned steps replayed in a loop.
    Sequence(ActionSequence),
}

impl Action {
    pub fn combat(action: impl Into<CombatAction>) -> Self {
        Self::Combat(action.into())
    }

    pub fn system(kind: impl Into<SystemActionKind>) -> Self {
        Self::System { kind: kind.into() }
    }

    /// Side issuing the action; `None` for system transitions.
    pub fn side(&self) -> Option<Side> {
        match self {
            Action::Combat(action) => Some(action.side()),
            Action::Planned(planned) => Some(planned.side()),
            Action::Sequence(sequence) => Some(sequence.side),
            Action::System { .. } => None,
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Action::System { .. })
    }

    /// Returns the snake_case name used for logging and tracing fields.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::Combat(action) => action.as_snake_case(),
            Action::System { kind } => kind.as_snake_case(),
            Action::Planned(planned) => planned.action.as_snake_case(),
            Action::Sequence(_) => "sequence",
        }
    }
}

impl From<CombatAction> for Action {
    fn from(action: CombatAction) -> Self {
        Self::Combat(action)
    }
}

impl From<SystemActionKind> for Action {
    fn from(kind: SystemActionKind) -> Self {
        Self::System { kind }
    }
}

impl From<PlannedAction> for Action {
    fn from(planned: PlannedAction) -> Self {
        Self::Planned(planned)
    }
}

impl From<ActionSequence> for Action {
    fn from(sequence: ActionSequence) -> Self {
        Self::Sequence(sequence)
    }
}
