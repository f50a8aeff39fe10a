//! Action execution errors.
//!
//! Every variant here is an illegal transition: the engine discards the
//! working copy and the match stays in its last valid state.

use crate::error::{BattleError, ErrorContext, ErrorSeverity};
use crate::state::{CreatureId, CreatureRef, ItemId, Phase, Side};

// ============================================================================
// Combat Action Errors
// ============================================================================

/// Errors that can occur while validating or applying a combat action.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("battle is not in progress (phase: {phase})")]
    NotInBattle { phase: Phase },

    #[error("it is not the {side} side's turn (active: {active})")]
    NotActiveSide { side: Side, active: Side },

    #[error("{side} needs {required} energy but has {available}")]
    InsufficientEnergy {
        side: Side,
        required: u32,
        available: u32,
    },

    #[error("{side} field is full ({capacity} creatures)")]
    FieldFull { side: Side, capacity: usize },

    #[error("creature {id} is already deployed")]
    DuplicateDeployment { id: CreatureId },

    #[error("creature {id} is not in the {side} hand")]
    NotInHand { side: Side, id: CreatureId },

    #[error("creature {creature} is not on the field")]
    NotOnField { creature: CreatureRef },

    #[error("{side} has no item {item}")]
    ItemNotFound { side: Side, item: ItemId },

    #[error("sequence step belongs to {found}, expected {expected}")]
    StepSideMismatch { expected: Side, found: Side },
}

impl BattleError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            NotInBattle { .. } | NotActiveSide { .. } => ErrorSeverity::Recoverable,
            InsufficientEnergy { .. } | FieldFull { .. } => ErrorSeverity::Recoverable,
            DuplicateDeployment { .. } | NotInHand { .. } | NotOnField { .. } => {
                ErrorSeverity::Validation
            }
            ItemNotFound { .. } | StepSideMismatch { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            NotInBattle { .. } => "ACTION_NOT_IN_BATTLE",
            NotActiveSide { .. } => "ACTION_NOT_ACTIVE_SIDE",
            InsufficientEnergy { .. } => "ACTION_INSUFFICIENT_ENERGY",
            FieldFull { .. } => "ACTION_FIELD_FULL",
            DuplicateDeployment { .. } => "ACTION_DUPLICATE_DEPLOYMENT",
            NotInHand { .. } => "ACTION_NOT_IN_HAND",
            NotOnField { .. } => "ACTION_NOT_ON_FIELD",
            ItemNotFound { .. } => "ACTION_ITEM_NOT_FOUND",
            StepSideMismatch { .. } => "ACTION_STEP_SIDE_MISMATCH",
        }
    }
}

// ============================================================================
// System Action Errors
// ============================================================================

/// Errors raised by system (bookkeeping) actions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SystemActionError {
    #[error("expected phase {expected}, found {found}")]
    WrongPhase {
        expected: Phase,
        found: Phase,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("{side} roster is empty")]
    EmptyRoster {
        side: Side,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("{side} roster lists creature {id} more than once")]
    DuplicateCreature {
        side: Side,
        id: CreatureId,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("{side} hand is at its cap")]
    HandFull {
        side: Side,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("{side} deck is empty")]
    DeckEmpty {
        side: Side,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("{side} streak {streak} is below the combo threshold")]
    ComboBelowThreshold {
        side: Side,
        streak: u32,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("{side} is already the active side")]
    AlreadyActive {
        side: Side,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("combo counters were not reset on side switch")]
    ComboNotReset {
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    #[error("creature {id} kept an expired effect after the tick")]
    ExpiredEffectKept {
        id: CreatureId,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },
}

impl SystemActionError {
    pub fn wrong_phase(expected: Phase, found: Phase, turn: u32) -> Self {
        Self::WrongPhase {
            expected,
            found,
            context: ErrorContext::new(turn).with_message("system action issued in wrong phase"),
        }
    }

    pub fn empty_roster(side: Side) -> Self {
        Self::EmptyRoster {
            side,
            context: ErrorContext::new(0).with_side(side),
        }
    }

    pub fn duplicate_creature(side: Side, id: CreatureId) -> Self {
        Self::DuplicateCreature {
            side,
            id,
            context: ErrorContext::new(0)
                .with_side(side)
                .with_message("creature ids must be unique per side"),
        }
    }

    pub fn hand_full(side: Side, turn: u32) -> Self {
        Self::HandFull {
            side,
            context: ErrorContext::new(turn).with_side(side),
        }
    }

    pub fn deck_empty(side: Side, turn: u32) -> Self {
        Self::DeckEmpty {
            side,
            context: ErrorContext::new(turn).with_side(side),
        }
    }

    pub fn combo_below_threshold(side: Side, streak: u32, turn: u32) -> Self {
        Self::ComboBelowThreshold {
            side,
            streak,
            context: ErrorContext::new(turn).with_side(side),
        }
    }

    pub fn already_active(side: Side, turn: u32) -> Self {
        Self::AlreadyActive {
            side,
            context: ErrorContext::new(turn).with_side(side),
        }
    }

    pub fn combo_not_reset(turn: u32) -> Self {
        Self::ComboNotReset {
            context: ErrorContext::new(turn).with_message("side switch left a combo counter set"),
        }
    }

    pub fn expired_effect_kept(side: Side, id: CreatureId, turn: u32) -> Self {
        Self::ExpiredEffectKept {
            id,
            context: ErrorContext::new(turn).with_side(side),
        }
    }
}

impl BattleError for SystemActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::WrongPhase { .. } => ErrorSeverity::Recoverable,
            Self::EmptyRoster { .. } | Self::DuplicateCreature { .. } => ErrorSeverity::Validation,
            Self::HandFull { .. } | Self::DeckEmpty { .. } => ErrorSeverity::Recoverable,
            Self::ComboBelowThreshold { .. } | Self::AlreadyActive { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::ComboNotReset { .. } | Self::ExpiredEffectKept { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::WrongPhase { context, .. }
            | Self::EmptyRoster { context, .. }
            | Self::DuplicateCreature { context, .. }
            | Self::HandFull { context, .. }
            | Self::DeckEmpty { context, .. }
            | Self::ComboBelowThreshold { context, .. }
            | Self::AlreadyActive { context, .. }
            | Self::ExpiredEffectKept { context, .. }
            | Self::ComboNotReset { context } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WrongPhase { .. } => "SYSTEM_WRONG_PHASE",
            Self::EmptyRoster { .. } => "SYSTEM_EMPTY_ROSTER",
            Self::DuplicateCreature { .. } => "SYSTEM_DUPLICATE_CREATURE",
            Self::HandFull { .. } => "SYSTEM_HAND_FULL",
            Self::DeckEmpty { .. } => "SYSTEM_DECK_EMPTY",
            Self::ComboBelowThreshold { .. } => "SYSTEM_COMBO_BELOW_THRESHOLD",
            Self::AlreadyActive { .. } => "SYSTEM_ALREADY_ACTIVE",
            Self::ComboNotReset { .. } => "SYSTEM_COMBO_NOT_RESET",
            Self::ExpiredEffectKept { .. } => "SYSTEM_EXPIRED_EFFECT_KEPT",
        }
    }
}
