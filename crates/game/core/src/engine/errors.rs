//! Error types for the action execution pipeline.

use crate::action::{
    ActionTransition, ApplyEnergyDecayAction, ApplyOngoingEffectsAction, AttackAction,
    ComboBonusAction, DefendAction, DeployAction, DrawCardAction, IncrementTurnAction,
    RegenerateEnergyAction, ResetAction, SetActiveSideAction, StartBattleAction, UseSpellAction,
    UseToolAction,
};
use crate::action::ActionError;
use crate::error::{BattleError, ErrorContext, ErrorSeverity};
use crate::state::InvariantViolation;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

type PhaseError<T> = TransitionPhaseError<<T as ActionTransition>::Error>;

/// Errors surfaced while executing an action through the battle engine.
///
/// A returned error always means the engine committed nothing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("deploy rejected: {0}")]
    Deploy(PhaseError<DeployAction>),

    #[error("attack rejected: {0}")]
    Attack(PhaseError<AttackAction>),

    #[error("tool use rejected: {0}")]
    UseTool(PhaseError<UseToolAction>),

    #[error("spell cast rejected: {0}")]
    UseSpell(PhaseError<UseSpellAction>),

    #[error("defend rejected: {0}")]
    Defend(PhaseError<DefendAction>),

    /// The plan as a whole cannot run (wrong phase or wrong side).
    #[error("plan rejected: {0}")]
    Plan(TransitionPhaseError<ActionError>),

    #[error("start battle rejected: {0}")]
    StartBattle(PhaseError<StartBattleAction>),

    #[error("draw rejected: {0}")]
    DrawCard(PhaseError<DrawCardAction>),

    #[error("regeneration rejected: {0}")]
    RegenerateEnergy(PhaseError<RegenerateEnergyAction>),

    #[error("decay rejected: {0}")]
    ApplyEnergyDecay(PhaseError<ApplyEnergyDecayAction>),

    #[error("side switch rejected: {0}")]
    SetActiveSide(PhaseError<SetActiveSideAction>),

    #[error("turn increment rejected: {0}")]
    IncrementTurn(PhaseError<IncrementTurnAction>),

    #[error("effect pass rejected: {0}")]
    ApplyOngoingEffects(PhaseError<ApplyOngoingEffectsAction>),

    #[error("combo bonus rejected: {0}")]
    ComboBonus(PhaseError<ComboBonusAction>),

    #[error("reset rejected: {0}")]
    Reset(PhaseError<ResetAction>),

    #[error("transition broke {} invariant(s): {}", .violations.len(), .violations.first().map(ToString::to_string).unwrap_or_default())]
    InvariantViolated { violations: Vec<InvariantViolation> },
}

impl ExecuteError {
    /// Pipeline phase that failed, if the failure came from a transition.
    pub fn phase(&self) -> Option<TransitionPhase> {
        use ExecuteError::*;
        match self {
            Deploy(e) | Attack(e) | UseTool(e) | UseSpell(e) | Defend(e) | Plan(e) => Some(e.phase),
            StartBattle(e) | DrawCard(e) | RegenerateEnergy(e) | ApplyEnergyDecay(e)
            | SetActiveSide(e) | IncrementTurn(e) | ApplyOngoingEffects(e) | ComboBonus(e)
            | Reset(e) => Some(e.phase),
            InvariantViolated { .. } => None,
        }
    }

    /// Underlying combat rejection, if any.
    pub fn action_error(&self) -> Option<&ActionError> {
        use ExecuteError::*;
        match self {
            Deploy(e) | Attack(e) | UseTool(e) | UseSpell(e) | Defend(e) | Plan(e) => {
                Some(&e.error)
            }
            _ => None,
        }
    }
}

impl BattleError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        use ExecuteError::*;
        match self {
            Deploy(e) | Attack(e) | UseTool(e) | UseSpell(e) | Defend(e) | Plan(e) => {
                e.error.severity()
            }
            StartBattle(e) | DrawCard(e) | RegenerateEnergy(e) | ApplyEnergyDecay(e)
            | SetActiveSide(e) | IncrementTurn(e) | ApplyOngoingEffects(e) | ComboBonus(e)
            | Reset(e) => e.error.severity(),
            InvariantViolated { .. } => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        use ExecuteError::*;
        match self {
            StartBattle(e) | DrawCard(e) | RegenerateEnergy(e) | ApplyEnergyDecay(e)
            | SetActiveSide(e) | IncrementTurn(e) | ApplyOngoingEffects(e) | ComboBonus(e)
            | Reset(e) => e.error.context(),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        use ExecuteError::*;
        match self {
            Deploy(e) | Attack(e) | UseTool(e) | UseSpell(e) | Defend(e) | Plan(e) => {
                e.error.error_code()
            }
            StartBattle(e) | DrawCard(e) | RegenerateEnergy(e) | ApplyEnergyDecay(e)
            | SetActiveSide(e) | IncrementTurn(e) | ApplyOngoingEffects(e) | ComboBonus(e)
            | Reset(e) => e.error.error_code(),
            InvariantViolated { .. } => "ENGINE_INVARIANT_VIOLATED",
        }
    }
}
