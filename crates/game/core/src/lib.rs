//! Deterministic battle rules shared by the runtime and offline tools.
//!
//! `arena-core` defines the canonical rules (match state, actions, energy
//! economy, effect resolution, turn orchestration) and exposes pure APIs.
//! All state mutation flows through [`engine::BattleEngine`]; nothing here
//! performs I/O or panics on bad input.
pub mod action;
pub mod combat;
pub mod config;
pub mod effects;
pub mod energy;
pub mod engine;
pub mod error;
pub mod state;

pub use action::{
    Action, ActionError, ActionResult, ActionSequence, ActionTransition, AddLogAction,
    ApplyEnergyDecayAction, ApplyOngoingEffectsAction, AttackAction, AttackOutcome,
    CombatAction, ComboBonusAction, DefendAction, DeployAction, DrawCardAction,
    IncrementTurnAction, ItemOutcome, Loadout, PlannedAction, RegenerateEnergyAction,
    ResetAction, SequenceReport, SetActiveSideAction, StartBattleAction, SystemActionError,
    SystemActionKind, UseSpellAction, UseToolAction,
};
pub use combat::ItemDataError;
pub use config::BattleConfig;
pub use energy::{CostKind, RegenReport, action_cost};
pub use engine::{
    BattleEngine, ExecuteError, ExecutionOutcome, TransitionPhase, TransitionPhaseError,
    TurnError, TurnReport, record_rejection, reduce, try_reduce,
};
pub use error::{BattleError, ErrorContext, ErrorKind, ErrorSeverity};
pub use state::{
    ActiveEffects, AttackKind, BaseStats, BattleStats, BattleSummary, Creature, CreatureId,
    CreatureRef, Difficulty, DifficultyProfile, Effect, EffectFamily, EffectKind,
    InvariantViolation, Item, ItemCategory, ItemId, ItemType, LogEntry, MatchState, Outcome,
    Phase, Rarity, Side, SideState, StatDeltas, StatKind, Zone, check_invariants,
};
