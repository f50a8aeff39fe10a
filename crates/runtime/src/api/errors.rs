//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, rejected transitions and action
//! providers so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use arena_core::{BattleError, ExecuteError, Side, TurnError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{side} action provider not set")]
    ProviderNotSet { side: Side },

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Rejected(#[from] ExecuteError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("no battle in progress")]
    NotInBattle,

    #[error("battle still running after {turns} turns")]
    TurnLimit { turns: u32 },

    #[error("{provider} provider failed: {reason}")]
    Provider {
        provider: &'static str,
        reason: String,
    },
}

impl RuntimeError {
    /// True when the error is a rule rejection the caller can recover from
    /// by choosing another action.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Rejected(error) => error.severity().is_recoverable(),
            Self::Turn(error) => error.severity().is_recoverable(),
            Self::NotInBattle => true,
            _ => false,
        }
    }
}
