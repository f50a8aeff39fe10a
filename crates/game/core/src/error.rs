//! Common error infrastructure for arena-core.
//!
//! Domain-specific errors (e.g. `ActionError`, `TurnError`) live beside the
//! code that raises them. This module provides the shared classification used
//! by all of them.
//! Every illegal operation maps to a typed variant; nothing here panics.

use crate::state::Side;

/// Severity level of an error, used for logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The caller may retry with a different action (e.g. not enough energy).
    Recoverable,

    /// Invalid input, should not be retried unchanged (e.g. unknown creature).
    Validation,

    /// Unexpected state inconsistency that indicates a bug.
    Internal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Recovery policy attached to a failure.
///
/// - **IllegalTransition**: the transition is a no-op apart from a log line.
/// - **InvalidItemData**: a conservative default effect is substituted.
/// - **DataInconsistency**: the trusted formula replaces the supplied value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    IllegalTransition,
    InvalidItemData,
    DataInconsistency,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IllegalTransition => "illegal_transition",
            Self::InvalidItemData => "invalid_item_data",
            Self::DataInconsistency => "data_inconsistency",
        }
    }
}

/// Contextual information captured where an error is raised.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Side that attempted the operation (if applicable).
    pub side: Option<Side>,

    /// Turn number at the time of error.
    pub turn: u32,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(turn: u32) -> Self {
        Self {
            side: None,
            turn,
            message: None,
        }
    }

    #[must_use]
    pub const fn with_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Classification shared by every arena-core error enum.
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns which recovery policy applies to this error.
    fn kind(&self) -> ErrorKind {
        ErrorKind::IllegalTransition
    }

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Stable identifier for the variant, used in structured logs.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
