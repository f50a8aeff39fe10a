use crate::state::MatchState;

/// Defines how a concrete action variant mutates match state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the state mutation. The engine
/// runs all three phases on a working copy and only commits when every
/// phase succeeds, so `apply` may leave the copy half-written on error.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Returns the energy this action charges the acting side.
    fn cost(&self, _state: &MatchState) -> u32 {
        0
    }

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &MatchState) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the match state directly.
    /// Implementations should assume that `pre_validate` has already run.
    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &MatchState) -> Result<(), Self::Error> {
        Ok(())
    }
}
