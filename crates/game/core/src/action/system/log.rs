use std::convert::Infallible;

use crate::action::ActionTransition;
use crate::state::{MatchState, Side};

/// Appends a narration line. Allowed in every phase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddLogAction {
    pub side: Option<Side>,
    pub message: String,
}

impl AddLogAction {
    pub fn new(side: Option<Side>, message: impl Into<String>) -> Self {
        Self {
            side,
            message: message.into(),
        }
    }
}

impl ActionTransition for AddLogAction {
    type Error = Infallible;
    type Result = ();

    fn apply(&self, state: &mut MatchState) -> Result<Self::Result, Self::Error> {
        state.push_log(self.side, self.message.clone());
        Ok(())
    }
}
