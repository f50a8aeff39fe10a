//! Results returned by executed actions.

use crate::energy::RegenReport;
use crate::state::CreatureId;

use super::combat::{AttackOutcome, ItemOutcome};
use super::planned::SequenceReport;

/// Action-specific result of a successful transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    /// Transition with nothing to report (start, reset, side switch, log).
    #[default]
    Done,
    Deployed {
        cost: u32,
    },
    Attack(AttackOutcome),
    Item(ItemOutcome),
    Defended,
    Drew(CreatureId),
    Regenerated(RegenReport),
    Decayed {
        amount: u32,
    },
    TurnAdvanced {
        turn: u32,
    },
    EffectsApplied {
        removed: usize,
    },
    ComboBonus {
        boosted: usize,
    },
    /// A planned single action that was re-validated and skipped.
    Skipped,
    Sequence(SequenceReport),
}
