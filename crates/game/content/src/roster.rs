//! Roster entries and their conversion into battle instances.

use arena_core::{BaseStats, Creature, CreatureId};

use crate::stats::derive_stats;

/// A creature as authored in content files: species, form and base
/// attributes. Battle stats are derived when the roster is instantiated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreatureSpec {
    pub species: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub form_level: u32,
    pub base: BaseStats,
}

impl CreatureSpec {
    pub fn new(species: impl Into<String>, form_level: u32, base: BaseStats) -> Self {
        Self {
            species: species.into(),
            form_level,
            base,
        }
    }

    pub fn instantiate(&self, id: CreatureId) -> Creature {
        Creature::new(
            id,
            self.species.clone(),
            self.form_level,
            self.base,
            derive_stats(self.base, self.form_level),
        )
    }
}

/// Instantiates specs in order with consecutive ids starting at `first_id`.
pub fn instantiate_roster(specs: &[CreatureSpec], first_id: u32) -> Vec<Creature> {
    specs
        .iter()
        .zip(first_id..)
        .map(|(spec, id)| spec.instantiate(CreatureId(id)))
        .collect()
}
