//! Per-side battle state: creature zones, energy and inventories.

use super::common::{CreatureId, ItemId};
use super::creature::Creature;
use super::item::{EffectFamily, Item};

/// Zone a creature currently occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Zone {
    Deck,
    Hand,
    Field,
}

/// Everything one side owns during a match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideState {
    /// Draw order, front first.
    pub deck: Vec<Creature>,
    pub hand: Vec<Creature>,
    pub field: Vec<Creature>,
    pub energy: u32,
    pub tools: Vec<Item>,
    pub spells: Vec<Item>,
    /// Combo counter; reset whenever the active side switches.
    pub consecutive_actions: u32,
    /// Energy spent since the last regeneration.
    pub energy_momentum: u32,
    /// Family of the last item used this turn, for synergy bonuses.
    pub last_item_family: Option<EffectFamily>,
}

impl SideState {
    pub fn hand_creature(&self, id: CreatureId) -> Option<&Creature> {
        self.hand.iter().find(|c| c.id == id)
    }

    pub fn field_creature(&self, id: CreatureId) -> Option<&Creature> {
        self.field.iter().find(|c| c.id == id)
    }

    pub fn field_creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.field.iter_mut().find(|c| c.id == id)
    }

    pub fn take_from_hand(&mut self, id: CreatureId) -> Option<Creature> {
        let index = self.hand.iter().position(|c| c.id == id)?;
        Some(self.hand.remove(index))
    }

    pub fn tool(&self, id: ItemId) -> Option<&Item> {
        self.tools.iter().find(|item| item.id == id)
    }

    pub fn spell(&self, id: ItemId) -> Option<&Item> {
        self.spells.iter().find(|item| item.id == id)
    }

    pub fn take_tool(&mut self, id: ItemId) -> Option<Item> {
        let index = self.tools.iter().position(|item| item.id == id)?;
        Some(self.tools.remove(index))
    }

    pub fn take_spell(&mut self, id: ItemId) -> Option<Item> {
        let index = self.spells.iter().position(|item| item.id == id)?;
        Some(self.spells.remove(index))
    }

    /// Returns every zone holding the given id (more than one is a violation).
    pub fn zones_of(&self, id: CreatureId) -> Vec<Zone> {
        let mut zones = Vec::new();
        if self.deck.iter().any(|c| c.id == id) {
            zones.push(Zone::Deck);
        }
        if self.hand.iter().any(|c| c.id == id) {
            zones.push(Zone::Hand);
        }
        if self.field.iter().any(|c| c.id == id) {
            zones.push(Zone::Field);
        }
        zones
    }

    /// True when field, hand and deck are all empty.
    pub fn is_exhausted(&self) -> bool {
        self.field.is_empty() && self.hand.is_empty() && self.deck.is_empty()
    }

    /// Creatures still available to this side on field or in hand.
    pub fn remaining_units(&self) -> usize {
        self.field.len() + self.hand.len()
    }

    /// Sum of the base energy attribute over fielded creatures.
    pub fn field_energy(&self) -> u32 {
        self.field.iter().map(|c| c.base.energy).sum()
    }

    /// Removes fallen creatures from the field, returning them.
    pub fn remove_fallen(&mut self) -> Vec<Creature> {
        let (alive, fallen): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.field).into_iter().partition(Creature::is_alive);
        self.field = alive;
        fallen
    }
}
