//! Timed effects attached to creatures by tools and spells.
//!
//! An effect applies its stat deltas and health delta once per tick and
//! loses one point of duration each time. Effects are dropped when their
//! duration reaches zero.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

use super::creature::StatKind;

/// Ordered mapping of stat to signed per-tick delta.
pub type StatDeltas = BTreeMap<StatKind, i32>;

/// What an effect touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    Stat,
    Health,
    Both,
}

/// A single timed effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub name: String,
    pub kind: EffectKind,
    pub stat_effect: StatDeltas,
    pub health_effect: i32,
    /// Remaining ticks.
    pub duration: u32,
}

impl Effect {
    /// Creates an effect, classifying its kind from the deltas supplied.
    pub fn new(
        name: impl Into<String>,
        stat_effect: StatDeltas,
        health_effect: i32,
        duration: u32,
    ) -> Self {
        let kind = match (stat_effect.values().any(|d| *d != 0), health_effect != 0) {
            (true, true) => EffectKind::Both,
            (false, true) => EffectKind::Health,
            _ => EffectKind::Stat,
        };
        Self {
            name: name.into(),
            kind,
            stat_effect,
            health_effect,
            duration,
        }
    }

    pub fn health(name: impl Into<String>, health_effect: i32, duration: u32) -> Self {
        Self::new(name, StatDeltas::new(), health_effect, duration)
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.duration == 0
    }
}

/// Bounded list of effects active on one creature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffects {
    effects: ArrayVec<Effect, { BattleConfig::MAX_ACTIVE_EFFECTS }>,
}

impl ActiveEffects {
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Attaches an effect. When the list is full the oldest effect is evicted
    /// and returned.
    pub fn push(&mut self, effect: Effect) -> Option<Effect> {
        let evicted = if self.effects.is_full() {
            Some(self.effects.remove(0))
        } else {
            None
        };
        self.effects.push(effect);
        evicted
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Effect> {
        self.effects.iter_mut()
    }

    /// Removes expired effects, returning them in their original order.
    pub fn drain_expired(&mut self) -> Vec<Effect> {
        let mut expired = Vec::new();
        let mut index = 0;
        while index < self.effects.len() {
            if self.effects[index].is_expired() {
                expired.push(self.effects.remove(index));
            } else {
                index += 1;
            }
        }
        expired
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.effects.iter().any(|effect| effect.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_classified_from_deltas() {
        let stat = Effect::new("Guard", StatDeltas::from([(StatKind::PhysicalDefense, 3)]), 0, 2);
        assert_eq!(stat.kind, EffectKind::Stat);
        assert_eq!(Effect::health("Regrowth", 4, 2).kind, EffectKind::Health);
        let both = Effect::new("Drain", StatDeltas::from([(StatKind::PhysicalAttack, 1)]), -2, 1);
        assert_eq!(both.kind, EffectKind::Both);
    }

    #[test]
    fn push_evicts_oldest_when_full() {
        let mut effects = ActiveEffects::empty();
        for i in 0..BattleConfig::MAX_ACTIVE_EFFECTS {
            assert!(effects.push(Effect::health(format!("e{i}"), 1, 1)).is_none());
        }
        let evicted = effects.push(Effect::health("late", 1, 1)).unwrap();
        assert_eq!(evicted.name, "e0");
        assert_eq!(effects.len(), BattleConfig::MAX_ACTIVE_EFFECTS);
        assert!(effects.contains("late"));
    }
}
