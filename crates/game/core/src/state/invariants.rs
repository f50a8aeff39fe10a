//! Match invariants checked after every transition.
//!
//! A violation means a transition applied something it should have
//! rejected. The engine runs these in the post-validate phase and discards
//! the working copy when any fail.

use std::collections::HashSet;

use strum::IntoEnumIterator;

use crate::config::BattleConfig;

use super::{CreatureId, MatchState, Side, Zone};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantViolation {
    #[error("{side} energy {energy} exceeds maximum {max}")]
    EnergyAboveMaximum { side: Side, energy: u32, max: u32 },

    #[error("{side} field holds {len} creatures but capacity is {capacity}")]
    FieldOverCapacity {
        side: Side,
        len: usize,
        capacity: usize,
    },

    #[error("{side} creature {id} appears in several zones: {zones:?}")]
    DuplicateCreature {
        side: Side,
        id: CreatureId,
        zones: Vec<Zone>,
    },

    #[error("{side} creature {id} is on the field with no health")]
    FallenCreatureOnField { side: Side, id: CreatureId },
}

/// Checks every structural invariant, returning all violations found.
#[must_use]
pub fn check_invariants(state: &MatchState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for side in Side::iter() {
        let side_state = state.side(side);

        if side_state.energy > BattleConfig::MAX_ENERGY {
            violations.push(InvariantViolation::EnergyAboveMaximum {
                side,
                energy: side_state.energy,
                max: BattleConfig::MAX_ENERGY,
            });
        }

        let capacity = state.field_capacity(side);
        if side_state.field.len() > capacity {
            violations.push(InvariantViolation::FieldOverCapacity {
                side,
                len: side_state.field.len(),
                capacity,
            });
        }

        let mut seen = HashSet::new();
        let all = side_state
            .deck
            .iter()
            .chain(&side_state.hand)
            .chain(&side_state.field);
        for creature in all {
            if !seen.insert(creature.id) {
                let zones = side_state.zones_of(creature.id);
                let already_reported = violations.iter().any(|v| {
                    matches!(v, InvariantViolation::DuplicateCreature { side: s, id, .. }
                        if *s == side && *id == creature.id)
                });
                if !already_reported {
                    violations.push(InvariantViolation::DuplicateCreature {
                        side,
                        id: creature.id,
                        zones,
                    });
                }
            }
        }

        for creature in side_state.field.iter().filter(|c| !c.is_alive()) {
            violations.push(InvariantViolation::FallenCreatureOnField {
                side,
                id: creature.id,
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BaseStats, BattleStats, Creature};

    fn creature(id: u32) -> Creature {
        let stats = BattleStats {
            max_health: 20,
            ..BattleStats::default()
        };
        Creature::new(CreatureId(id), "Moss", 0, BaseStats::default(), stats)
    }

    #[test]
    fn fresh_state_is_consistent() {
        assert!(check_invariants(&MatchState::default()).is_empty());
    }

    #[test]
    fn detects_creature_in_two_zones() {
        let mut state = MatchState::default();
        state.human.hand.push(creature(1));
        state.human.deck.push(creature(1));
        let violations = check_invariants(&state);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            &violations[0],
            InvariantViolation::DuplicateCreature { side: Side::Human, .. }
        ));
    }

    #[test]
    fn detects_overfull_field_and_energy() {
        let mut state = MatchState::default();
        for id in 0..4 {
            state.human.field.push(creature(id));
        }
        state.opponent.energy = BattleConfig::MAX_ENERGY + 1;
        let violations = check_invariants(&state);
        assert!(violations
            .iter()
            .any(|v| matches!(v, InvariantViolation::FieldOverCapacity { len: 4, .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, InvariantViolation::EnergyAboveMaximum { side: Side::Opponent, .. })));
    }

    #[test]
    fn detects_fallen_creature_on_field() {
        let mut state = MatchState::default();
        let mut fallen = creature(3);
        fallen.current_health = 0;
        state.opponent.field.push(fallen);
        assert_eq!(
            check_invariants(&state),
            vec![InvariantViolation::FallenCreatureOnField {
                side: Side::Opponent,
                id: CreatureId(3)
            }]
        );
    }
}
