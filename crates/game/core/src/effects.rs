//! Ongoing effect resolution.
//!
//! One tick applies each active effect in turn (health first, then stats),
//! then decrements durations and drops what expired. Creatures never
//! influence each other during a tick, so field order does not matter.

use crate::state::{Creature, Effect};

/// Runs one tick over a single creature.
pub fn tick(creature: &Creature) -> (Creature, Vec<String>) {
    let mut updated = creature.clone();
    let mut lines = Vec::new();

    let effects: Vec<Effect> = updated.active_effects.iter().cloned().collect();
    for effect in &effects {
        let applied = updated.change_health(effect.health_effect);
        if applied > 0 {
            lines.push(format!("{} healed {} from {}", updated.species, applied, effect.name));
        } else if applied < 0 {
            lines.push(format!("{} took {} damage from {}", updated.species, -applied, effect.name));
        }
        for (stat, delta) in &effect.stat_effect {
            updated.add_stat(*stat, *delta);
        }
    }
    for effect in updated.active_effects.iter_mut() {
        effect.duration = effect.duration.saturating_sub(1);
    }

    for expired in updated.active_effects.drain_expired() {
        lines.push(format!("{} on {} expired", expired.name, updated.species));
    }

    updated.is_defending = false;
    (updated, lines)
}

/// Result of ticking a whole field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldTick {
    pub survivors: Vec<Creature>,
    pub fallen: Vec<Creature>,
    pub lines: Vec<String>,
}

/// Ticks every creature on a field, separating those reduced to zero health.
pub fn tick_field(field: &[Creature]) -> FieldTick {
    let mut result = FieldTick::default();
    for creature in field {
        let (updated, lines) = tick(creature);
        result.lines.extend(lines);
        if updated.is_alive() {
            result.survivors.push(updated);
        } else {
            result
                .lines
                .push(format!("{} was defeated by ongoing effects", updated.species));
            result.fallen.push(updated);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BaseStats, BattleStats, CreatureId, StatDeltas, StatKind};

    fn creature(health: i32, max: i32) -> Creature {
        let stats = BattleStats {
            max_health: max,
            physical_attack: 10,
            ..BattleStats::default()
        };
        let mut creature = Creature::new(CreatureId(7), "Thorn", 0, BaseStats::default(), stats);
        creature.current_health = health;
        creature
    }

    #[test]
    fn lethal_tick_removes_creature_from_field() {
        let mut target = creature(3, 50);
        target.active_effects.push(Effect::health("Poison", -5, 2));

        let result = tick_field(&[target]);
        assert!(result.survivors.is_empty());
        assert_eq!(result.fallen.len(), 1);
        assert_eq!(result.fallen[0].current_health, 0);
    }

    #[test]
    fn effect_is_gone_once_ticks_reach_duration() {
        let mut target = creature(40, 50);
        target
            .active_effects
            .push(Effect::new("Focus", StatDeltas::from([(StatKind::PhysicalAttack, 1)]), 0, 3));

        let mut current = target;
        for n in 1..=4 {
            let (next, lines) = tick(&current);
            current = next;
            assert_eq!(current.active_effects.contains("Focus"), n < 3);
            if n == 3 {
                assert!(lines.iter().any(|l| l.contains("expired")));
            }
        }
        assert_eq!(current.stats.physical_attack, 13);
    }

    #[test]
    fn healing_is_clamped_and_logged() {
        let mut target = creature(48, 50);
        target.active_effects.push(Effect::health("Mend", 10, 1));
        let (updated, lines) = tick(&target);
        assert_eq!(updated.current_health, 50);
        assert_eq!(lines[0], "Thorn healed 2 from Mend");
    }

    #[test]
    fn effects_resolve_one_at_a_time() {
        let mut target = creature(45, 50);
        target.active_effects.push(Effect::health("Mend", 15, 2));
        target
            .active_effects
            .push(Effect::new("Grow", StatDeltas::from([(StatKind::MaxHealth, 20)]), 0, 2));

        let (updated, lines) = tick(&target);
        assert_eq!(updated.stats.max_health, 70);
        assert_eq!(updated.current_health, 50);
        assert_eq!(lines, vec!["Thorn healed 5 from Mend".to_string()]);
    }

    #[test]
    fn shrinking_max_health_clamps_after_heal() {
        let mut target = creature(40, 50);
        target.active_effects.push(Effect::new(
            "Wither",
            StatDeltas::from([(StatKind::MaxHealth, -20)]),
            15,
            2,
        ));

        let (updated, _) = tick(&target);
        assert_eq!(updated.stats.max_health, 30);
        assert_eq!(updated.current_health, 30);
    }

    #[test]
    fn defending_is_cleared() {
        let mut target = creature(10, 50);
        target.is_defending = true;
        let (updated, lines) = tick(&target);
        assert!(!updated.is_defending);
        assert!(lines.is_empty());
    }
}
