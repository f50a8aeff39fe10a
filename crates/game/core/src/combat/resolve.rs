//! Pure resolution of the four combat actions.
//!
//! Each resolver takes creature snapshots and returns updated copies plus a
//! log line. Removing fallen creatures, charging energy and consuming items
//! are the caller's job.

use crate::state::{AttackKind, Creature};

use super::damage::{calculate_damage, combo_multiplier_pct, scale_pct};
use super::items::ItemEffectProfile;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackResolution {
    pub attacker: Creature,
    pub defender: Creature,
    pub kind: AttackKind,
    pub damage: u32,
    pub log: String,
}

/// Resolves an attack. `consecutive_actions` is the attacking side's combo
/// counter before this attack.
pub fn resolve_attack(
    attacker: &Creature,
    defender: &Creature,
    consecutive_actions: u32,
) -> AttackResolution {
    let (kind, attack) = attacker.attack_profile();
    let defense = defender.defense_against(kind);
    let base = calculate_damage(attack, defense, defender.is_defending);
    let damage = scale_pct(base, combo_multiplier_pct(consecutive_actions));

    let mut defender = defender.clone();
    defender.change_health(-(damage as i32));

    let mut log = format!(
        "{} hit {} for {} {} damage",
        attacker.species, defender.species, damage, kind
    );
    if !defender.is_alive() {
        log.push_str(&format!(". {} was defeated!", defender.species));
    }

    AttackResolution {
        attacker: attacker.clone(),
        defender,
        kind,
        damage,
        log,
    }
}

fn apply_to_target(target: &mut Creature, profile: &ItemEffectProfile) {
    for (stat, delta) in &profile.target_stats {
        target.add_stat(*stat, *delta);
    }
    if profile.target_heal != 0 {
        target.change_health(profile.target_heal);
    }
    if profile.damage > 0 {
        target.change_health(-(profile.damage as i32));
    }
    if let Some(effect) = &profile.timed {
        target.active_effects.push(effect.clone());
    }
}

fn apply_to_caster(caster: &mut Creature, profile: &ItemEffectProfile) {
    for (stat, delta) in &profile.caster_stats {
        caster.add_stat(*stat, *delta);
    }
    if profile.caster_heal != 0 {
        caster.change_health(profile.caster_heal);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolResolution {
    pub target: Creature,
    pub log: String,
}

pub fn resolve_tool(target: &Creature, tool_name: &str, profile: &ItemEffectProfile) -> ToolResolution {
    let mut updated = target.clone();
    apply_to_target(&mut updated, profile);
    let log = if profile.fallback {
        format!("{} used on {} had a weakened effect", tool_name, updated.species)
    } else {
        format!("{} used on {}", tool_name, updated.species)
    };
    ToolResolution {
        target: updated,
        log,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpellResolution {
    pub caster: Creature,
    /// `None` when the caster targeted itself; the caster then carries both
    /// sets of changes.
    pub target: Option<Creature>,
    pub log: String,
}

/// Resolves a spell. Pass `None` as `target` for a self-cast.
pub fn resolve_spell(
    caster: &Creature,
    target: Option<&Creature>,
    spell_name: &str,
    profile: &ItemEffectProfile,
) -> SpellResolution {
    let mut updated_caster = caster.clone();
    let updated_target = match target {
        Some(target) => {
            let mut updated = target.clone();
            apply_to_target(&mut updated, profile);
            Some(updated)
        }
        None => {
            apply_to_target(&mut updated_caster, profile);
            None
        }
    };
    apply_to_caster(&mut updated_caster, profile);

    let target_name = updated_target
        .as_ref()
        .map_or("itself", |t| t.species.as_str());
    let mut log = format!("{} cast {} on {}", caster.species, spell_name, target_name);
    if profile.damage > 0 {
        log.push_str(&format!(", dealing {} damage", profile.damage));
    }
    if updated_target.as_ref().is_some_and(|t| !t.is_alive()) || !updated_caster.is_alive() {
        log.push_str(". A creature was defeated!");
    }

    SpellResolution {
        caster: updated_caster,
        target: updated_target,
        log,
    }
}

pub fn resolve_defend(creature: &Creature) -> (Creature, String) {
    let mut updated = creature.clone();
    updated.is_defending = true;
    let log = format!("{} takes a defensive stance", updated.species);
    (updated, log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::items::tool_profile;
    use crate::state::{
        BaseStats, BattleStats, CreatureId, EffectFamily, Item, ItemId, ItemType, Rarity, StatKind,
    };

    fn creature(id: u32, attack: i32, defense: i32, health: i32) -> Creature {
        Creature::new(
            CreatureId(id),
            format!("C{id}"),
            0,
            BaseStats::default(),
            BattleStats {
                max_health: health,
                physical_attack: attack,
                magical_attack: 0,
                physical_defense: defense,
                magical_defense: defense,
                initiative: 0,
                energy_cost: 0,
            },
        )
    }

    #[test]
    fn attack_applies_combo_multiplier() {
        let attacker = creature(1, 20, 0, 30);
        let defender = creature(2, 0, 10, 100);
        assert_eq!(resolve_attack(&attacker, &defender, 0).damage, 15);
        // 15 × 115%
        assert_eq!(resolve_attack(&attacker, &defender, 3).damage, 17);
    }

    #[test]
    fn attack_never_drives_health_negative() {
        let attacker = creature(1, 200, 0, 30);
        let defender = creature(2, 0, 0, 10);
        let result = resolve_attack(&attacker, &defender, 0);
        assert_eq!(result.defender.current_health, 0);
        assert!(result.log.contains("defeated"));
    }

    #[test]
    fn defending_mitigates() {
        let attacker = creature(1, 20, 0, 30);
        let mut defender = creature(2, 0, 10, 100);
        defender.is_defending = true;
        assert_eq!(resolve_attack(&attacker, &defender, 0).damage, 7);
    }

    #[test]
    fn tool_attaches_timed_effect() {
        let target = creature(1, 5, 5, 40);
        let tool = Item::tool(ItemId(1), "Aegis", ItemType::Stamina, EffectFamily::Shield, Rarity::Common);
        let profile = tool_profile(&tool, 100).unwrap();
        let result = resolve_tool(&target, &tool.name, &profile);
        assert_eq!(result.target.stats.physical_defense, 15);
        assert_eq!(result.target.stats.max_health, 55);
        assert_eq!(result.target.active_effects.len(), 1);
    }

    #[test]
    fn self_cast_merges_changes_into_caster() {
        let caster = creature(1, 5, 5, 40);
        let profile = ItemEffectProfile {
            target_heal: 0,
            damage: 0,
            caster_stats: [(StatKind::PhysicalAttack, 2)].into_iter().collect(),
            target_stats: [(StatKind::PhysicalDefense, 3)].into_iter().collect(),
            ..ItemEffectProfile::default()
        };
        let result = resolve_spell(&caster, None, "Focus", &profile);
        assert!(result.target.is_none());
        assert_eq!(result.caster.stats.physical_attack, 7);
        assert_eq!(result.caster.stats.physical_defense, 8);
        assert!(result.log.contains("itself"));
    }
}
