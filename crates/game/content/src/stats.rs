//! Battle stat derivation from base attributes.

use arena_core::{BaseStats, BattleStats, Creature};

/// Health every creature starts from before stamina and form are added.
pub const BASE_HEALTH: i32 = 40;
pub const HEALTH_PER_STAMINA: i32 = 8;
pub const HEALTH_PER_FORM: i32 = 10;
pub const ATTACK_PER_POINT: i32 = 2;
pub const ATTACK_PER_FORM: i32 = 2;

/// Derives combat stats from base attributes and evolution form.
///
/// Pure. Attack scales with the matching attribute (strength for physical,
/// magic for magical), defense blends stamina with the matching attribute,
/// initiative follows speed. `energy_cost` is always `5 + form_level`.
pub fn derive_stats(base: BaseStats, form_level: u32) -> BattleStats {
    let form = form_level as i32;
    let strength = base.strength as i32;
    let magic = base.magic as i32;
    let stamina = base.stamina as i32;
    let speed = base.speed as i32;

    BattleStats {
        max_health: BASE_HEALTH + stamina * HEALTH_PER_STAMINA + form * HEALTH_PER_FORM,
        physical_attack: 5 + strength * ATTACK_PER_POINT + form * ATTACK_PER_FORM,
        magical_attack: 5 + magic * ATTACK_PER_POINT + form * ATTACK_PER_FORM,
        physical_defense: 3 + stamina + strength / 2 + form,
        magical_defense: 3 + stamina + magic / 2 + form,
        initiative: 5 + speed * 2,
        energy_cost: Creature::deploy_cost_for(form_level),
    }
}
