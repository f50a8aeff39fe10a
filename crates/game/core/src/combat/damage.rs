//! Damage calculation.

use crate::config::BattleConfig;

/// Every landed attack deals at least this much.
pub const MINIMUM_DAMAGE: u32 = 1;

/// Calculate damage from an attack.
///
/// # Formula
///
/// ```text
/// reduced = attack - defense / 2
/// damage  = max(reduced, MINIMUM_DAMAGE)
///
/// if defending:
///     damage = max(damage / 2, MINIMUM_DAMAGE)
/// ```
pub fn calculate_damage(attack: i32, defense: i32, defending: bool) -> u32 {
    let reduced = attack.max(0) - defense.max(0) / 2;
    let mut damage = (reduced.max(0) as u32).max(MINIMUM_DAMAGE);
    if defending {
        damage = (damage / 2).max(MINIMUM_DAMAGE);
    }
    damage
}

/// Combo multiplier in percent: `100 + 5 * consecutive_actions` once the
/// streak is above one, otherwise 100.
pub const fn combo_multiplier_pct(consecutive_actions: u32) -> u32 {
    if consecutive_actions > 1 {
        100 + BattleConfig::COMBO_STEP_PCT * consecutive_actions
    } else {
        100
    }
}

/// Scales damage by a percentage, flooring.
pub const fn scale_pct(damage: u32, pct: u32) -> u32 {
    damage.saturating_mul(pct) / 100
}
