//! Per-side energy ledger.
//!
//! Every energy mutation in the engine goes through these functions. Costs
//! come from [`action_cost`], the single canonical source per action kind.

use crate::config::BattleConfig;
use crate::state::{Creature, SideState};

/// Action kinds that carry an energy price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CostKind {
    /// Deploy cost depends on the creature's form level.
    Deploy { form_level: u32 },
    Attack,
    Defend,
    Spell,
    Tool,
}

/// Canonical energy cost of an action kind.
pub const fn action_cost(kind: CostKind) -> u32 {
    match kind {
        CostKind::Deploy { form_level } => Creature::deploy_cost_for(form_level),
        CostKind::Attack => BattleConfig::ATTACK_COST,
        CostKind::Defend => BattleConfig::DEFEND_COST,
        CostKind::Spell => BattleConfig::SPELL_COST,
        CostKind::Tool => BattleConfig::TOOL_COST,
    }
}

/// Result of checking an externally supplied deploy cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedCost {
    pub cost: u32,
    /// The supplied cost when it was rejected as inconsistent.
    pub replaced: Option<u32>,
}

/// Resolves a deploy cost, discarding any supplied value above the energy
/// maximum in favor of the form-level formula.
pub fn resolve_deploy_cost(form_level: u32, supplied: Option<u32>) -> ResolvedCost {
    let trusted = action_cost(CostKind::Deploy { form_level });
    match supplied {
        Some(value) if value > BattleConfig::MAX_ENERGY => ResolvedCost {
            cost: trusted,
            replaced: Some(value),
        },
        _ => ResolvedCost {
            cost: trusted,
            replaced: None,
        },
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("insufficient energy: need {required}, have {available}")]
pub struct InsufficientEnergy {
    pub required: u32,
    pub available: u32,
}

/// Deducts `amount` and adds it to momentum.
pub fn spend(side: &mut SideState, amount: u32) -> Result<(), InsufficientEnergy> {
    if amount > side.energy {
        return Err(InsufficientEnergy {
            required: amount,
            available: side.energy,
        });
    }
    side.energy = side.energy.saturating_sub(amount);
    side.energy_momentum = side.energy_momentum.saturating_add(amount);
    Ok(())
}

/// Adds energy from an item effect, clamped to the maximum.
/// Returns the amount actually granted. Momentum is unaffected.
pub fn grant(side: &mut SideState, amount: u32) -> u32 {
    let before = side.energy;
    side.energy = side
        .energy
        .saturating_add(amount)
        .min(BattleConfig::MAX_ENERGY);
    side.energy - before
}

/// Breakdown of one regeneration step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenReport {
    pub field_bonus: u32,
    pub momentum_bonus: u32,
    pub tier_bonus: i32,
    /// Energy actually gained after clamping.
    pub gained: u32,
}

/// `floor(sum of fielded base energy / 10)`.
pub fn field_bonus(side: &SideState) -> u32 {
    side.field_energy() / BattleConfig::BONUS_DIVISOR
}

/// `floor(momentum / 10)`.
pub fn momentum_bonus(side: &SideState) -> u32 {
    side.energy_momentum / BattleConfig::BONUS_DIVISOR
}

/// Regenerates a side: base + field bonus + momentum bonus + tier bonus,
/// clamped to `[0, MAX_ENERGY]`. Momentum resets afterwards.
pub fn regenerate(side: &mut SideState, tier_bonus: i32) -> RegenReport {
    let field_bonus = field_bonus(side);
    let momentum_bonus = momentum_bonus(side);
    let before = side.energy;

    let total = i64::from(before)
        + i64::from(BattleConfig::BASE_REGEN)
        + i64::from(field_bonus)
        + i64::from(momentum_bonus)
        + i64::from(tier_bonus);
    side.energy = total.clamp(0, i64::from(BattleConfig::MAX_ENERGY)) as u32;
    side.energy_momentum = 0;

    RegenReport {
        field_bonus,
        momentum_bonus,
        tier_bonus,
        gained: side.energy.saturating_sub(before),
    }
}

/// Applies anti-hoarding decay when energy is above the threshold.
/// Returns the amount removed.
pub fn decay(side: &mut SideState) -> u32 {
    if side.energy <= BattleConfig::DECAY_THRESHOLD {
        return 0;
    }
    let amount = side.energy / BattleConfig::DECAY_DIVISOR;
    side.energy -= amount;
    amount
}
