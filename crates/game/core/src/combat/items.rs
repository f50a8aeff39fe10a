//! Tool and spell effect tables.
//!
//! An item's type picks a base effect and its family reshapes it. The
//! resulting [`ItemEffectProfile`] is applied by the resolvers in
//! [`super::resolve`]. Magnitudes are scaled by an item power percentage
//! (difficulty × rarity) and, for spells, the caster's magic.

use crate::error::{BattleError, ErrorKind, ErrorSeverity};
use crate::state::{
    Creature, Difficulty, Effect, EffectFamily, Item, ItemCategory, ItemId, ItemType, Rarity,
    StatDeltas, StatKind,
};

/// Item effect power in percent for a difficulty tier and rarity.
pub const fn power_pct(difficulty: Difficulty, rarity: Rarity) -> u32 {
    difficulty.effect_power_pct() * rarity.power_pct() / 100
}

/// Spell magic power in percent: `100 + 15 × caster magic`.
pub fn magic_pct(caster: &Creature) -> u32 {
    100 + 15 * caster.base.magic
}

#[inline]
fn scale(value: i32, pct: u32) -> i32 {
    (i64::from(value) * i64::from(pct) / 100) as i32
}

/// Rounds `value × num / den` to the nearest integer, halves away from zero.
#[inline]
fn ratio_round(value: i32, num: i32, den: i32) -> i32 {
    let scaled = value * num;
    if scaled >= 0 {
        (scaled + den / 2) / den
    } else {
        (scaled - den / 2) / den
    }
}

fn scaled_deltas(deltas: &StatDeltas, num: i32, den: i32) -> StatDeltas {
    deltas
        .iter()
        .map(|(stat, value)| (*stat, ratio_round(*value, num, den)))
        .filter(|(_, value)| *value != 0)
        .collect()
}

fn powered(deltas: StatDeltas, pct: u32) -> StatDeltas {
    deltas
        .into_iter()
        .map(|(stat, value)| (stat, scale(value, pct)))
        .collect()
}

/// Malformed item data. Recovered by substituting a conservative default.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemDataError {
    #[error("item {item} has no type")]
    MissingType { item: ItemId },

    #[error("item {item} has no effect family")]
    MissingFamily { item: ItemId },

    #[error("item {item} is a {found}, expected a {expected}")]
    WrongCategory {
        item: ItemId,
        expected: ItemCategory,
        found: ItemCategory,
    },
}

impl BattleError for ItemDataError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidItemData
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingType { .. } => "ITEM_MISSING_TYPE",
            Self::MissingFamily { .. } => "ITEM_MISSING_FAMILY",
            Self::WrongCategory { .. } => "ITEM_WRONG_CATEGORY",
        }
    }
}

/// Everything an item does when used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemEffectProfile {
    /// Permanent stat changes applied to the target immediately.
    pub target_stats: StatDeltas,
    /// Immediate heal (positive) applied to the target.
    pub target_heal: i32,
    /// Immediate damage dealt to the target.
    pub damage: u32,
    /// Timed effect attached to the target.
    pub timed: Option<Effect>,
    /// Permanent stat changes applied to the caster (spells only).
    pub caster_stats: StatDeltas,
    /// Immediate heal applied to the caster (spells only).
    pub caster_heal: i32,
    /// Energy returned to the user's side.
    pub energy_gain: u32,
    /// True when built from the conservative default.
    pub fallback: bool,
}

impl ItemEffectProfile {
    /// Conservative default used when item data is malformed.
    pub fn fallback(category: ItemCategory) -> Self {
        match category {
            ItemCategory::Tool => Self {
                timed: Some(Effect::new(
                    "Minor Guard",
                    StatDeltas::from([(StatKind::PhysicalDefense, 2)]),
                    0,
                    1,
                )),
                fallback: true,
                ..Self::default()
            },
            ItemCategory::Spell => Self {
                damage: 5,
                fallback: true,
                ..Self::default()
            },
        }
    }
}

fn tags(item: &Item, expected: ItemCategory) -> Result<(ItemType, EffectFamily), ItemDataError> {
    if item.category != expected {
        return Err(ItemDataError::WrongCategory {
            item: item.id,
            expected,
            found: item.category,
        });
    }
    let item_type = item
        .item_type
        .ok_or(ItemDataError::MissingType { item: item.id })?;
    let family = item
        .family
        .ok_or(ItemDataError::MissingFamily { item: item.id })?;
    Ok((item_type, family))
}

struct ToolBase {
    stats: StatDeltas,
    health: i32,
    energy_gain: u32,
}

fn tool_base(item_type: ItemType) -> ToolBase {
    let (stats, health, energy_gain) = match item_type {
        ItemType::Energy => (StatDeltas::from([(StatKind::EnergyCost, -1)]), 0, 2),
        ItemType::Strength => (StatDeltas::from([(StatKind::PhysicalAttack, 5)]), 0, 0),
        ItemType::Magic => (StatDeltas::from([(StatKind::MagicalAttack, 5)]), 0, 0),
        ItemType::Stamina => (StatDeltas::from([(StatKind::PhysicalDefense, 5)]), 10, 0),
        ItemType::Speed => (StatDeltas::from([(StatKind::Initiative, 5)]), 0, 0),
    };
    ToolBase {
        stats,
        health,
        energy_gain,
    }
}

/// Builds the effect profile for a tool.
pub fn tool_profile(tool: &Item, power: u32) -> Result<ItemEffectProfile, ItemDataError> {
    let (item_type, family) = tags(tool, ItemCategory::Tool)?;
    let base = tool_base(item_type);
    let name = format!("{} {}", item_type, family);

    let profile = match family {
        EffectFamily::Surge => ItemEffectProfile {
            target_stats: powered(scaled_deltas(&base.stats, 2, 1), power),
            target_heal: scale(ratio_round(base.health, 3, 2), power),
            timed: Some(Effect::new(name, StatDeltas::new(), 0, 1)),
            ..ItemEffectProfile::default()
        },
        EffectFamily::Shield => ItemEffectProfile {
            target_stats: powered(
                StatDeltas::from([
                    (StatKind::PhysicalDefense, 10),
                    (StatKind::MagicalDefense, 10),
                    (StatKind::MaxHealth, 15),
                ]),
                power,
            ),
            timed: Some(Effect::health(name, scale(8, power), 3)),
            ..ItemEffectProfile::default()
        },
        EffectFamily::Echo => ItemEffectProfile {
            timed: Some(Effect::new(
                name,
                powered(scaled_deltas(&base.stats, 7, 10), power),
                scale(ratio_round(base.health, 1, 4), power),
                5,
            )),
            ..ItemEffectProfile::default()
        },
        EffectFamily::Drain => ItemEffectProfile {
            target_stats: powered(
                StatDeltas::from([
                    (StatKind::PhysicalAttack, 8),
                    (StatKind::MagicalAttack, 8),
                    (StatKind::PhysicalDefense, -3),
                    (StatKind::MagicalDefense, -3),
                ]),
                power,
            ),
            target_heal: scale(5, power),
            timed: Some(Effect::new(name, StatDeltas::new(), 0, 3)),
            ..ItemEffectProfile::default()
        },
        EffectFamily::Charge => {
            let stat = base
                .stats
                .keys()
                .next()
                .copied()
                .unwrap_or(StatKind::PhysicalAttack);
            ItemEffectProfile {
                timed: Some(Effect::new(
                    name,
                    StatDeltas::from([(stat, scale(3, power))]),
                    0,
                    3,
                )),
                ..ItemEffectProfile::default()
            }
        }
    };

    Ok(ItemEffectProfile {
        energy_gain: base.energy_gain,
        ..profile
    })
}

struct SpellBase {
    damage: Option<i32>,
    healing: Option<i32>,
    stats: StatDeltas,
    energy_gain: u32,
}

fn spell_base(item_type: ItemType, mp: u32) -> SpellBase {
    match item_type {
        ItemType::Strength => SpellBase {
            damage: Some(scale(20, mp)),
            healing: None,
            stats: StatDeltas::from([(StatKind::PhysicalAttack, 6)]),
            energy_gain: 0,
        },
        ItemType::Magic => SpellBase {
            damage: Some(scale(18, mp)),
            healing: None,
            stats: StatDeltas::from([(StatKind::MagicalAttack, 6), (StatKind::MagicalDefense, 3)]),
            energy_gain: 0,
        },
        ItemType::Stamina => SpellBase {
            damage: None,
            healing: Some(scale(25, mp)),
            stats: StatDeltas::from([(StatKind::PhysicalDefense, 5)]),
            energy_gain: 0,
        },
        ItemType::Speed => SpellBase {
            damage: None,
            healing: None,
            stats: StatDeltas::from([(StatKind::Initiative, 8)]),
            energy_gain: 0,
        },
        ItemType::Energy => SpellBase {
            damage: None,
            healing: None,
            stats: StatDeltas::from([(StatKind::EnergyCost, -2)]),
            energy_gain: 5,
        },
    }
}

/// Builds the effect profile for a spell cast by `caster`.
pub fn spell_profile(
    spell: &Item,
    caster: &Creature,
    power: u32,
) -> Result<ItemEffectProfile, ItemDataError> {
    let (item_type, family) = tags(spell, ItemCategory::Spell)?;
    let mp = magic_pct(caster);
    let base = spell_base(item_type, mp);
    let name = format!("{} {}", item_type, family);

    let profile = match family {
        EffectFamily::Surge => {
            let burst = base.damage.unwrap_or(15);
            ItemEffectProfile {
                damage: scale(ratio_round(burst, 5, 2), power).max(0) as u32,
                ..ItemEffectProfile::default()
            }
        }
        EffectFamily::Shield => ItemEffectProfile {
            target_stats: powered(
                StatDeltas::from([
                    (StatKind::PhysicalDefense, 12),
                    (StatKind::MagicalDefense, 12),
                    (StatKind::MaxHealth, 20),
                ]),
                power,
            ),
            target_heal: scale(scale(15, mp), power),
            timed: Some(Effect::new(name, StatDeltas::new(), 0, 3)),
            ..ItemEffectProfile::default()
        },
        EffectFamily::Echo => {
            let per_tick = match (base.healing, base.damage) {
                (Some(healing), _) => ratio_round(healing, 1, 3),
                (None, Some(damage)) => -ratio_round(damage, 1, 3),
                (None, None) => 0,
            };
            ItemEffectProfile {
                timed: Some(Effect::new(
                    name,
                    powered(scaled_deltas(&base.stats, 3, 10), power),
                    scale(per_tick, power),
                    3,
                )),
                ..ItemEffectProfile::default()
            }
        }
        EffectFamily::Drain => ItemEffectProfile {
            damage: scale(scale(18, mp), power).max(0) as u32,
            target_stats: StatDeltas::from([
                (StatKind::PhysicalAttack, -3),
                (StatKind::MagicalAttack, -3),
            ]),
            caster_stats: StatDeltas::from([
                (StatKind::PhysicalAttack, 2),
                (StatKind::MagicalAttack, 2),
            ]),
            caster_heal: scale(scale(10, mp), power),
            ..ItemEffectProfile::default()
        },
        EffectFamily::Charge => ItemEffectProfile {
            timed: Some(Effect::health(
                "Charging Spell",
                -scale(scale(35, mp), power),
                1,
            )),
            ..ItemEffectProfile::default()
        },
    };

    Ok(ItemEffectProfile {
        energy_gain: base.energy_gain,
        ..profile
    })
}

/// Bonus damage added when a damaging item follows a synergizing family.
pub const SYNERGY_DAMAGE: u32 = 5;
/// Bonus healing added when a healing item follows a synergizing family.
pub const SYNERGY_HEAL: i32 = 3;

impl ItemEffectProfile {
    /// Adds the synergy bonus to whatever this profile already deals or heals.
    pub fn with_synergy(mut self) -> Self {
        if self.damage > 0 {
            self.damage += SYNERGY_DAMAGE;
        }
        if self.target_heal > 0 {
            self.target_heal += SYNERGY_HEAL;
        }
        if self.caster_heal > 0 {
            self.caster_heal += SYNERGY_HEAL;
        }
        self
    }
}

/// Synergy between two effect families used back to back.
pub fn families_synergize(a: EffectFamily, b: EffectFamily) -> bool {
    use EffectFamily::*;
    matches!(
        (a, b),
        (Surge, Drain)
            | (Drain, Surge)
            | (Shield, Echo)
            | (Echo, Shield)
            | (Charge, Surge)
            | (Surge, Charge)
            | (Drain, Echo)
            | (Echo, Drain)
            | (Shield, Charge)
            | (Charge, Shield)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BaseStats, BattleStats, CreatureId};

    fn caster(magic: u32) -> Creature {
        Creature::new(
            CreatureId(1),
            "Sage",
            0,
            BaseStats::new(0, magic, 0, 0, 0),
            BattleStats {
                max_health: 40,
                ..BattleStats::default()
            },
        )
    }

    #[test]
    fn power_combines_difficulty_and_rarity() {
        assert_eq!(power_pct(Difficulty::Medium, Rarity::Common), 100);
        assert_eq!(power_pct(Difficulty::Expert, Rarity::Legendary), 156);
        assert_eq!(power_pct(Difficulty::Easy, Rarity::Rare), 99);
    }

    #[test]
    fn surge_tool_doubles_base_stats() {
        let tool = Item::tool(ItemId(1), "Whetstone", ItemType::Strength, EffectFamily::Surge, Rarity::Common);
        let profile = tool_profile(&tool, 100).unwrap();
        assert_eq!(profile.target_stats[&StatKind::PhysicalAttack], 10);
        assert_eq!(profile.timed.unwrap().duration, 1);
    }

    #[test]
    fn echo_tool_ticks_for_five_turns() {
        let tool = Item::tool(ItemId(2), "Spring", ItemType::Stamina, EffectFamily::Echo, Rarity::Common);
        let effect = tool_profile(&tool, 100).unwrap().timed.unwrap();
        assert_eq!(effect.duration, 5);
        assert_eq!(effect.health_effect, 3);
        assert_eq!(effect.stat_effect[&StatKind::PhysicalDefense], 4);
    }

    #[test]
    fn energy_tools_return_energy() {
        let tool = Item::tool(ItemId(3), "Battery", ItemType::Energy, EffectFamily::Shield, Rarity::Common);
        assert_eq!(tool_profile(&tool, 100).unwrap().energy_gain, 2);
    }

    #[test]
    fn malformed_tool_is_rejected() {
        let mut tool = Item::tool(ItemId(4), "Broken", ItemType::Speed, EffectFamily::Charge, Rarity::Common);
        tool.family = None;
        assert_eq!(
            tool_profile(&tool, 100),
            Err(ItemDataError::MissingFamily { item: ItemId(4) })
        );
        let fallback = ItemEffectProfile::fallback(ItemCategory::Tool);
        assert!(fallback.fallback);
        assert_eq!(fallback.timed.unwrap().duration, 1);
    }

    #[test]
    fn spell_damage_scales_with_caster_magic() {
        let spell = Item::spell(ItemId(5), "Bolt", ItemType::Strength, EffectFamily::Surge, Rarity::Common);
        // 20 × 100% × 2.5
        assert_eq!(spell_profile(&spell, &caster(0), 100).unwrap().damage, 50);
        // 20 × 130% = 26, × 2.5 = 65
        assert_eq!(spell_profile(&spell, &caster(2), 100).unwrap().damage, 65);
    }

    #[test]
    fn charge_spell_delays_damage() {
        let spell = Item::spell(ItemId(6), "Storm", ItemType::Magic, EffectFamily::Charge, Rarity::Common);
        let profile = spell_profile(&spell, &caster(0), 100).unwrap();
        assert_eq!(profile.damage, 0);
        let effect = profile.timed.unwrap();
        assert_eq!(effect.health_effect, -35);
        assert_eq!(effect.duration, 1);
    }

    #[test]
    fn tool_used_as_spell_is_malformed() {
        let tool = Item::tool(ItemId(7), "Rope", ItemType::Speed, EffectFamily::Echo, Rarity::Common);
        assert!(matches!(
            spell_profile(&tool, &caster(0), 100),
            Err(ItemDataError::WrongCategory { .. })
        ));
    }

    #[test]
    fn synergy_is_symmetric() {
        assert!(families_synergize(EffectFamily::Drain, EffectFamily::Surge));
        assert!(families_synergize(EffectFamily::Surge, EffectFamily::Drain));
        assert!(!families_synergize(EffectFamily::Surge, EffectFamily::Shield));
    }
}
