//! Consumable tools and spells.

use super::common::ItemId;

/// Which attribute an item is themed around.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ItemType {
    Energy,
    Strength,
    Magic,
    Stamina,
    Speed,
}

/// Named effect shape applied by an item.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectFamily {
    /// Strong short burst.
    Surge,
    /// Defense plus heal over several turns.
    Shield,
    /// Small repeating tick.
    Echo,
    /// Offense-for-defense conversion with self-heal.
    Drain,
    /// Delayed or escalating payoff.
    Charge,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Effect power scaling in percent.
    pub const fn power_pct(self) -> u32 {
        match self {
            Self::Common => 100,
            Self::Rare => 110,
            Self::Epic => 120,
            Self::Legendary => 130,
        }
    }
}

/// Whether an item is a tool (free, own field) or a spell (costs energy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemCategory {
    Tool,
    Spell,
}

/// A consumable item.
///
/// `item_type` and `family` are optional because item data arrives from
/// outside the core; a missing tag marks the item as malformed and a
/// conservative default effect is used instead.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    pub item_type: Option<ItemType>,
    pub family: Option<EffectFamily>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
}

impl Item {
    pub fn tool(
        id: ItemId,
        name: impl Into<String>,
        item_type: ItemType,
        family: EffectFamily,
        rarity: Rarity,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: ItemCategory::Tool,
            item_type: Some(item_type),
            family: Some(family),
            rarity,
        }
    }

    pub fn spell(
        id: ItemId,
        name: impl Into<String>,
        item_type: ItemType,
        family: EffectFamily,
        rarity: Rarity,
    ) -> Self {
        Self {
            category: ItemCategory::Spell,
            ..Self::tool(id, name, item_type, family, rarity)
        }
    }
}
