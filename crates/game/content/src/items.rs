//! Item entries as authored in content files.

use arena_core::{EffectFamily, Item, ItemCategory, ItemId, ItemType, Rarity};

/// Item entry with loosely typed tags.
///
/// Tags are parsed case-insensitively. An unknown or missing type or family
/// is kept as `None` on the resulting [`Item`], which the battle rules treat
/// as malformed data and replace with a conservative default effect. An
/// unknown rarity falls back to common.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub item_type: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub family: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Option<String>,
}

impl ItemSpec {
    pub fn new(name: impl Into<String>, item_type: &str, family: &str, rarity: &str) -> Self {
        Self {
            name: name.into(),
            item_type: Some(item_type.to_owned()),
            family: Some(family.to_owned()),
            rarity: Some(rarity.to_owned()),
        }
    }

    pub fn item_type(&self) -> Option<ItemType> {
        self.item_type.as_deref().and_then(|tag| tag.parse().ok())
    }

    pub fn family(&self) -> Option<EffectFamily> {
        self.family.as_deref().and_then(|tag| tag.parse().ok())
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
            .as_deref()
            .and_then(|tag| tag.parse().ok())
            .unwrap_or_default()
    }

    pub fn to_item(&self, id: ItemId, category: ItemCategory) -> Item {
        Item {
            id,
            name: self.name.clone(),
            category,
            item_type: self.item_type(),
            family: self.family(),
            rarity: self.rarity(),
        }
    }
}

/// Tools and spells one side carries, as authored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemCatalog {
    #[cfg_attr(feature = "serde", serde(default))]
    pub tools: Vec<ItemSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub spells: Vec<ItemSpec>,
}

impl ItemCatalog {
    /// Builds inventory items with ids counting up from `first_id`, tools first.
    pub fn instantiate(&self, first_id: u32) -> (Vec<Item>, Vec<Item>) {
        let tools: Vec<Item> = self
            .tools
            .iter()
            .zip(first_id..)
            .map(|(spec, id)| spec.to_item(ItemId(id), ItemCategory::Tool))
            .collect();
        let spell_base = first_id + tools.len() as u32;
        let spells = self
            .spells
            .iter()
            .zip(spell_base..)
            .map(|(spec, id)| spec.to_item(ItemId(id), ItemCategory::Spell))
            .collect();
        (tools, spells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_case_insensitively() {
        let spec = ItemSpec::new("Power Gauntlet", "Strength", "SURGE", "epic");
        assert_eq!(spec.item_type(), Some(ItemType::Strength));
        assert_eq!(spec.family(), Some(EffectFamily::Surge));
        assert_eq!(spec.rarity(), Rarity::Epic);
    }

    #[test]
    fn unknown_tags_become_malformed_items() {
        let spec = ItemSpec {
            name: "Mystery Box".into(),
            item_type: Some("fire".into()),
            family: None,
            rarity: Some("mythic".into()),
        };
        let item = spec.to_item(ItemId(9), ItemCategory::Tool);
        assert_eq!(item.item_type, None);
        assert_eq!(item.family, None);
        assert_eq!(item.rarity, Rarity::Common);
    }

    #[test]
    fn catalog_ids_do_not_overlap() {
        let catalog = ItemCatalog {
            tools: vec![ItemSpec::new("A", "speed", "echo", "common")],
            spells: vec![
                ItemSpec::new("B", "magic", "drain", "rare"),
                ItemSpec::new("C", "energy", "charge", "rare"),
            ],
        };
        let (tools, spells) = catalog.instantiate(10);
        assert_eq!(tools[0].id, ItemId(10));
        assert_eq!(spells[0].id, ItemId(11));
        assert_eq!(spells[1].id, ItemId(12));
        assert_eq!(spells[1].category, ItemCategory::Spell);
    }
}
