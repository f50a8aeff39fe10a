//! Item catalog loader.

use std::path::Path;

use crate::items::ItemCatalog;
use crate::loaders::{LoadResult, read_file};

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load tools and spells from a RON file containing an [`ItemCatalog`].
    ///
    /// Unknown type or family tags are not a parse error; they surface as
    /// malformed items and get the default effect in battle.
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{EffectFamily, ItemType};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_catalog_with_malformed_entry() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.ron");
        fs::write(
            &path,
            r#"ItemCatalog(
                tools: [
                    (name: "Power Gauntlet", item_type: Some("strength"), family: Some("surge")),
                    (name: "Odd Trinket", item_type: Some("plasma")),
                ],
            )"#,
        )
        .unwrap();

        let catalog = ItemLoader::load(&path).unwrap();
        assert_eq!(catalog.tools.len(), 2);
        assert!(catalog.spells.is_empty());
        assert_eq!(catalog.tools[0].item_type(), Some(ItemType::Strength));
        assert_eq!(catalog.tools[0].family(), Some(EffectFamily::Surge));
        assert_eq!(catalog.tools[1].item_type(), None);
        assert_eq!(catalog.tools[1].family(), None);
    }

    #[test]
    fn syntax_errors_are_reported() {
        assert!(ItemLoader::parse("ItemCatalog(tools: [").is_err());
    }
}
