//! Content factory for assembling match loadouts from data files.

use std::path::{Path, PathBuf};

use arena_core::Loadout;

use crate::difficulty::DifficultyTable;
use crate::items::ItemCatalog;
use crate::loaders::{DifficultyLoader, ItemLoader, LoadResult, RosterLoader, embedded};
use crate::roster::{CreatureSpec, instantiate_roster};

/// First id handed to the human roster and inventory.
pub const HUMAN_FIRST_ID: u32 = 1;

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── difficulty.toml
/// ├── items.ron
/// └── roster.ron
/// ```
///
/// Files missing from the directory fall back to the bundled defaults.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the human roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<CreatureSpec>> {
        let path = self.data_dir.join("roster.ron");
        if path.exists() {
            RosterLoader::load(&path)
        } else {
            embedded::roster()
        }
    }

    /// Load the human inventory from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        if path.exists() {
            ItemLoader::load(&path)
        } else {
            embedded::items()
        }
    }

    /// Load the difficulty table from `difficulty.toml`.
    pub fn load_difficulty(&self) -> LoadResult<DifficultyTable> {
        let path = self.data_dir.join("difficulty.toml");
        if path.exists() {
            DifficultyLoader::load(&path)
        } else {
            embedded::difficulty()
        }
    }

    /// Builds the human loadout: roster instances plus inventory.
    pub fn human_loadout(&self) -> LoadResult<Loadout> {
        let roster = instantiate_roster(&self.load_roster()?, HUMAN_FIRST_ID);
        let (tools, spells) = self.load_items()?.instantiate(HUMAN_FIRST_ID);
        Ok(Loadout::new(roster).with_items(tools, spells))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::CreatureId;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn empty_directory_uses_bundled_content() {
        let dir = TempDir::new().unwrap();
        let factory = ContentFactory::new(dir.path());

        let loadout = factory.human_loadout().unwrap();
        assert_eq!(loadout.roster.len(), 6);
        assert_eq!(loadout.roster[0].id, CreatureId(HUMAN_FIRST_ID));
        assert_eq!(loadout.tools.len(), 3);
        assert_eq!(
            factory.load_difficulty().unwrap(),
            DifficultyTable::standard()
        );
    }

    #[test]
    fn directory_files_take_precedence() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("roster.ron"),
            r#"RosterCatalog(creatures: [
                (species: "Solo", base: (strength: 1, magic: 1, stamina: 1, speed: 1, energy: 1)),
            ])"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        let loadout = factory.human_loadout().unwrap();
        assert_eq!(loadout.roster.len(), 1);
        assert_eq!(loadout.roster[0].species, "Solo");
    }
}
