//! Content bundled into the binary, used when no data directory is given.

use crate::difficulty::DifficultyTable;
use crate::items::ItemCatalog;
use crate::loaders::{DifficultyLoader, ItemLoader, LoadResult, RosterLoader};
use crate::roster::CreatureSpec;

const ROSTER_RON: &str = include_str!("../../data/roster.ron");
const ITEMS_RON: &str = include_str!("../../data/items.ron");
const DIFFICULTY_TOML: &str = include_str!("../../data/difficulty.toml");

pub fn roster() -> LoadResult<Vec<CreatureSpec>> {
    RosterLoader::parse(ROSTER_RON)
}

pub fn items() -> LoadResult<ItemCatalog> {
    ItemLoader::parse(ITEMS_RON)
}

pub fn difficulty() -> LoadResult<DifficultyTable> {
    DifficultyLoader::parse(DIFFICULTY_TOML)
}
