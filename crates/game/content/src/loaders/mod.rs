//! Content loaders for reading battle data from files.
//!
//! Rosters and item catalogs are RON, the difficulty table is TOML. Each
//! loader can also parse an in-memory string, which is how the bundled
//! defaults in [`embedded`] are read.

pub mod difficulty;
pub mod embedded;
pub mod factory;
pub mod item;
pub mod roster;

pub use difficulty::DifficultyLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use roster::{RosterCatalog, RosterLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
