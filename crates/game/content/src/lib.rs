//! Battle content: stat derivation, difficulty tuning, opponent generation
//! and RON/TOML loaders.
//!
//! Content feeds the match setup and never appears in battle rules. All
//! loaders use arena-core types directly with serde for deserialization.

pub mod difficulty;
pub mod generate;
pub mod items;
pub mod roster;
pub mod stats;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use difficulty::DifficultyTable;
pub use generate::{
    GeneratedItems, OPPONENT_ID_BASE, generate_opponent_items, generate_opponent_roster,
    opponent_loadout,
};
pub use items::{ItemCatalog, ItemSpec};
pub use roster::{CreatureSpec, instantiate_roster};
pub use stats::derive_stats;

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, DifficultyLoader, ItemLoader, LoadResult, RosterLoader};
