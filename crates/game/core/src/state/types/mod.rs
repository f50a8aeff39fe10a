mod common;
mod creature;
mod difficulty;
mod effect;
mod item;
mod log;
mod side;

pub use common::{CreatureId, CreatureRef, ItemId, Side};
pub use creature::{AttackKind, BaseStats, BattleStats, Creature, StatKind};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use effect::{ActiveEffects, Effect, EffectKind, StatDeltas};
pub use item::{EffectFamily, Item, ItemCategory, ItemType, Rarity};
pub use log::LogEntry;
pub use side::{SideState, Zone};
