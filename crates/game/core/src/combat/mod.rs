//! Combat resolution system.
//!
//! Pure functions for resolving attacks, tool uses, spell casts and defend
//! stances. Nothing here touches match state; the action transitions call
//! these and commit the results.
//!
//! # Core Functions
//!
//! - `resolve_attack`: damage from the stronger attack channel, combo scaled
//! - `tool_profile` / `spell_profile`: item effect tables
//! - `resolve_tool` / `resolve_spell`: apply a profile to participants
//! - `resolve_defend`: raise the defend flag

pub mod damage;
pub mod items;
pub mod resolve;

pub use damage::{MINIMUM_DAMAGE, calculate_damage, combo_multiplier_pct, scale_pct};
pub use items::{
    ItemDataError, ItemEffectProfile, families_synergize, magic_pct, power_pct, spell_profile,
    tool_profile,
};
pub use resolve::{
    AttackResolution, SpellResolution, ToolResolution, resolve_attack, resolve_defend,
    resolve_spell, resolve_tool,
};
