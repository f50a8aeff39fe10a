//! Difficulty tiers and the rule parameters captured at battle start.

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
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Item effect power scaling in percent for items used at this tier.
    pub const fn effect_power_pct(self) -> u32 {
        match self {
            Self::Easy => 90,
            Self::Medium => 100,
            Self::Hard => 110,
            Self::Expert => 120,
        }
    }

    /// Whether the opponent plans whole action sequences at this tier.
    pub const fn plans_sequences(self) -> bool {
        matches!(self, Self::Hard | Self::Expert)
    }
}

/// Opponent tuning for one tier.
///
/// Produced by the difficulty table collaborator and snapshotted into the
/// match state when the battle starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyProfile {
    pub field_capacity: usize,
    pub initial_hand_size: usize,
    /// Added to the opponent's regeneration each turn (may be negative).
    pub energy_regen_bonus: i32,
    /// Chance, in percent, that the opponent chains another action.
    pub multi_action_pct: u32,
    pub deck_size: usize,
}

impl DifficultyProfile {
    pub const fn new(
        field_capacity: usize,
        initial_hand_size: usize,
        energy_regen_bonus: i32,
        multi_action_pct: u32,
        deck_size: usize,
    ) -> Self {
        Self {
            field_capacity,
            initial_hand_size,
            energy_regen_bonus,
            multi_action_pct,
            deck_size,
        }
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::new(3, 3, 1, 30, 6)
    }
}
