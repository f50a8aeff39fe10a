//! Difficulty tiers and their opponent tuning.

use arena_core::{Difficulty, DifficultyProfile};

/// Per-tier opponent tuning.
///
/// Every tier is optional in a TOML override; missing tiers keep the
/// standard values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DifficultyTable {
    pub easy: DifficultyProfile,
    pub medium: DifficultyProfile,
    pub hard: DifficultyProfile,
    pub expert: DifficultyProfile,
}

impl DifficultyTable {
    /// Field capacity, initial hand, regen bonus, multi-action chance, deck size.
    pub const fn standard() -> Self {
        Self {
            easy: DifficultyProfile::new(3, 2, 0, 10, 5),
            medium: DifficultyProfile::new(3, 3, 1, 30, 6),
            hard: DifficultyProfile::new(4, 3, 2, 50, 7),
            expert: DifficultyProfile::new(5, 4, 3, 70, 8),
        }
    }

    pub fn profile(&self, difficulty: Difficulty) -> DifficultyProfile {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Expert => self.expert,
        }
    }

    pub fn set_profile(&mut self, difficulty: Difficulty, profile: DifficultyProfile) {
        match difficulty {
            Difficulty::Easy => self.easy = profile,
            Difficulty::Medium => self.medium = profile,
            Difficulty::Hard => self.hard = profile,
            Difficulty::Expert => self.expert = profile,
        }
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tiers_grow_harder() {
        let table = DifficultyTable::standard();
        let easy = table.profile(Difficulty::Easy);
        let expert = table.profile(Difficulty::Expert);

        assert!(expert.field_capacity > easy.field_capacity);
        assert!(expert.multi_action_pct > easy.multi_action_pct);
        assert!(expert.deck_size > easy.deck_size);
        assert_eq!(table.profile(Difficulty::Medium), DifficultyProfile::default());
    }

    #[test]
    fn overrides_single_tier() {
        let mut table = DifficultyTable::default();
        table.set_profile(Difficulty::Hard, DifficultyProfile::new(2, 2, -1, 0, 3));
        assert_eq!(table.profile(Difficulty::Hard).energy_regen_bonus, -1);
        assert_eq!(table.easy, DifficultyTable::standard().easy);
    }
}
