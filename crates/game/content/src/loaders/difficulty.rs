//! Difficulty table loader.

use std::path::Path;

use crate::difficulty::DifficultyTable;
use crate::loaders::{LoadResult, read_file};

/// Loader for difficulty tables from TOML files.
pub struct DifficultyLoader;

impl DifficultyLoader {
    /// Load a difficulty table from a TOML file.
    ///
    /// Tiers absent from the file keep their standard values.
    pub fn load(path: &Path) -> LoadResult<DifficultyTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<DifficultyTable> {
        let table: DifficultyTable = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse difficulty TOML: {}", e))?;

        for (name, profile) in [
            ("easy", table.easy),
            ("medium", table.medium),
            ("hard", table.hard),
            ("expert", table.expert),
        ] {
            if profile.field_capacity == 0
                || profile.field_capacity > arena_core::BattleConfig::MAX_FIELD_SLOTS
            {
                anyhow::bail!(
                    "Difficulty tier {} has field capacity {} (expected 1..={})",
                    name,
                    profile.field_capacity,
                    arena_core::BattleConfig::MAX_FIELD_SLOTS
                );
            }
            if profile.multi_action_pct > 100 {
                anyhow::bail!(
                    "Difficulty tier {} has multi-action chance {}% (expected 0..=100)",
                    name,
                    profile.multi_action_pct
                );
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::Difficulty;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn partial_override_keeps_other_tiers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("difficulty.toml");
        fs::write(
            &path,
            r#"
[hard]
field_capacity = 6
initial_hand_size = 4
energy_regen_bonus = -1
multi_action_pct = 90
deck_size = 9
"#,
        )
        .unwrap();

        let table = DifficultyLoader::load(&path).unwrap();
        let hard = table.profile(Difficulty::Hard);
        assert_eq!(hard.field_capacity, 6);
        assert_eq!(hard.energy_regen_bonus, -1);
        assert_eq!(
            table.profile(Difficulty::Easy),
            DifficultyTable::standard().easy
        );
    }

    #[test]
    fn rejects_capacity_beyond_storage() {
        let err = DifficultyLoader::parse(
            r#"
[easy]
field_capacity = 9
initial_hand_size = 2
energy_regen_bonus = 0
multi_action_pct = 10
deck_size = 5
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("field capacity"));
    }
}
