//! Builds the opening of a match from content on disk.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use arena_content::{ContentFactory, opponent_loadout};
use arena_core::{Difficulty, StartBattleAction};

/// Loads the human loadout and difficulty table from `factory`, then
/// generates a seeded opponent for `difficulty`.
pub fn start_action(
    factory: &ContentFactory,
    difficulty: Difficulty,
    seed: u64,
) -> Result<StartBattleAction> {
    let human = factory
        .human_loadout()
        .with_context(|| format!("loading content from {}", factory.data_dir().display()))?;
    let rules = factory.load_difficulty()?.profile(difficulty);

    let mut rng = SmallRng::seed_from_u64(seed);
    let opponent = opponent_loadout(difficulty, &rules, &human.roster, &mut rng);

    tracing::info!(
        %difficulty,
        human_units = human.roster.len(),
        opponent_units = opponent.roster.len(),
        opponent_items = opponent.tools.len() + opponent.spells.len(),
        "match prepared"
    );

    Ok(StartBattleAction::new(difficulty, rules, human, opponent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_files_use_bundled_content() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        let start = start_action(&factory, Difficulty::Hard, 3).unwrap();

        assert!(!start.human.roster.is_empty());
        assert_eq!(start.opponent.roster.len(), start.rules.deck_size);
    }

    #[test]
    fn difficulty_file_overrides_tier() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("difficulty.toml"),
            "[easy]\nfield_capacity = 2\ninitial_hand_size = 1\nenergy_regen_bonus = 0\nmulti_action_pct = 0\ndeck_size = 3\n",
        )
        .unwrap();
        let factory = ContentFactory::new(dir.path());
        let start = start_action(&factory, Difficulty::Easy, 1).unwrap();

        assert_eq!(start.rules.field_capacity, 2);
        assert_eq!(start.opponent.roster.len(), 3);
    }

    #[test]
    fn broken_roster_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("roster.ron"), "not ron").unwrap();
        let factory = ContentFactory::new(dir.path());
        assert!(start_action(&factory, Difficulty::Medium, 1).is_err());
    }
}
