//! Roster loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::roster::CreatureSpec;

/// Roster structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterCatalog {
    pub creatures: Vec<CreatureSpec>,
}

/// Loader for creature rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file containing a [`RosterCatalog`].
    pub fn load(path: &Path) -> LoadResult<Vec<CreatureSpec>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CreatureSpec>> {
        let catalog: RosterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        if catalog.creatures.is_empty() {
            anyhow::bail!("Roster must contain at least one creature");
        }
        Ok(catalog.creatures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_roster_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roster.ron");
        fs::write(
            &path,
            r#"RosterCatalog(creatures: [
                (species: "Emberling", base: (strength: 6, magic: 3, stamina: 4, speed: 5, energy: 3)),
                (species: "Tidepup", form_level: 2, base: (strength: 3, magic: 6, stamina: 5, speed: 3, energy: 4)),
            ])"#,
        )
        .unwrap();

        let specs = RosterLoader::load(&path).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].form_level, 0);
        assert_eq!(specs[1].species, "Tidepup");
        assert_eq!(specs[1].form_level, 2);
    }

    #[test]
    fn rejects_empty_roster() {
        let err = RosterLoader::parse("RosterCatalog(creatures: [])").unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.ron");
        let err = RosterLoader::load(&path).unwrap_err();
        assert!(err.to_string().contains("nope.ron"));
    }
}
