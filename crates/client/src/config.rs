//! Client configuration from environment variables.
use std::env;
use std::path::PathBuf;

use arena_core::Difficulty;

/// Settings shared by every client run. Command-line flags override these.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory holding `roster.ron`, `items.ron` and `difficulty.toml`.
    pub data_dir: PathBuf,
    pub difficulty: Difficulty,
    /// Print the summary as JSON instead of text.
    pub json_summary: bool,
    /// Suppress the live log feed.
    pub quiet: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            difficulty: Difficulty::default(),
            json_summary: false,
            quiet: false,
        }
    }
}

impl ClientConfig {
    /// Environment variables:
    /// - `ARENA_DATA_DIR` - content directory (default: `data`)
    /// - `ARENA_DIFFICULTY` - easy, medium, hard or expert (default: medium)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("ARENA_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(difficulty) = read_env::<Difficulty>("ARENA_DIFFICULTY") {
            config.difficulty = difficulty;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
