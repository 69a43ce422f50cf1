//! Host configuration read from the environment.

use std::env;
use std::path::PathBuf;

use crate::types::TICK_MS;

/// Default key under which the high score is stored
pub const DEFAULT_GAME_ID: &str = "tetris";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// RNG seed; `None` lets the host pick one
    pub seed: Option<u32>,
    /// Key for the high-score store
    pub game_id: String,
    /// JSON file for high scores; `None` keeps them in memory
    pub high_score_path: Option<PathBuf>,
    /// Driver cadence in milliseconds
    pub tick_ms: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            game_id: DEFAULT_GAME_ID.to_string(),
            high_score_path: None,
            tick_ms: TICK_MS,
        }
    }
}

impl EngineConfig {
    /// Read `BLOCKFALL_*` variables, falling back to defaults for anything
    /// missing or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("BLOCKFALL_SEED").and_then(|s| s.trim().parse().ok());

        let game_id = lookup("BLOCKFALL_GAME_ID")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.game_id);

        let high_score_path = lookup("BLOCKFALL_HIGHSCORE_PATH")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        let tick_ms = lookup("BLOCKFALL_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(defaults.tick_ms);

        Self {
            seed,
            game_id,
            high_score_path,
            tick_ms,
        }
    }
}
