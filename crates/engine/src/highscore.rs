//! High-score hooks supplied by the host.
//!
//! The engine only needs to read one value when a game starts and write one when a
//! game ends with a better score. Failures are reported to the caller, which treats
//! them as "no stored value" rather than stopping play.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score io error: {0}")]
    Io(#[from] io::Error),
    #[error("high score file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Key-value storage for best scores, keyed by game identifier
pub trait HighScoreStore {
    fn read_high_score(&self, game_id: &str) -> Result<Option<u32>, StoreError>;
    fn write_high_score(&mut self, game_id: &str, score: u32) -> Result<(), StoreError>;
}

/// In-process store, lost when the process exits
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryStore {
    fn read_high_score(&self, game_id: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.scores.get(game_id).copied())
    }

    fn write_high_score(&mut self, game_id: &str, score: u32) -> Result<(), StoreError> {
        self.scores.insert(game_id.to_string(), score);
        Ok(())
    }
}

/// JSON object `{ "<game_id>": score, ... }` in a single file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, u32>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl HighScoreStore for FileStore {
    fn read_high_score(&self, game_id: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.load()?.get(game_id).copied())
    }

    fn write_high_score(&mut self, game_id: &str, score: u32) -> Result<(), StoreError> {
        // A corrupt file is replaced; an unreadable one is left alone
        let mut scores = match self.load() {
            Ok(scores) => scores,
            Err(StoreError::Parse(_)) => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        scores.insert(game_id.to_string(), score);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&scores)?)?;
        Ok(())
    }
}
