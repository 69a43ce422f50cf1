//! The single controller object that owns a game.
//!
//! The host hands every timer callback and every input event to the controller,
//! which forwards them to the [`GameState`] in arrival order. On top of that it
//! wires the high-score hooks: the stored value is read when a game starts and
//! written when a game ends with a better score.

use log::{debug, info, warn};

use crate::config::EngineConfig;
use crate::core::{GameSnapshot, GameState};
use crate::highscore::HighScoreStore;
use crate::types::{Command, StepEvent};

pub struct Controller {
    game_id: String,
    state: GameState,
    store: Option<Box<dyn HighScoreStore>>,
    /// Best score known to be persisted (0 when nothing was stored)
    stored_high_score: u32,
}

impl Controller {
    /// Controller without a high-score store
    pub fn new(config: &EngineConfig, seed: u32) -> Self {
        Self {
            game_id: config.game_id.clone(),
            state: GameState::new(config.seed.unwrap_or(seed)),
            store: None,
            stored_high_score: 0,
        }
    }

    pub fn with_store(mut self, store: Box<dyn HighScoreStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    pub fn stored_high_score(&self) -> u32 {
        self.stored_high_score
    }

    /// Load the stored high score and spawn the first piece
    pub fn start(&mut self, now_ms: u64) -> &GameState {
        self.refresh_high_score();
        self.state.start(now_ms);
        info!(
            "game started (id={}, seed={}, high score {})",
            self.game_id,
            self.state.seed(),
            self.stored_high_score
        );
        &self.state
    }

    /// Advance gravity
    pub fn tick(&mut self, now_ms: u64) -> StepEvent {
        let was_over = self.state.game_over();
        let event = self.state.tick(now_ms);
        self.after_step(event, was_over);
        event
    }

    /// Apply one player command
    pub fn command(&mut self, command: Command) -> StepEvent {
        let was_over = self.state.game_over();
        let event = self.state.apply_command(command);

        if command == Command::Restart {
            self.refresh_high_score();
            info!("game restarted (episode {})", self.state.episode_id());
            return event;
        }

        self.after_step(event, was_over);
        event
    }

    fn after_step(&mut self, event: StepEvent, was_over: bool) {
        if event.locked {
            debug!(
                "piece locked: {} line(s), score {}, level {}",
                event.lines_cleared,
                self.state.score(),
                self.state.level()
            );
        }
        if event.game_over && !was_over {
            self.record_game_over();
        }
    }

    fn record_game_over(&mut self) {
        let score = self.state.score();
        info!(
            "game over: score {}, lines {}, level {}",
            score,
            self.state.lines(),
            self.state.level()
        );

        if score <= self.stored_high_score {
            return;
        }
        self.stored_high_score = score;

        if let Some(store) = self.store.as_mut() {
            match store.write_high_score(&self.game_id, score) {
                Ok(()) => info!("new high score {} saved", score),
                Err(e) => warn!("failed to save high score {}: {}", score, e),
            }
        }
    }

    /// Read the stored value; a missing hook, missing value, or failing read counts as 0
    fn refresh_high_score(&mut self) {
        let stored = match self.store.as_ref() {
            Some(store) => match store.read_high_score(&self.game_id) {
                Ok(value) => value.unwrap_or(0),
                Err(e) => {
                    warn!("failed to read high score, using 0: {}", e);
                    0
                }
            },
            None => 0,
        };

        self.stored_high_score = self.stored_high_score.max(stored);
        self.state.set_high_score(self.stored_high_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscore::{MemoryStore, StoreError};

    struct FailingStore;

    impl HighScoreStore for FailingStore {
        fn read_high_score(&self, _game_id: &str) -> Result<Option<u32>, StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        }

        fn write_high_score(&mut self, _game_id: &str, _score: u32) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        }
    }

    #[test]
    fn test_start_reads_stored_high_score() {
        let mut store = MemoryStore::new();
        store.write_high_score("tetris", 4200).unwrap();

        let mut controller =
            Controller::new(&EngineConfig::default(), 7).with_store(Box::new(store));
        controller.start(0);

        assert_eq!(controller.stored_high_score(), 4200);
        assert_eq!(controller.snapshot().high_score, 4200);
        assert!(controller.snapshot().active.is_some());
    }

    #[test]
    fn test_failing_store_counts_as_zero() {
        let mut controller =
            Controller::new(&EngineConfig::default(), 7).with_store(Box::new(FailingStore));
        controller.start(0);
        assert_eq!(controller.stored_high_score(), 0);

        // Play until the stack tops out; the failing write must not disturb the game
        let mut guard = 0;
        while !controller.state().game_over() && guard < 1000 {
            controller.command(Command::HardDrop);
            guard += 1;
        }
        assert!(controller.state().game_over());
    }

    #[test]
    fn test_seed_from_config_wins() {
        let config = EngineConfig {
            seed: Some(99),
            ..EngineConfig::default()
        };
        let a = Controller::new(&config, 1);
        let b = Controller::new(&config, 2);
        assert_eq!(a.state().next_piece(), b.state().next_piece());
        assert_eq!(a.state().seed(), b.state().seed());
    }
}
