//! Host-facing side of the game: one controller per game, high-score hooks,
//! environment configuration and a fixed-cadence tick driver.
//!
//! ```
//! use blockfall_engine::{Controller, EngineConfig, MemoryStore};
//! use blockfall_engine::types::Command;
//!
//! let config = EngineConfig::default();
//! let mut controller = Controller::new(&config, 42).with_store(Box::new(MemoryStore::new()));
//! controller.start(0);
//! controller.command(Command::HardDrop);
//! controller.tick(16);
//! assert!(controller.snapshot().active.is_some());
//! ```

pub mod config;
pub mod controller;
pub mod driver;
pub mod highscore;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use config::EngineConfig;
pub use controller::Controller;
pub use driver::Driver;
pub use highscore::{FileStore, HighScoreStore, MemoryStore, StoreError};
