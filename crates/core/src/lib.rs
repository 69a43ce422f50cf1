//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on UI, timers, storage, or I/O, making it:
//!
//! - **Deterministic**: Same seed and the same inputs produce identical games
//! - **Testable**: Every rule is reachable from plain function calls
//! - **Portable**: Any host (terminal, browser, headless) drives it the same way
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, collision validation, piece placement, line clearing
//! - [`pieces`]: shape matrices, the clockwise rotation transform, simple wall kicks
//! - [`rng`]: uniform random piece generation with a one-piece preview
//! - [`scoring`]: classic line-clear scoring, levels, and gravity pacing
//! - [`game_state`]: active piece, command processing, gravity tick, lock sequence
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::Command;
//!
//! let mut game = GameState::new(12345);
//! game.start(0);
//!
//! game.apply_command(Command::MoveRight);
//! game.apply_command(Command::Rotate);
//! let event = game.apply_command(Command::HardDrop);
//!
//! assert!(event.locked);
//! assert_eq!(game.score(), 0); // Nothing to clear on an empty board
//! ```
//!
//! # Timing
//!
//! The host calls [`GameState::tick`](game_state::GameState::tick) on a fixed cadence
//! with a monotonic timestamp in milliseconds. Gravity moves the piece once
//! `drop_interval_ms` has elapsed since the previous step (1000ms at level 1,
//! 50ms less per level, never below 100ms).

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, Tetromino};
pub use pieces::{get_shape, rotate, try_rotate, ShapeMatrix};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{calculate_score, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
