//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`] values. Hosts send
//! each mapped command straight to the controller; there is no key-repeat state
//! here, terminal auto-repeat is passed through as repeated commands.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
