//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name and carries the small terminal
//! renderer used by the `blockfall` binary.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_types as types;

pub mod term;
