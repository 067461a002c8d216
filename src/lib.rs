//! Blockfall (workspace facade crate).
//!
//! Re-exports the engine crates under `blockfall::{core, types}` and carries the
//! host-side pieces that need a real clock.

pub mod clock;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use clock::FrameClock;
