//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules and session state. It has no
//! dependency on rendering, input devices, audio or wall-clock time, making it:
//!
//! - **Deterministic**: same seed and same calls give the same game
//! - **Testable**: gravity takes elapsed time as a parameter, no real waits
//! - **Portable**: any host (terminal, GUI, headless bot) can drive it
//!
//! # Module Structure
//!
//! - [`pieces`]: geometry table, rotation states per kind
//! - [`board`]: 10x20 grid, line clearing
//! - [`placement`]: collision checks and hard-drop projection
//! - [`game_state`]: the session: active piece, commands, gravity, scoring
//! - [`rng`]: seeded next-piece source (uniform or 7-bag)
//! - [`scoring`]: line clear table, drop bonuses, level and gravity curves
//! - [`config`]: host-tunable session settings
//! - [`snapshot`]: plain copy of the state for renderers and observers
//!
//! # Game Rules
//!
//! - **Spawn**: anchor (3, -2), rotation 0; a spawn with no room ends the game
//! - **Rotation**: one direction, horizontal kicks tried in order 0, -1, +1, -2, +2
//! - **Soft drop**: +1 per row, locks immediately when resting (no lock delay)
//! - **Hard drop**: +2 per row, always locks
//! - **Line clears**: 100/300/500/800 times the current level
//! - **Level**: 1 + lines / 10; gravity `max(80, 500 - (level - 1) * 40)` ms per row
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameState};
//! use blockfall_core::types::GameAction;
//!
//! let mut game = GameState::new(GameConfig::with_seed(12345));
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//!
//! // Host frame loop: feed elapsed milliseconds.
//! game.update(16);
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{GameConfig, Randomizer, ScoringConfig};
pub use game_state::{GameState, LockEvent, Phase, Tetromino};
pub use pieces::{get_shape, next_rotation, rotation_count};
pub use placement::{can_place, hard_drop_y};
pub use rng::{PieceSource, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_level, calculate_line_score, fall_interval_ms};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
