//! Session configuration
//!
//! Rule constants (board size, line table, gravity curve) are fixed in
//! [`crate::types`]. What a host may tune lives here: the RNG seed, how the next
//! piece is chosen, and the per-row drop bonuses.

use serde::{Deserialize, Serialize};

use crate::types::{HARD_DROP_POINTS, SOFT_DROP_POINTS};

/// How the next piece kind is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Randomizer {
    /// Each kind equally likely on every draw
    #[default]
    Uniform,
    /// Shuffled bags of all seven kinds
    Bag,
}

/// Points awarded per row travelled by player-initiated drops
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub soft_drop_per_row: u32,
    pub hard_drop_per_row: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            soft_drop_per_row: SOFT_DROP_POINTS,
            hard_drop_per_row: HARD_DROP_POINTS,
        }
    }
}

/// Everything needed to start a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seed: u32,
    pub randomizer: Randomizer,
    pub scoring: ScoringConfig,
}

impl GameConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            randomizer: Randomizer::default(),
            scoring: ScoringConfig::default(),
        }
    }
}
