//! Scoring module - line clear points, drop bonuses, level and gravity curves
//!
//! - Line clears award `LINE_SCORES[rows] * level`, using the level in effect
//!   *before* the clear's own lines are counted.
//! - Level is `1 + lines / 10`.
//! - Gravity interval is `max(80, 500 - (level - 1) * 40)` milliseconds.

use crate::config::ScoringConfig;
use crate::types::{BASE_FALL_MS, FALL_FLOOR_MS, FALL_STEP_MS, LINES_PER_LEVEL, LINE_SCORES};

/// Points for clearing `lines` rows with one lock at `level`.
/// Returns 0 for 0 rows or anything beyond a tetris.
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    match LINE_SCORES.get(lines) {
        Some(&base) => base.saturating_mul(level),
        None => 0,
    }
}

/// Drop bonus for `rows` travelled
/// soft_drop: +1 per row by default
/// hard_drop: +2 per row by default
pub fn calculate_drop_score(rows: u32, is_hard_drop: bool, scoring: &ScoringConfig) -> u32 {
    let per_row = if is_hard_drop {
        scoring.hard_drop_per_row
    } else {
        scoring.soft_drop_per_row
    };
    rows.saturating_mul(per_row)
}

/// Level management
/// Level starts at 1 and increases every 10 lines cleared
pub fn calculate_level(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level, in milliseconds per row
pub fn fall_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(FALL_STEP_MS);
    BASE_FALL_MS.saturating_sub(speedup).max(FALL_FLOOR_MS)
}
