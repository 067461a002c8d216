//! Snapshot module - plain copy of the session for renderers and observers
//!
//! Board cells are stored as piece codes so the whole snapshot is `Copy` and
//! serializes to compact JSON.

use serde::Serialize;

use crate::game_state::Tetromino;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

/// Everything a host needs to draw one frame.
///
/// `board` holds [`PieceKind::code`] values, 0 for empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub paused: bool,
    pub game_over: bool,
    pub fall_interval_ms: u32,
    pub episode: u32,
    pub pieces_locked: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            score: 0,
            lines: 0,
            level: 1,
            paused: false,
            game_over: false,
            fall_interval_ms: 0,
            episode: 0,
            pieces_locked: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameConfig, GameState};

    #[test]
    fn snapshot_serializes_for_observers() {
        let state = GameState::new(GameConfig::with_seed(5));
        let value = serde_json::to_value(state.snapshot()).unwrap();

        assert_eq!(value["board"].as_array().unwrap().len(), BOARD_HEIGHT as usize);
        assert_eq!(value["level"], 1);
        assert_eq!(value["active"]["y"], -2);
        assert_eq!(value["next"], state.next_piece().as_str());
        assert_eq!(value["game_over"], false);
    }
}
