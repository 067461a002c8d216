//! Placement rules - collision checks and the hard-drop projection
//!
//! A mino above the visible board (absolute y < 0) never blocks placement, whatever
//! its column. Pieces spawn partially above the grid and must be able to slide
//! there before they enter it.

use crate::board::Board;
use crate::pieces::get_shape;
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Whether a piece of `kind` at `rotation` fits with its anchor at (x, y)
pub fn can_place(board: &Board, kind: PieceKind, rotation: u8, x: i8, y: i8) -> bool {
    get_shape(kind, rotation).iter().all(|&(dx, dy)| {
        let (px, py) = (x + dx, y + dy);
        if py < 0 {
            return true;
        }
        px >= 0
            && px < BOARD_WIDTH as i8
            && py < BOARD_HEIGHT as i8
            && !board.is_occupied(px, py)
    })
}

/// Lowest anchor row reachable by dropping straight down from (x, y).
///
/// Probes one row at a time and stops at the first row that does not fit, so the
/// result is `y` itself when the piece is already resting.
pub fn hard_drop_y(board: &Board, kind: PieceKind, rotation: u8, x: i8, y: i8) -> i8 {
    let mut landing = y;
    while can_place(board, kind, rotation, x, landing + 1) {
        landing += 1;
    }
    landing
}
