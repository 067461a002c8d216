//! Pieces module - tetromino geometry table
//!
//! Every kind stores an ordered list of 4x4 masks, one per distinct rotation
//! state. Rotation indices cycle through that list, so I/S/Z have two states,
//! O has one and T/J/L have four.
//!
//! Offsets are `(dx, dy)` from the piece anchor (top-left of the 4x4 box),
//! listed in row-major order.

use crate::types::PieceKind;

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

const I_SHAPES: [PieceShape; 2] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
];

const O_SHAPES: [PieceShape; 1] = [[(1, 0), (2, 0), (1, 1), (2, 1)]];

const T_SHAPES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_SHAPES: [PieceShape; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const Z_SHAPES: [PieceShape; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

const J_SHAPES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// All rotation states of a kind, in cycling order
pub fn shapes(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    }
}

/// Number of distinct rotation states for a kind
pub fn rotation_count(kind: PieceKind) -> u8 {
    shapes(kind).len() as u8
}

/// Get the shape (mino offsets) for a piece kind and rotation index
///
/// # Panics
///
/// Panics if `rotation >= rotation_count(kind)`. Rotation indices only ever come
/// from [`next_rotation`] or spawn (0), so this is a caller bug.
pub fn get_shape(kind: PieceKind, rotation: u8) -> PieceShape {
    shapes(kind)[rotation as usize]
}

/// Rotation index after one clockwise step, wrapping at the kind's state count
pub fn next_rotation(kind: PieceKind, rotation: u8) -> u8 {
    (rotation + 1) % rotation_count(kind)
}

/// Initial shape for a new piece (rotation 0)
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, 0)
}

/// Largest `dy` among the shape's minos (its bottom row inside the 4x4 box)
pub fn bottom_offset(shape: &PieceShape) -> i8 {
    shape.iter().map(|&(_, dy)| dy).max().unwrap_or(0)
}
