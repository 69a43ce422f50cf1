//! Pieces module - tetromino shape matrices and the rotation system
//!
//! Every piece kind has a base shape matrix (square, at most 4x4). The shape for
//! each rotation state is derived by applying the 90° clockwise transform, and
//! the full table is built once at compile time.
//!
//! Rotation resolves collisions with a small kick list: the rotated shape is
//! tried in place, then one column left, then one column right.

use crate::types::{PieceKind, Rotation, BOARD_WIDTH};

/// Largest matrix side length (the I piece)
pub const MAX_DIM: usize = 4;

/// Offset of a single mino relative to the piece origin, as (column, row)
pub type MinoOffset = (i8, i8);

/// A small boolean shape matrix, row-major, `rows x cols` with `rows, cols <= 4`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_DIM]; MAX_DIM],
}

impl ShapeMatrix {
    /// Build a matrix from 0/1 rows; entries outside `rows x cols` are ignored
    pub const fn from_bits(rows: u8, cols: u8, src: [[u8; MAX_DIM]; MAX_DIM]) -> Self {
        let mut bits = [[false; MAX_DIM]; MAX_DIM];
        let mut r = 0;
        while r < rows as usize {
            let mut c = 0;
            while c < cols as usize {
                bits[r][c] = src[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self { rows, cols, bits }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether (col, row) is occupied; false outside the matrix
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.bits[row][col]
    }

    /// Occupied cells as (column, row) offsets, row by row
    pub fn minos(&self) -> impl Iterator<Item = MinoOffset> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.bits[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    /// Number of occupied cells
    pub fn count(&self) -> usize {
        self.minos().count()
    }
}

/// Rotate a shape 90° clockwise: `rotated[c][R-1-r] = shape[r][c]`
pub const fn rotate(shape: ShapeMatrix) -> ShapeMatrix {
    let rows = shape.rows as usize;
    let cols = shape.cols as usize;
    let mut bits = [[false; MAX_DIM]; MAX_DIM];
    let mut r = 0;
    while r < rows {
        let mut c = 0;
        while c < cols {
            bits[c][rows - 1 - r] = shape.bits[r][c];
            c += 1;
        }
        r += 1;
    }
    ShapeMatrix {
        rows: shape.cols,
        cols: shape.rows,
        bits,
    }
}

const I_BASE: ShapeMatrix =
    ShapeMatrix::from_bits(4, 4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]);
const O_BASE: ShapeMatrix =
    ShapeMatrix::from_bits(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const T_BASE: ShapeMatrix =
    ShapeMatrix::from_bits(3, 3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const S_BASE: ShapeMatrix =
    ShapeMatrix::from_bits(3, 3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]);
const Z_BASE: ShapeMatrix =
    ShapeMatrix::from_bits(3, 3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]);
const J_BASE: ShapeMatrix =
    ShapeMatrix::from_bits(3, 3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);
const L_BASE: ShapeMatrix =
    ShapeMatrix::from_bits(3, 3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]);

/// Base (spawn orientation) shape for a piece kind
pub const fn base_shape(kind: PieceKind) -> ShapeMatrix {
    match kind {
        PieceKind::I => I_BASE,
        PieceKind::O => O_BASE,
        PieceKind::T => T_BASE,
        PieceKind::S => S_BASE,
        PieceKind::Z => Z_BASE,
        PieceKind::J => J_BASE,
        PieceKind::L => L_BASE,
    }
}

const fn rotations_of(kind: PieceKind) -> [ShapeMatrix; 4] {
    let north = base_shape(kind);
    let east = rotate(north);
    let south = rotate(east);
    let west = rotate(south);
    [north, east, south, west]
}

/// All 28 shape matrices, indexed by `[kind as usize][rotation.quarter_turns()]`
pub const SHAPE_TABLE: [[ShapeMatrix; 4]; 7] = [
    rotations_of(PieceKind::I),
    rotations_of(PieceKind::O),
    rotations_of(PieceKind::T),
    rotations_of(PieceKind::S),
    rotations_of(PieceKind::Z),
    rotations_of(PieceKind::J),
    rotations_of(PieceKind::L),
];

/// Get the shape matrix for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> &'static ShapeMatrix {
    &SHAPE_TABLE[kind as usize][rotation.quarter_turns()]
}

/// Canonical spawn origin for a piece kind: horizontally centered, top row
pub fn spawn_position(kind: PieceKind) -> (i8, i8) {
    let cols = base_shape(kind).cols() as i8;
    ((BOARD_WIDTH / 2) as i8 - cols / 2, 0)
}

/// Horizontal offsets tried, in order, after a rotation
pub const KICK_OFFSETS: [i8; 3] = [0, -1, 1];

/// Try to rotate a piece clockwise with the simple kick list.
///
/// `is_valid(shape, x, y)` decides whether a candidate fits.
/// Returns `Some((new_rotation, new_x))` for the first candidate that fits, `None` otherwise.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    is_valid: impl Fn(&ShapeMatrix, i8, i8) -> bool,
) -> Option<(Rotation, i8)> {
    let new_rotation = rotation.rotate_cw();
    let new_shape = get_shape(kind, new_rotation);

    KICK_OFFSETS
        .iter()
        .map(|&dx| x + dx)
        .find(|&new_x| is_valid(new_shape, new_x, y))
        .map(|new_x| (new_rotation, new_x))
}
