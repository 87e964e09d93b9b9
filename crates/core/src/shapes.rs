//! Shapes module - piece masks and the kick-based rotation system
//!
//! Every piece lives in a 4x4 box anchored at its top-left corner. A mask is
//! the list of `(row, col)` offsets of its four blocks inside that box, rows
//! growing downward. Rotation states follow SRS; kick offsets are stored as
//! `(col, row)` in the same downward orientation.
//!
//! Reference: https://tetris.wiki/SRS

use crate::types::{Rotation, ShapeKind, Spin, HIDDEN_ROWS};

/// Offset of a single block relative to the piece anchor, `(row, col)`
pub type CellOffset = (i8, i8);

/// Occupancy mask of one rotation state
pub type ShapeMask = [CellOffset; 4];

/// Anchor translation tried during a rotation, `(col, row)`
pub type Kick = (i8, i8);

/// Position of a piece's 4x4 box on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Anchor {
    pub row: i8,
    pub col: i8,
}

impl Anchor {
    pub fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Translate by a column/row delta
    pub fn shifted(self, d_col: i8, d_row: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }
}

/// Anchor column new pieces spawn at
pub const SPAWN_COL: i8 = 3;

/// Get the mask for a piece kind and rotation
pub fn rotation_mask(kind: ShapeKind, rotation: Rotation) -> ShapeMask {
    match kind {
        ShapeKind::I => i_mask(rotation),
        ShapeKind::J => j_mask(rotation),
        ShapeKind::L => l_mask(rotation),
        ShapeKind::O => O_MASK,
        ShapeKind::S => s_mask(rotation),
        ShapeKind::T => t_mask(rotation),
        ShapeKind::Z => z_mask(rotation),
    }
}

fn i_mask(rotation: Rotation) -> ShapeMask {
    match rotation {
        // horizontal on the second row
        Rotation::Zero => [(1, 0), (1, 1), (1, 2), (1, 3)],
        // vertical on the third column
        Rotation::R => [(0, 2), (1, 2), (2, 2), (3, 2)],
        Rotation::Two => [(2, 0), (2, 1), (2, 2), (2, 3)],
        Rotation::L => [(0, 1), (1, 1), (2, 1), (3, 1)],
    }
}

/// O piece mask (same for all rotations)
const O_MASK: ShapeMask = [(0, 1), (0, 2), (1, 1), (1, 2)];

fn t_mask(rotation: Rotation) -> ShapeMask {
    match rotation {
        Rotation::Zero => [(0, 1), (1, 0), (1, 1), (1, 2)],
        Rotation::R => [(0, 1), (1, 1), (1, 2), (2, 1)],
        Rotation::Two => [(1, 0), (1, 1), (1, 2), (2, 1)],
        Rotation::L => [(0, 1), (1, 0), (1, 1), (2, 1)],
    }
}

fn s_mask(rotation: Rotation) -> ShapeMask {
    match rotation {
        Rotation::Zero => [(0, 1), (0, 2), (1, 0), (1, 1)],
        Rotation::R => [(0, 1), (1, 1), (1, 2), (2, 2)],
        Rotation::Two => [(1, 1), (1, 2), (2, 0), (2, 1)],
        Rotation::L => [(0, 0), (1, 0), (1, 1), (2, 1)],
    }
}

fn z_mask(rotation: Rotation) -> ShapeMask {
    match rotation {
        Rotation::Zero => [(0, 0), (0, 1), (1, 1), (1, 2)],
        Rotation::R => [(0, 2), (1, 1), (1, 2), (2, 1)],
        Rotation::Two => [(1, 0), (1, 1), (2, 1), (2, 2)],
        Rotation::L => [(0, 1), (1, 0), (1, 1), (2, 0)],
    }
}

fn j_mask(rotation: Rotation) -> ShapeMask {
    match rotation {
        Rotation::Zero => [(0, 0), (1, 0), (1, 1), (1, 2)],
        Rotation::R => [(0, 1), (0, 2), (1, 1), (2, 1)],
        Rotation::Two => [(1, 0), (1, 1), (1, 2), (2, 2)],
        Rotation::L => [(0, 1), (1, 1), (2, 0), (2, 1)],
    }
}

fn l_mask(rotation: Rotation) -> ShapeMask {
    match rotation {
        Rotation::Zero => [(0, 2), (1, 0), (1, 1), (1, 2)],
        Rotation::R => [(0, 1), (1, 1), (2, 1), (2, 2)],
        Rotation::Two => [(1, 0), (1, 1), (1, 2), (2, 0)],
        Rotation::L => [(0, 0), (0, 1), (1, 1), (2, 1)],
    }
}

/// Bounding box of a mask inside its 4x4 box (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskBounds {
    pub min_row: i8,
    pub max_row: i8,
    pub min_col: i8,
    pub max_col: i8,
}

impl MaskBounds {
    pub fn width(&self) -> i8 {
        self.max_col - self.min_col + 1
    }

    pub fn height(&self) -> i8 {
        self.max_row - self.min_row + 1
    }
}

/// Compute the bounding box of a mask
pub fn mask_bounds(kind: ShapeKind, rotation: Rotation) -> MaskBounds {
    let mask = rotation_mask(kind, rotation);
    let mut b = MaskBounds {
        min_row: i8::MAX,
        max_row: i8::MIN,
        min_col: i8::MAX,
        max_col: i8::MIN,
    };
    for (r, c) in mask {
        b.min_row = b.min_row.min(r);
        b.max_row = b.max_row.max(r);
        b.min_col = b.min_col.min(c);
        b.max_col = b.max_col.max(c);
    }
    b
}

/// Spawn anchor: rotation `0`, lowest block on the first visible row
pub fn spawn_anchor(kind: ShapeKind) -> Anchor {
    let bounds = mask_bounds(kind, Rotation::Zero);
    Anchor::new(HIDDEN_ROWS as i8 - bounds.max_row, SPAWN_COL)
}

/// Kick list used when no table exists for a transition
const NO_KICKS: [Kick; 1] = [(0, 0)];

// JLSTZ kicks, one list per adjacent transition.
const JLSTZ_0_R: [Kick; 5] = [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)];
const JLSTZ_R_0: [Kick; 5] = [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)];
const JLSTZ_R_2: [Kick; 5] = [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)];
const JLSTZ_2_R: [Kick; 5] = [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)];
const JLSTZ_2_L: [Kick; 5] = [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)];
const JLSTZ_L_2: [Kick; 5] = [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)];
const JLSTZ_L_0: [Kick; 5] = [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)];
const JLSTZ_0_L: [Kick; 5] = [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)];

// I kicks.
const I_0_R: [Kick; 5] = [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)];
const I_R_0: [Kick; 5] = [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)];
const I_R_2: [Kick; 5] = [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)];
const I_2_R: [Kick; 5] = [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)];
const I_2_L: [Kick; 5] = [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)];
const I_L_2: [Kick; 5] = [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)];
const I_L_0: [Kick; 5] = [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)];
const I_0_L: [Kick; 5] = [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)];

/// Ordered kick candidates for a rotation transition
///
/// The O piece and non-adjacent pairs have no table and get a single zero
/// offset.
pub fn kicks(kind: ShapeKind, from: Rotation, to: Rotation) -> &'static [Kick] {
    use Rotation::{Two, Zero, L, R};

    match kind {
        ShapeKind::O => &NO_KICKS,
        ShapeKind::I => match (from, to) {
            (Zero, R) => &I_0_R,
            (R, Zero) => &I_R_0,
            (R, Two) => &I_R_2,
            (Two, R) => &I_2_R,
            (Two, L) => &I_2_L,
            (L, Two) => &I_L_2,
            (L, Zero) => &I_L_0,
            (Zero, L) => &I_0_L,
            _ => &NO_KICKS,
        },
        ShapeKind::J | ShapeKind::L | ShapeKind::S | ShapeKind::T | ShapeKind::Z => {
            match (from, to) {
                (Zero, R) => &JLSTZ_0_R,
                (R, Zero) => &JLSTZ_R_0,
                (R, Two) => &JLSTZ_R_2,
                (Two, R) => &JLSTZ_2_R,
                (Two, L) => &JLSTZ_2_L,
                (L, Two) => &JLSTZ_L_2,
                (L, Zero) => &JLSTZ_L_0,
                (Zero, L) => &JLSTZ_0_L,
                _ => &NO_KICKS,
            }
        }
    }
}

/// Try to rotate a piece one step with kicks
///
/// `is_free(row, col)` must report whether a cell is in bounds and empty.
/// Returns the new rotation and the kicked anchor, or `None` if every kick
/// collides.
pub fn try_rotate(
    kind: ShapeKind,
    rotation: Rotation,
    anchor: Anchor,
    spin: Spin,
    is_free: impl Fn(i8, i8) -> bool,
) -> Option<(Rotation, Anchor)> {
    let new_rotation = rotation.rotate(spin);
    let new_mask = rotation_mask(kind, new_rotation);

    for &(d_col, d_row) in kicks(kind, rotation, new_rotation) {
        let kicked = anchor.shifted(d_col, d_row);
        let fits = new_mask
            .iter()
            .all(|&(r, c)| is_free(kicked.row + r, kicked.col + c));
        if fits {
            return Some((new_rotation, kicked));
        }
    }

    None
}
