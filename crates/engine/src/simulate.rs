//! Placement simulation
//!
//! Pure functions over a borrowed grid. A placement is dropped from the top
//! of the grid straight down, committed on a copy, and full rows are cleared.
//! The input grid is never touched.

use std::ops::RangeInclusive;

use block_stack_core::shapes::{mask_bounds, Anchor};
use block_stack_core::types::{Rotation, ShapeKind, GRID_COLS};
use block_stack_core::Grid;

/// A piece that came to rest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landing {
    /// Grid after commit and line clear
    pub grid: Grid,
    /// Anchor row the piece locked at
    pub landing_row: i8,
    pub lines_cleared: u8,
}

impl Landing {
    /// Whether the placement leaves blocks in the hidden rows (a loss)
    pub fn tops_out(&self) -> bool {
        self.grid.has_hidden_blocks()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Simulation {
    Landed(Landing),
    /// The piece does not even fit with its top block on row 0
    Unplaceable,
}

impl Simulation {
    pub fn landed(self) -> Option<Landing> {
        match self {
            Simulation::Landed(landing) => Some(landing),
            Simulation::Unplaceable => None,
        }
    }
}

/// Anchor columns that keep every block of `kind` at `rotation` on the grid
pub fn legal_columns(kind: ShapeKind, rotation: Rotation) -> RangeInclusive<i8> {
    let b = mask_bounds(kind, rotation);
    -b.min_col..=(GRID_COLS as i8 - 1 - b.max_col)
}

/// Drop `kind` at `rotation` down anchor column `column` and resolve the lock
pub fn simulate(grid: &Grid, kind: ShapeKind, rotation: Rotation, column: i8) -> Simulation {
    let top = mask_bounds(kind, rotation).min_row;
    let start = Anchor::new(-top, column);

    let Some(landing_row) = grid.landing_row(kind, rotation, start) else {
        return Simulation::Unplaceable;
    };

    let mut after = grid.clone();
    after.commit(kind, rotation, Anchor::new(landing_row, column));
    let cleared = after.clear_full_rows();

    Simulation::Landed(Landing {
        grid: after,
        landing_row,
        lines_cleared: cleared.len() as u8,
    })
}
