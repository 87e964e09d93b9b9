//! Translating a chosen placement into discrete actions
//!
//! Rotations and moves are replayed on a copy of the live piece, kicks
//! included, so the emitted plan is known to be executable on the current
//! grid up to the final drop.

use std::collections::VecDeque;

use block_stack_core::shapes::mask_bounds;
use block_stack_core::types::{GameAction, Rotation, Spin};
use block_stack_core::{ActivePiece, GameState, Grid};

use crate::planner::PlacementCandidate;
use crate::simulate::legal_columns;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    #[error("no active piece")]
    NoActive,
    #[error("could not rotate to target rotation")]
    RotationBlocked,
    #[error("target column would place piece out of bounds")]
    ColumnOutOfBounds,
    #[error("could not move to target column due to collision")]
    ColumnBlocked,
}

/// Ordered actions that bring the active piece to a target placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPlan {
    /// Rotation and anchor column the plan aims for; `None` for a bare drop
    pub target: Option<(Rotation, i8)>,
    actions: VecDeque<GameAction>,
}

impl ActionPlan {
    /// Drop the piece where it is
    pub fn drop_only() -> Self {
        Self {
            target: None,
            actions: VecDeque::from([GameAction::Drop]),
        }
    }

    pub fn actions(&self) -> impl Iterator<Item = &GameAction> {
        self.actions.iter()
    }

    pub fn next_action(&mut self) -> Option<GameAction> {
        self.actions.pop_front()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Build the action sequence moving `active` to `rotation` at anchor `column`
///
/// The shorter rotation direction is tried first (clockwise on a half turn),
/// then the other one. Horizontal moves are counted from the leftmost block
/// after rotating. The plan always ends with a single `Drop`.
pub fn build_plan(
    grid: &Grid,
    active: ActivePiece,
    rotation: Rotation,
    column: i8,
) -> Result<ActionPlan, PlanError> {
    if !legal_columns(active.kind, rotation).contains(&column) {
        return Err(PlanError::ColumnOutOfBounds);
    }

    let steps = active.rotation.steps_to(rotation);
    let tries: [(Spin, u8); 2] = match steps {
        -1 => [(Spin::Ccw, 1), (Spin::Cw, 3)],
        1 => [(Spin::Cw, 1), (Spin::Ccw, 3)],
        2 => [(Spin::Cw, 2), (Spin::Ccw, 2)],
        _ => [(Spin::Cw, 0), (Spin::Cw, 0)],
    };

    let mut actions = VecDeque::new();
    let mut rotated = None;
    for (spin, count) in tries {
        if let Some(piece) = rotate_n(grid, active, spin, count) {
            actions.extend((0..count).map(|_| GameAction::Rotate { spin }));
            rotated = Some(piece);
            break;
        }
    }
    let Some(mut piece) = rotated else {
        return Err(PlanError::RotationBlocked);
    };

    let target_left = column + mask_bounds(active.kind, rotation).min_col;
    let dx = target_left - piece.leftmost_col();
    let (step, action) = if dx < 0 {
        (-1, GameAction::MoveLeft)
    } else {
        (1, GameAction::MoveRight)
    };
    for _ in 0..dx.unsigned_abs() {
        let moved = piece.shifted(step, 0);
        if !moved.is_valid(grid) {
            return Err(PlanError::ColumnBlocked);
        }
        piece = moved;
        actions.push_back(action);
    }

    actions.push_back(GameAction::Drop);

    Ok(ActionPlan {
        target: Some((rotation, column)),
        actions,
    })
}

/// Plan the moves for a candidate on the live game
pub fn plan_candidate(
    game: &GameState,
    candidate: &PlacementCandidate,
) -> Result<ActionPlan, PlanError> {
    let active = game.active().ok_or(PlanError::NoActive)?;
    build_plan(game.grid(), active, candidate.rotation, candidate.column)
}

fn rotate_n(grid: &Grid, piece: ActivePiece, spin: Spin, count: u8) -> Option<ActivePiece> {
    let mut piece = piece;
    for _ in 0..count {
        piece = piece.rotated(grid, spin)?;
    }
    Some(piece)
}
