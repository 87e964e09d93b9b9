use serde::Serialize;

use crate::game_state::ActivePiece;
use crate::types::{Rotation, ShapeKind, GRID_COLS, GRID_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub rotation: Rotation,
    pub row: i8,
    pub col: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            row: value.anchor.row,
            col: value.anchor.col,
        }
    }
}

/// Read-only view of a session for presentation layers
///
/// Grid cells are `0` for empty, otherwise the shape index plus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub grid: [[u8; GRID_COLS as usize]; GRID_ROWS as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_row: Option<i8>,
    pub next_queue: [ShapeKind; 2],
    pub game_over: bool,
    pub seed: u32,
    pub piece_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub elapsed_ms: u64,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[0u8; GRID_COLS as usize]; GRID_ROWS as usize],
            active: None,
            ghost_row: None,
            next_queue: [ShapeKind::I; 2],
            game_over: false,
            seed: 0,
            piece_id: 0,
            score: 0,
            level: 1,
            lines: 0,
            elapsed_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::GameState;
    use crate::types::GameAction;

    #[test]
    fn snapshot_reflects_locked_and_active_pieces() {
        let mut game = GameState::new(3);
        game.apply_action(GameAction::CreateNewShape);
        game.apply_action(GameAction::Drop);
        game.apply_action(GameAction::AutoDrop);
        game.apply_action(GameAction::AutoDrop);

        let snap = game.snapshot();
        let filled = snap.grid.iter().flatten().filter(|&&c| c != 0).count();
        assert_eq!(filled, 4);
        assert!(snap.active.is_some());
        assert!(snap.ghost_row.is_some());
        assert_eq!(snap.next_queue, *game.next_queue());
        assert_eq!(snap.piece_id, 2);
        assert!(snap.playable());
    }

    #[test]
    fn snapshot_into_overwrites_previous_state() {
        let mut game = GameState::new(3);
        game.apply_action(GameAction::CreateNewShape);
        let mut snap = game.snapshot();

        let fresh = GameState::new(4);
        fresh.snapshot_into(&mut snap);
        assert_eq!(snap, fresh.snapshot());
        assert!(snap.active.is_none());
    }
}
