//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the rules of the block-stacking game: shape masks and
//! rotation, the seeded piece randomizer, the grid, and a live game session
//! driven by discrete actions. It has no dependency on rendering or input,
//! so the same code backs the headless search engine, replays and any
//! presentation layer.
//!
//! # Module Structure
//!
//! - [`shapes`]: piece masks, bounds, and rotation with wall kicks
//! - [`rng`]: seeded 7-bag piece randomizer
//! - [`grid`]: 24x10 occupancy grid with collision checks and row clearing
//! - [`game_state`]: one live session (active piece, next queue, score, level)
//! - [`replay`]: timestamped action logs and deterministic replay
//! - [`snapshot`]: read-only view for presentation layers
//!
//! # Example
//!
//! ```
//! use block_stack_core::GameState;
//! use block_stack_core::types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.apply_action(GameAction::CreateNewShape);
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::rotate_cw());
//! game.apply_action(GameAction::Drop);
//! game.apply_action(GameAction::AutoDrop);
//!
//! assert_eq!(game.grid().occupied_count(), 4);
//! assert_eq!(game.frames().len(), 5);
//! ```

pub mod game_state;
pub mod grid;
pub mod replay;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use block_stack_types as types;

// Re-export commonly used types for convenience
pub use game_state::{line_clear_score, spawn_piece_on, ActivePiece, GameState, LockEvent};
pub use grid::Grid;
pub use replay::{ReplayError, ReplayFrame, ReplayLog};
pub use rng::{Randomizer, SimpleRng};
pub use shapes::{
    kicks, mask_bounds, rotation_mask, spawn_anchor, try_rotate, Anchor, MaskBounds, ShapeMask,
};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
