//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! Everything here is plain data, usable from the simulation core, the search
//! engine and any presentation or replay layer sitting on top of them.
//!
//! # Grid Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Visible rows**: 20
//! - **Hidden rows**: 4 spawn/rotation rows above the visible field
//! - **Total rows**: 24, indexed 0-23 from the top; rows 0-3 are hidden
//!
//! A block resting in a hidden row after a lock ends the game.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_DROP_MS` | 500 | Gravity at speed level 1 |
//! | `MIN_DROP_MS` | 100 | Gravity at the top speed level |
//! | `DEFAULT_THINK_INTERVAL_MS` | 500 | AI pacing between two actions |
//!
//! # Examples
//!
//! ```
//! use block_stack_types::{GameAction, Rotation, ShapeKind, Spin, GRID_COLS, GRID_ROWS};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//!
//! assert_eq!(Rotation::Zero.rotate_cw(), Rotation::R);
//! assert_eq!(Rotation::Zero.steps_to(Rotation::L), -1);
//!
//! let action = GameAction::from_str("MoveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//! assert_eq!(GameAction::rotate_cw(), GameAction::Rotate { spin: Spin::Cw });
//!
//! assert_eq!(GRID_COLS, 10);
//! assert_eq!(GRID_ROWS, 24);
//! ```

use serde::{Deserialize, Serialize};

/// Grid width in cells (10 columns)
pub const GRID_COLS: u8 = 10;

/// Rows of the visible playfield (20 rows)
pub const VISIBLE_ROWS: u8 = 20;

/// Spawn buffer rows above the visible playfield (4 rows)
pub const HIDDEN_ROWS: u8 = 4;

/// Total grid height including the hidden rows
pub const GRID_ROWS: u8 = VISIBLE_ROWS + HIDDEN_ROWS;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at speed level 1
pub const BASE_DROP_MS: u32 = 500;

/// Gravity interval at the maximum speed level
pub const MIN_DROP_MS: u32 = 100;

/// Highest reachable speed level
pub const MAX_SPEED_LEVEL: u32 = 10;

/// Lines needed to advance one speed level
pub const LINES_PER_LEVEL: u32 = 10;

/// Default pause between two AI actions
pub const DEFAULT_THINK_INTERVAL_MS: u32 = 500;

/// Points awarded per lock, indexed by cleared line count (0-4)
pub const LINE_SCORES: [u32; 5] = [0, 100, 200, 600, 800];

/// Points for clearing more than four rows with a single lock
pub const BIG_CLEAR_SCORE: u32 = 1000;

/// Gravity interval for a speed level (1-based, clamped to `1..=MAX_SPEED_LEVEL`)
///
/// ```
/// use block_stack_types::{drop_interval_ms, BASE_DROP_MS, MIN_DROP_MS};
///
/// assert_eq!(drop_interval_ms(1), BASE_DROP_MS);
/// assert_eq!(drop_interval_ms(10), MIN_DROP_MS);
/// assert_eq!(drop_interval_ms(99), MIN_DROP_MS);
/// ```
pub fn drop_interval_ms(level: u32) -> u32 {
    let level = level.clamp(1, MAX_SPEED_LEVEL);
    BASE_DROP_MS - (level - 1) * (BASE_DROP_MS - MIN_DROP_MS) / (MAX_SPEED_LEVEL - 1)
}

/// The seven piece kinds
///
/// `ALL` lists them in bag seed order, which the randomizer relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    /// All kinds in bag seed order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_stack_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "o" => Some(ShapeKind::O),
            "s" => Some(ShapeKind::S),
            "t" => Some(ShapeKind::T),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Uppercase single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
            ShapeKind::O => "O",
            ShapeKind::S => "S",
            ShapeKind::T => "T",
            ShapeKind::Z => "Z",
        }
    }

    /// Position in `ALL`; doubles as the color index for renderers
    pub fn index(&self) -> usize {
        match self {
            ShapeKind::I => 0,
            ShapeKind::J => 1,
            ShapeKind::L => 2,
            ShapeKind::O => 3,
            ShapeKind::S => 4,
            ShapeKind::T => 5,
            ShapeKind::Z => 6,
        }
    }
}

/// Symbolic rotation states: spawn (`0`), one turn clockwise (`R`),
/// half turn (`2`) and one turn counter-clockwise (`L`)
///
/// Kick tables are keyed by pairs of these states, so they are kept symbolic
/// instead of being renumbered to a plain counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    #[serde(rename = "0")]
    Zero,
    R,
    #[serde(rename = "2")]
    Two,
    L,
}

impl Rotation {
    /// Enumeration order used by the planner
    pub const ALL: [Rotation; 4] = [Rotation::Zero, Rotation::R, Rotation::Two, Rotation::L];

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use block_stack_types::Rotation;
    ///
    /// assert_eq!(Rotation::Zero.rotate_cw(), Rotation::R);
    /// assert_eq!(Rotation::R.rotate_cw(), Rotation::Two);
    /// assert_eq!(Rotation::Two.rotate_cw(), Rotation::L);
    /// assert_eq!(Rotation::L.rotate_cw(), Rotation::Zero);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::Zero => Rotation::R,
            Rotation::R => Rotation::Two,
            Rotation::Two => Rotation::L,
            Rotation::L => Rotation::Zero,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::Zero => Rotation::L,
            Rotation::L => Rotation::Two,
            Rotation::Two => Rotation::R,
            Rotation::R => Rotation::Zero,
        }
    }

    /// Apply one step in the given direction
    pub fn rotate(&self, spin: Spin) -> Self {
        match spin {
            Spin::Cw => self.rotate_cw(),
            Spin::Ccw => self.rotate_ccw(),
        }
    }

    /// Number of clockwise quarter turns from `Zero`
    pub fn quarter_turns(&self) -> u8 {
        match self {
            Rotation::Zero => 0,
            Rotation::R => 1,
            Rotation::Two => 2,
            Rotation::L => 3,
        }
    }

    /// Shortest signed number of quarter turns to reach `target`
    ///
    /// Positive is clockwise. A half turn is reported as `+2`.
    ///
    /// ```
    /// use block_stack_types::Rotation;
    ///
    /// assert_eq!(Rotation::Zero.steps_to(Rotation::Zero), 0);
    /// assert_eq!(Rotation::Zero.steps_to(Rotation::R), 1);
    /// assert_eq!(Rotation::Zero.steps_to(Rotation::Two), 2);
    /// assert_eq!(Rotation::Zero.steps_to(Rotation::L), -1);
    /// assert_eq!(Rotation::L.steps_to(Rotation::Zero), 1);
    /// ```
    pub fn steps_to(&self, target: Rotation) -> i8 {
        let cw = (target.quarter_turns() as i8 - self.quarter_turns() as i8).rem_euclid(4);
        if cw == 3 {
            -1
        } else {
            cw
        }
    }

    /// Symbolic name
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::Zero => "0",
            Rotation::R => "R",
            Rotation::Two => "2",
            Rotation::L => "L",
        }
    }
}

/// Direction of a single rotation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spin {
    #[default]
    Cw,
    Ccw,
}

/// Discrete actions applied to a live game
///
/// Human input, the AI executor and replayed logs all go through this set.
/// Serialized as `{"type": "...", ...extra}` so a replay frame can flatten it
/// next to its timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameAction {
    /// Rotate one quarter turn, trying kicks in order
    Rotate {
        #[serde(default)]
        spin: Spin,
    },
    /// Shift one column left
    MoveLeft,
    /// Shift one column right
    MoveRight,
    /// Move straight down to the landing row (does not lock)
    Drop,
    /// Gravity step: spawn, fall one row, or lock when grounded
    AutoDrop,
    /// Spawn the next queued piece when none is active
    CreateNewShape,
    /// Lock the active piece where it currently is
    RemoveDropShape,
    /// Swap the two queued next pieces
    SwitchNextShape,
}

impl GameAction {
    pub fn rotate_cw() -> Self {
        GameAction::Rotate { spin: Spin::Cw }
    }

    pub fn rotate_ccw() -> Self {
        GameAction::Rotate { spin: Spin::Ccw }
    }

    /// Parse action from its name (case-insensitive)
    ///
    /// ```
    /// use block_stack_types::{GameAction, Spin};
    ///
    /// assert_eq!(GameAction::from_str("Rotate"), Some(GameAction::Rotate { spin: Spin::Cw }));
    /// assert_eq!(GameAction::from_str("RotateCcw"), Some(GameAction::Rotate { spin: Spin::Ccw }));
    /// assert_eq!(GameAction::from_str("autodrop"), Some(GameAction::AutoDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rotate" | "rotatecw" => Some(GameAction::rotate_cw()),
            "rotateccw" => Some(GameAction::rotate_ccw()),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "drop" => Some(GameAction::Drop),
            "autodrop" => Some(GameAction::AutoDrop),
            "createnewshape" => Some(GameAction::CreateNewShape),
            "removedropshape" => Some(GameAction::RemoveDropShape),
            "switchnextshape" => Some(GameAction::SwitchNextShape),
            _ => None,
        }
    }

    /// Name as it appears in the replay `type` tag
    ///
    /// A counter-clockwise rotation is tagged `Rotate` with `"spin": "ccw"` in
    /// a replay frame; here it reads `RotateCcw` so the name alone is unique.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Rotate { spin: Spin::Cw } => "Rotate",
            GameAction::Rotate { spin: Spin::Ccw } => "RotateCcw",
            GameAction::MoveLeft => "MoveLeft",
            GameAction::MoveRight => "MoveRight",
            GameAction::Drop => "Drop",
            GameAction::AutoDrop => "AutoDrop",
            GameAction::CreateNewShape => "CreateNewShape",
            GameAction::RemoveDropShape => "RemoveDropShape",
            GameAction::SwitchNextShape => "SwitchNextShape",
        }
    }
}

/// A cell on the grid
///
/// - `None`: empty
/// - `Some(ShapeKind)`: a placed block; the kind is only a rendering hook
pub type Cell = Option<ShapeKind>;
