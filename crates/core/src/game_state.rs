//! Game state module - one live game session
//!
//! Ties together the grid, the randomizer and the active piece. Every change
//! to a live game goes through [`GameState::apply_action`], which also
//! records the action in the replay log. Lookahead search never touches this
//! type; it works on grid copies.

use tracing::{debug, info};

use crate::grid::Grid;
use crate::replay::{ReplayFrame, ReplayLog};
use crate::rng::Randomizer;
use crate::shapes::{mask_bounds, rotation_mask, spawn_anchor, try_rotate, Anchor, ShapeMask};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: ShapeKind,
    pub rotation: Rotation,
    pub anchor: Anchor,
}

impl ActivePiece {
    pub fn new(kind: ShapeKind, rotation: Rotation, anchor: Anchor) -> Self {
        Self {
            kind,
            rotation,
            anchor,
        }
    }

    /// Mask for the current rotation
    pub fn mask(&self) -> ShapeMask {
        rotation_mask(self.kind, self.rotation)
    }

    /// Absolute `(row, col)` of every block
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.mask()
            .map(|(r, c)| (self.anchor.row + r, self.anchor.col + c))
    }

    /// Leftmost occupied column
    pub fn leftmost_col(&self) -> i8 {
        self.anchor.col + mask_bounds(self.kind, self.rotation).min_col
    }

    /// Check if all blocks are at free positions on the grid
    pub fn is_valid(&self, grid: &Grid) -> bool {
        grid.can_place(self.kind, self.rotation, self.anchor)
    }

    /// Check if the piece rests on something
    pub fn is_grounded(&self, grid: &Grid) -> bool {
        !grid.can_place(self.kind, self.rotation, self.anchor.shifted(0, 1))
    }

    /// Same piece moved by a column/row delta
    pub fn shifted(&self, d_col: i8, d_row: i8) -> Self {
        Self {
            anchor: self.anchor.shifted(d_col, d_row),
            ..*self
        }
    }

    /// Rotate one step with kicks against `grid`
    pub fn rotated(&self, grid: &Grid, spin: Spin) -> Option<Self> {
        try_rotate(self.kind, self.rotation, self.anchor, spin, |r, c| {
            grid.is_free(r, c)
        })
        .map(|(rotation, anchor)| Self {
            rotation,
            anchor,
            ..*self
        })
    }
}

/// Spawn a piece of `kind` on `grid`
///
/// The piece starts at [`spawn_anchor`] with its lowest block on
/// the first visible row, and is pushed upward through the hidden rows while
/// it collides. Returns `None` when no row fits.
pub fn spawn_piece_on(grid: &Grid, kind: ShapeKind) -> Option<ActivePiece> {
    let min_row = mask_bounds(kind, Rotation::Zero).min_row;
    let mut piece = ActivePiece::new(kind, Rotation::Zero, spawn_anchor(kind));
    while piece.anchor.row + min_row >= 0 {
        if piece.is_valid(grid) {
            return Some(piece);
        }
        piece = piece.shifted(0, -1);
    }
    None
}

/// Outcome of locking a piece into the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub piece: ActivePiece,
    pub lines_cleared: u32,
    pub points: u32,
    pub game_over: bool,
}

/// Points for a single lock clearing `lines` rows
pub fn line_clear_score(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(BIG_CLEAR_SCORE)
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    active: Option<ActivePiece>,
    /// Two upcoming pieces; index 0 spawns next
    next_queue: [ShapeKind; 2],
    randomizer: Randomizer,
    seed: u32,
    /// Monotonic id for spawned pieces
    piece_id: u32,
    score: u32,
    lines: u32,
    /// Speed level, starting at 1
    level: u32,
    game_over: bool,
    /// Session clock used to timestamp logged actions
    elapsed_ms: u64,
    last_lock: Option<LockEvent>,
    log: Vec<ReplayFrame>,
}

impl GameState {
    /// Create a new game with the given randomizer seed
    ///
    /// No piece is active yet; the first `AutoDrop` or `CreateNewShape`
    /// spawns one.
    pub fn new(seed: u32) -> Self {
        let mut randomizer = Randomizer::new(seed);
        let next_queue = [randomizer.next(), randomizer.next()];

        Self {
            grid: Grid::new(),
            active: None,
            next_queue,
            randomizer,
            seed,
            piece_id: 0,
            score: 0,
            lines: 0,
            level: 1,
            game_over: false,
            elapsed_ms: 0,
            last_lock: None,
            log: Vec::new(),
        }
    }

    /// Create a session on a prepared grid (puzzles, tests)
    pub fn with_grid(seed: u32, grid: Grid) -> Self {
        Self {
            grid,
            ..Self::new(seed)
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_queue(&self) -> &[ShapeKind; 2] {
        &self.next_queue
    }

    /// Kind that spawns after the active piece
    pub fn next_kind(&self) -> ShapeKind {
        self.next_queue[0]
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Result of the most recent lock
    pub fn last_lock(&self) -> Option<LockEvent> {
        self.last_lock
    }

    /// Gravity interval for the current level
    pub fn drop_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level)
    }

    /// Advance the session clock
    pub fn advance_clock(&mut self, dt_ms: u32) {
        self.elapsed_ms += dt_ms as u64;
    }

    /// Set the session clock (replay)
    pub fn set_clock(&mut self, elapsed_ms: u64) {
        self.elapsed_ms = elapsed_ms;
    }

    /// Frames recorded so far
    pub fn frames(&self) -> &[ReplayFrame] {
        &self.log
    }

    /// Copy of the action log with the seed needed to replay it
    pub fn replay_log(&self) -> ReplayLog {
        ReplayLog {
            seed: self.seed,
            frames: self.log.clone(),
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.grid);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_row = self.ghost_row();
        out.next_queue = self.next_queue;
        out.game_over = self.game_over;
        out.seed = self.seed;
        out.piece_id = self.piece_id;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.elapsed_ms = self.elapsed_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Anchor row the active piece would land on (drop preview)
    pub fn ghost_row(&self) -> Option<i8> {
        let active = self.active?;
        self.grid
            .landing_row(active.kind, active.rotation, active.anchor)
    }

    /// Apply one discrete action and log it
    ///
    /// Returns whether the action changed anything. Rejected actions (blocked
    /// moves, nothing to lock, game over) are no-ops.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        self.log.push(ReplayFrame {
            action,
            elapsed: self.elapsed_ms,
        });

        if self.game_over {
            return false;
        }

        match action {
            GameAction::Rotate { spin } => self.try_rotate(spin),
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::Drop => self.drop_to_landing(),
            GameAction::AutoDrop => self.auto_drop(),
            GameAction::CreateNewShape => self.active.is_none() && self.spawn_piece(),
            GameAction::RemoveDropShape => self.lock_active().is_some(),
            GameAction::SwitchNextShape => {
                self.next_queue.swap(0, 1);
                true
            }
        }
    }

    fn try_move(&mut self, d_col: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.shifted(d_col, 0);
        if !moved.is_valid(&self.grid) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    fn try_rotate(&mut self, spin: Spin) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match active.rotated(&self.grid, spin) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    fn drop_to_landing(&mut self) -> bool {
        let (Some(active), Some(row)) = (self.active, self.ghost_row()) else {
            return false;
        };
        if row == active.anchor.row {
            return false;
        }
        self.active = Some(ActivePiece {
            anchor: Anchor::new(row, active.anchor.col),
            ..active
        });
        true
    }

    fn auto_drop(&mut self) -> bool {
        match self.active {
            None => self.spawn_piece(),
            Some(active) if active.is_grounded(&self.grid) => self.lock_active().is_some(),
            Some(active) => {
                self.active = Some(active.shifted(0, 1));
                true
            }
        }
    }

    /// Spawn the next queued piece
    fn spawn_piece(&mut self) -> bool {
        let kind = self.next_queue[0];
        self.next_queue = [self.next_queue[1], self.randomizer.next()];

        match spawn_piece_on(&self.grid, kind) {
            Some(piece) => {
                self.active = Some(piece);
                self.piece_id = self.piece_id.wrapping_add(1);
                true
            }
            None => {
                self.set_game_over("spawn blocked");
                false
            }
        }
    }

    /// Lock the active piece where it is and resolve line clears
    fn lock_active(&mut self) -> Option<LockEvent> {
        let piece = self.active.take()?;
        self.grid.commit(piece.kind, piece.rotation, piece.anchor);

        let cleared = self.grid.clear_full_rows().len();
        let points = if cleared > 0 {
            line_clear_score(cleared)
        } else {
            0
        };
        self.score += points;
        self.lines += cleared as u32;
        self.level = (1 + self.lines / LINES_PER_LEVEL).min(MAX_SPEED_LEVEL);

        if self.grid.has_hidden_blocks() {
            self.set_game_over("block locked in hidden rows");
        }

        let event = LockEvent {
            piece,
            lines_cleared: cleared as u32,
            points,
            game_over: self.game_over,
        };
        debug!(
            kind = piece.kind.as_str(),
            rotation = piece.rotation.as_str(),
            row = piece.anchor.row,
            col = piece.anchor.col,
            lines = cleared,
            "piece locked"
        );
        self.last_lock = Some(event);
        Some(event)
    }

    fn set_game_over(&mut self, reason: &'static str) {
        if !self.game_over {
            info!(
                reason,
                pieces = self.piece_id,
                lines = self.lines,
                score = self.score,
                "game over"
            );
        }
        self.game_over = true;
        self.active = None;
    }
}
