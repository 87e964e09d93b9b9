//! Placement search
//!
//! Enumerates every rotation and column for the active piece, simulates each
//! drop, and scores the result. With two-ply lookahead the score of a
//! candidate is averaged with the best reply available to the next piece.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use block_stack_core::types::{Rotation, ShapeKind};
use block_stack_core::{GameState, Grid};

use crate::config::ConfigError;
use crate::heuristic::Evaluator;
use crate::simulate::{legal_columns, simulate, Landing};

/// Search depth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Lookahead {
    /// Active piece only
    One,
    /// Active piece plus the next queued piece
    #[default]
    Two,
}

impl TryFrom<u8> for Lookahead {
    type Error = ConfigError;

    fn try_from(depth: u8) -> Result<Self, Self::Error> {
        match depth {
            1 => Ok(Lookahead::One),
            2 => Ok(Lookahead::Two),
            other => Err(ConfigError::Lookahead(other)),
        }
    }
}

impl From<Lookahead> for u8 {
    fn from(value: Lookahead) -> Self {
        match value {
            Lookahead::One => 1,
            Lookahead::Two => 2,
        }
    }
}

/// A scored placement of the active piece
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementCandidate {
    pub kind: ShapeKind,
    pub rotation: Rotation,
    /// Anchor column
    pub column: i8,
    pub landing_row: i8,
    /// Grid after the lock and line clear
    pub grid: Grid,
    pub lines_cleared: u8,
    /// Evaluator score of this placement alone
    pub first_ply: f64,
    /// Final score after lookahead
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Planner {
    evaluator: Evaluator,
    lookahead: Lookahead,
}

impl Planner {
    pub fn new(evaluator: Evaluator, lookahead: Lookahead) -> Self {
        Self {
            evaluator,
            lookahead,
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn lookahead(&self) -> Lookahead {
        self.lookahead
    }

    /// Every non-losing placement of `kind`, scored on the first ply only
    ///
    /// Ordered by rotation (`0`, `R`, `2`, `L`) then ascending column.
    pub fn candidates(&self, grid: &Grid, kind: ShapeKind) -> Vec<PlacementCandidate> {
        let mut out = Vec::new();
        for rotation in Rotation::ALL {
            for column in legal_columns(kind, rotation) {
                let Some(landing) = landed(grid, kind, rotation, column) else {
                    continue;
                };
                let first_ply = self.evaluator.score_landing(&landing);
                out.push(PlacementCandidate {
                    kind,
                    rotation,
                    column,
                    landing_row: landing.landing_row,
                    grid: landing.grid,
                    lines_cleared: landing.lines_cleared,
                    first_ply,
                    score: first_ply,
                });
            }
        }
        out
    }

    /// Best first-ply score any placement of `kind` can reach, or `None`
    /// when every placement loses
    pub fn best_reply(&self, grid: &Grid, kind: ShapeKind) -> Option<f64> {
        let mut best: Option<f64> = None;
        for rotation in Rotation::ALL {
            for column in legal_columns(kind, rotation) {
                let Some(landing) = landed(grid, kind, rotation, column) else {
                    continue;
                };
                let s = self.evaluator.score_landing(&landing);
                if best.map_or(true, |b| s > b) {
                    best = Some(s);
                }
            }
        }
        best
    }

    /// Pick the best placement of `active`, optionally looking at `next`
    ///
    /// Ties keep the earliest candidate in enumeration order. Returns `None`
    /// when every placement tops out or does not fit.
    pub fn plan(
        &self,
        grid: &Grid,
        active: ShapeKind,
        next: Option<ShapeKind>,
    ) -> Option<PlacementCandidate> {
        let lookahead_kind = match self.lookahead {
            Lookahead::One => None,
            Lookahead::Two => next,
        };

        let mut best: Option<PlacementCandidate> = None;
        let mut considered = 0usize;

        for mut candidate in self.candidates(grid, active) {
            considered += 1;
            if let Some(next_kind) = lookahead_kind {
                if let Some(reply) = self.best_reply(&candidate.grid, next_kind) {
                    candidate.score = (candidate.first_ply + reply) / 2.0;
                }
            }
            trace!(
                rotation = candidate.rotation.as_str(),
                column = candidate.column,
                first_ply = candidate.first_ply,
                score = candidate.score,
                "candidate"
            );

            let better = best
                .as_ref()
                .map_or(true, |b| candidate.score > b.score);
            if better {
                best = Some(candidate);
            }
        }

        match &best {
            Some(c) => debug!(
                kind = active.as_str(),
                next = next.map(|k| k.as_str()),
                rotation = c.rotation.as_str(),
                column = c.column,
                landing_row = c.landing_row,
                lines = c.lines_cleared,
                score = c.score,
                considered,
                "placement chosen"
            ),
            None => debug!(kind = active.as_str(), "no placement survives"),
        }

        best
    }

    /// Plan for the active piece of a live game, using its queued next piece
    pub fn plan_for(&self, game: &GameState) -> Option<PlacementCandidate> {
        let active = game.active()?;
        self.plan(game.grid(), active.kind, Some(game.next_kind()))
    }
}

/// Simulated landing that fits and does not top out
fn landed(grid: &Grid, kind: ShapeKind, rotation: Rotation, column: i8) -> Option<Landing> {
    simulate(grid, kind, rotation, column)
        .landed()
        .filter(|landing| !landing.tops_out())
}
