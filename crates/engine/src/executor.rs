//! Driving a live game with the planner
//!
//! The executor owns two independent timers. The drop timer issues
//! `AutoDrop` at the game's gravity interval. The think timer plans once per
//! fresh piece and then feeds the queued actions one at a time. Thinking never
//! runs slower than gravity, and a rejected or disturbed step throws the plan
//! away so the next think starts over from where the piece actually is.

use tracing::{debug, warn};

use block_stack_core::types::{GameAction, Rotation};
use block_stack_core::{GameState, LockEvent};

use crate::config::AiConfig;
use crate::plan::{plan_candidate, ActionPlan};
use crate::planner::Planner;

#[derive(Debug, Clone)]
pub struct ActionExecutor {
    planner: Planner,
    think_interval_ms: u32,
    think_timer_ms: u32,
    drop_timer_ms: u32,
    pending: Option<ActionPlan>,
    /// Piece id the pending plan was built for
    planned_piece: Option<u32>,
    /// Rotation and anchor column the piece should have after the last step
    expected: Option<(Rotation, i8)>,
}

impl ActionExecutor {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            planner: config.planner(),
            think_interval_ms: config.think_interval_ms.max(1),
            think_timer_ms: 0,
            drop_timer_ms: 0,
            pending: None,
            planned_piece: None,
            expected: None,
        }
    }

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// Think interval in effect at the game's current level
    pub fn think_interval_ms(&self, game: &GameState) -> u32 {
        self.think_interval_ms.min(game.drop_interval_ms()).max(1)
    }

    /// Actions still queued for the current piece
    pub fn pending_len(&self) -> usize {
        self.pending.as_ref().map_or(0, ActionPlan::len)
    }

    /// Advance both timers by `dt_ms` and act on whichever expired
    ///
    /// Returns `false` once the game is over.
    pub fn tick(&mut self, game: &mut GameState, dt_ms: u32) -> bool {
        if game.game_over() {
            return false;
        }
        game.advance_clock(dt_ms);

        self.drop_timer_ms += dt_ms;
        if self.drop_timer_ms >= game.drop_interval_ms() {
            self.drop_timer_ms = 0;
            game.apply_action(GameAction::AutoDrop);
        }

        self.think_timer_ms += dt_ms;
        if self.think_timer_ms >= self.think_interval_ms(game) {
            self.think_timer_ms = 0;
            self.think(game);
        }

        !game.game_over()
    }

    /// Plan for a fresh piece if needed, then apply one queued action
    fn think(&mut self, game: &mut GameState) {
        let Some(active) = game.active() else {
            return;
        };
        let position = (active.rotation, active.anchor.col);
        let fresh = self.planned_piece != Some(game.piece_id());
        let stale = !fresh && self.expected.is_some_and(|expected| expected != position);
        if fresh || stale {
            if stale {
                debug!(
                    piece = game.piece_id(),
                    "piece left its planned path, replanning"
                );
            }
            self.pending = Some(self.plan_or_drop(game));
            self.planned_piece = Some(game.piece_id());
            self.expected = Some(position);
        }
        let Some(action) = self.pending.as_mut().and_then(ActionPlan::next_action) else {
            return;
        };
        if game.apply_action(action) {
            self.expected = game.active().map(|p| (p.rotation, p.anchor.col));
        } else {
            debug!(
                piece = game.piece_id(),
                action = action.as_str(),
                "step rejected, replanning"
            );
            self.pending = None;
            self.planned_piece = None;
            self.expected = None;
        }
    }

    /// Place one piece without timers
    ///
    /// Spawns a piece if none is active, applies the whole plan, then locks
    /// and spawns the next one. Returns the lock, or `None` once the game is
    /// over.
    pub fn play_placement(&mut self, game: &mut GameState) -> Option<LockEvent> {
        if game.game_over() {
            return None;
        }
        if game.active().is_none() {
            game.advance_clock(self.think_interval_ms);
            game.apply_action(GameAction::AutoDrop);
        }
        if game.active().is_none() {
            return None;
        }

        let mut plan = self.plan_or_drop(game);
        while let Some(action) = plan.next_action() {
            game.advance_clock(self.think_interval_ms);
            game.apply_action(action);
        }

        game.advance_clock(self.think_interval_ms);
        game.apply_action(GameAction::AutoDrop);
        let lock = game.last_lock();

        game.advance_clock(self.think_interval_ms);
        game.apply_action(GameAction::AutoDrop);

        self.pending = None;
        self.planned_piece = None;
        self.expected = None;
        lock
    }

    /// Best plan for the active piece; a bare drop when nothing better exists
    fn plan_or_drop(&self, game: &GameState) -> ActionPlan {
        let Some(candidate) = self.planner.plan_for(game) else {
            debug!(piece = game.piece_id(), "no surviving placement, dropping");
            return ActionPlan::drop_only();
        };
        match plan_candidate(game, &candidate) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(
                    piece = game.piece_id(),
                    rotation = candidate.rotation.as_str(),
                    column = candidate.column,
                    "{err}, dropping in place"
                );
                ActionPlan::drop_only()
            }
        }
    }
}
