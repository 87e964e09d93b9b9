//! Replay module - timestamped action logs
//!
//! A session is fully determined by its seed and the ordered list of actions
//! applied to it. Frames serialize as flat JSON objects:
//!
//! ```json
//! {"type":"Rotate","spin":"cw","elapsed":120}
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::game_state::GameState;
use crate::types::GameAction;

/// Errors produced while loading or replaying a log
#[derive(thiserror::Error, Debug)]
pub enum ReplayError {
    #[error("failed to read replay file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed replay: {0}")]
    Json(#[from] serde_json::Error),
    #[error("frame {index} goes back in time ({elapsed}ms after {previous}ms)")]
    NonMonotonic {
        index: usize,
        elapsed: u64,
        previous: u64,
    },
}

/// One logged action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayFrame {
    #[serde(flatten)]
    pub action: GameAction,
    /// Session clock when the action was applied
    pub elapsed: u64,
}

/// Seed plus every action applied to a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayLog {
    pub seed: u32,
    pub frames: Vec<ReplayFrame>,
}

impl ReplayLog {
    pub fn to_json(&self) -> Result<String, ReplayError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(s: &str) -> Result<Self, ReplayError> {
        let log: ReplayLog = serde_json::from_str(s)?;
        log.validate()?;
        Ok(log)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReplayError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Timestamps must never decrease
    pub fn validate(&self) -> Result<(), ReplayError> {
        let mut previous = 0;
        for (index, frame) in self.frames.iter().enumerate() {
            if frame.elapsed < previous {
                return Err(ReplayError::NonMonotonic {
                    index,
                    elapsed: frame.elapsed,
                    previous,
                });
            }
            previous = frame.elapsed;
        }
        Ok(())
    }

    /// Rebuild the session by applying every frame to a fresh game
    pub fn replay(&self) -> GameState {
        let mut game = GameState::new(self.seed);
        for frame in &self.frames {
            game.set_clock(frame.elapsed);
            game.apply_action(frame.action);
        }
        game
    }
}
