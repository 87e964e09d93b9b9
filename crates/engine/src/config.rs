//! AI configuration
//!
//! Loaded from JSON; every field is optional and falls back to the defaults.
//!
//! ```json
//! {
//!   "weights": {"height": -0.51, "lines": 0.76, "holes": -0.36, "bumpiness": -0.18},
//!   "lookahead": 2,
//!   "think_interval_ms": 500
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use block_stack_core::types::DEFAULT_THINK_INTERVAL_MS;

use crate::heuristic::{Evaluator, HeuristicWeights};
use crate::planner::{Lookahead, Planner};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("heuristic weights must be finite numbers")]
    NonFiniteWeights,
    #[error("lookahead depth must be 1 or 2, got {0}")]
    Lookahead(u8),
    #[error("think interval must be at least 1ms")]
    ZeroThinkInterval,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub weights: HeuristicWeights,
    pub lookahead: Lookahead,
    /// Pause between two actions applied by the executor
    pub think_interval_ms: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            weights: HeuristicWeights::default(),
            lookahead: Lookahead::default(),
            think_interval_ms: DEFAULT_THINK_INTERVAL_MS,
        }
    }
}

impl AiConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: AiConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.weights.is_finite() {
            return Err(ConfigError::NonFiniteWeights);
        }
        if self.think_interval_ms == 0 {
            return Err(ConfigError::ZeroThinkInterval);
        }
        Ok(())
    }

    pub fn planner(&self) -> Planner {
        Planner::new(Evaluator::new(self.weights), self.lookahead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = AiConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AiConfig::default());
        assert_eq!(config.lookahead, Lookahead::Two);
        assert_eq!(config.think_interval_ms, 500);
    }

    #[test]
    fn partial_weights_keep_other_defaults() {
        let config =
            AiConfig::from_json_str(r#"{"weights": {"lines": 5.0}, "lookahead": 1}"#).unwrap();
        assert_eq!(config.weights.lines, 5.0);
        assert_eq!(config.weights.holes, HeuristicWeights::default().holes);
        assert_eq!(config.lookahead, Lookahead::One);
    }

    #[test]
    fn rejects_bad_lookahead() {
        let err = AiConfig::from_json_str(r#"{"lookahead": 4}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().contains("lookahead depth"));
    }

    #[test]
    fn rejects_zero_think_interval() {
        let err = AiConfig::from_json_str(r#"{"think_interval_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroThinkInterval));
    }

    #[test]
    fn rejects_non_finite_weights() {
        let mut config = AiConfig::default();
        config.weights.holes = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteWeights)
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AiConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
