//! Placement search engine
//!
//! Builds on `block-stack-core`: simulates drops on grid copies, scores the
//! results with a weighted heuristic, picks the best placement (optionally
//! looking one piece ahead) and turns it into discrete game actions.
//!
//! # Example
//!
//! ```
//! use block_stack_core::types::ShapeKind;
//! use block_stack_core::Grid;
//! use block_stack_engine::{Evaluator, Lookahead, Planner};
//!
//! let grid = Grid::from_rows(&["#########.", "#########."]);
//! let planner = Planner::new(Evaluator::default(), Lookahead::One);
//! let best = planner.plan(&grid, ShapeKind::I, None).unwrap();
//! assert_eq!(best.lines_cleared, 2);
//! ```

pub mod config;
pub mod executor;
pub mod heuristic;
pub mod plan;
pub mod planner;
pub mod simulate;

pub use config::{AiConfig, ConfigError};
pub use executor::ActionExecutor;
pub use heuristic::{Evaluator, GridFeatures, HeuristicWeights};
pub use plan::{build_plan, plan_candidate, ActionPlan, PlanError};
pub use planner::{Lookahead, PlacementCandidate, Planner};
pub use simulate::{legal_columns, simulate, Landing, Simulation};
