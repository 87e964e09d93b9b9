//! Grid evaluation
//!
//! Scores a grid as a weighted sum of four classic features. Heights are
//! measured over the full grid, hidden rows included.

use serde::{Deserialize, Serialize};

use block_stack_core::types::GRID_ROWS;
use block_stack_core::Grid;

use crate::simulate::Landing;

/// Raw feature terms of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridFeatures {
    /// Sum of column heights
    pub aggregate_height: u32,
    /// Empty cells below the topmost block of their column
    pub holes: u32,
    /// Sum of absolute height differences of neighbouring columns
    pub bumpiness: u32,
    /// Full rows still present in the grid
    pub complete_lines: u32,
}

impl GridFeatures {
    /// Compute all features in one pass over the columns
    pub fn of(grid: &Grid) -> Self {
        let heights = grid.heights();

        let aggregate_height = heights.iter().map(|&h| h as u32).sum();
        let bumpiness = heights
            .windows(2)
            .map(|w| w[0].abs_diff(w[1]) as u32)
            .sum();

        let mut holes = 0;
        for (col, &h) in heights.iter().enumerate() {
            let top = GRID_ROWS as i8 - h as i8;
            holes += (top..GRID_ROWS as i8)
                .filter(|&row| !grid.is_occupied(row, col as i8))
                .count() as u32;
        }

        let complete_lines = (0..GRID_ROWS as usize)
            .filter(|&row| grid.is_row_full(row))
            .count() as u32;

        Self {
            aggregate_height,
            holes,
            bumpiness,
            complete_lines,
        }
    }
}

/// Feature weights
///
/// Defaults are the genetic-tuned set popularised by the "near perfect
/// player" write-up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    pub height: f64,
    pub lines: f64,
    pub holes: f64,
    pub bumpiness: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            height: -0.510066,
            lines: 0.760666,
            holes: -0.35663,
            bumpiness: -0.184483,
        }
    }
}

impl HeuristicWeights {
    pub fn is_finite(&self) -> bool {
        [self.height, self.lines, self.holes, self.bumpiness]
            .iter()
            .all(|w| w.is_finite())
    }

    /// Weighted sum of `features`
    pub fn apply(&self, features: &GridFeatures) -> f64 {
        self.height * features.aggregate_height as f64
            + self.lines * features.complete_lines as f64
            + self.holes * features.holes as f64
            + self.bumpiness * features.bumpiness as f64
    }
}

/// Scores grids with a fixed set of weights
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Evaluator {
    weights: HeuristicWeights,
}

impl Evaluator {
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Score a grid as-is
    pub fn score(&self, grid: &Grid) -> f64 {
        self.weights.apply(&GridFeatures::of(grid))
    }

    /// Score a simulated placement
    ///
    /// The landed grid has its full rows already removed, so the rows the
    /// lock cleared are added back to the line term.
    pub fn score_landing(&self, landing: &Landing) -> f64 {
        let mut features = GridFeatures::of(&landing.grid);
        features.complete_lines += landing.lines_cleared as u32;
        self.weights.apply(&features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulate::simulate;
    use block_stack_core::types::{Rotation, ShapeKind};

    #[test]
    fn empty_grid_has_no_features() {
        let f = GridFeatures::of(&Grid::new());
        assert_eq!(f, GridFeatures::default());
        assert_eq!(Evaluator::default().score(&Grid::new()), 0.0);
    }

    #[test]
    fn features_of_small_stack() {
        // col0 height 3 with one hole, col1 height 1, col3 height 2.
        let grid = Grid::from_rows(&["#.........", "...#......", "##.#......"]);
        let f = GridFeatures::of(&grid);

        assert_eq!(f.aggregate_height, 3 + 1 + 2);
        assert_eq!(f.holes, 1);
        // |3-1| + |1-0| + |0-2| + |2-0|
        assert_eq!(f.bumpiness, 2 + 1 + 2 + 2);
        assert_eq!(f.complete_lines, 0);
    }

    #[test]
    fn counts_full_rows_left_in_grid() {
        let grid = Grid::from_rows(&["##########", "#.........", "##########"]);
        let f = GridFeatures::of(&grid);
        assert_eq!(f.complete_lines, 2);
        // Every column but the first has a gap under the top full row.
        assert_eq!(f.holes, 9);
    }

    #[test]
    fn weights_apply_linearly() {
        let w = HeuristicWeights {
            height: 1.0,
            lines: 10.0,
            holes: 100.0,
            bumpiness: 1000.0,
        };
        let f = GridFeatures {
            aggregate_height: 1,
            holes: 2,
            bumpiness: 3,
            complete_lines: 4,
        };
        assert_eq!(w.apply(&f), 1.0 + 40.0 + 200.0 + 3000.0);
    }

    #[test]
    fn landing_score_credits_cleared_lines() {
        let grid = Grid::from_rows(&["#########."]);
        let landing = simulate(&grid, ShapeKind::I, Rotation::R, 7)
            .landed()
            .unwrap();
        assert_eq!(landing.lines_cleared, 1);

        let evaluator = Evaluator::default();
        let plain = evaluator.score(&landing.grid);
        let credited = evaluator.score_landing(&landing);
        assert!((credited - plain - HeuristicWeights::default().lines).abs() < 1e-12);
    }

    #[test]
    fn weights_deserialize_with_defaults() {
        let w: HeuristicWeights = serde_json::from_str(r#"{"holes": -1.0}"#).unwrap();
        assert_eq!(w.holes, -1.0);
        assert_eq!(w.lines, HeuristicWeights::default().lines);
        assert!(w.is_finite());
    }
}
