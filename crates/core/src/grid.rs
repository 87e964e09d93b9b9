//! Grid module - occupancy model of the playfield
//!
//! The grid is 10 columns by 24 rows: 4 hidden spawn rows on top of the
//! 20 visible ones. Storage is a flat array for cache locality and cheap
//! copies (the search clones it hundreds of times per decision); callers only
//! ever see `(row, col)` accessors.
//!
//! Coordinates: `row` ranges 0..23 top to bottom, `col` ranges 0..9 left to
//! right. Rows `0..HIDDEN_ROWS` are hidden.

use std::fmt;

use arrayvec::ArrayVec;

use crate::shapes::{rotation_mask, Anchor, ShapeMask};
use crate::types::{Cell, Rotation, ShapeKind, GRID_COLS, GRID_ROWS, HIDDEN_ROWS};

const COLS: usize = GRID_COLS as usize;
const ROWS: usize = GRID_ROWS as usize;

/// Total number of cells on the grid
const GRID_SIZE: usize = COLS * ROWS;

/// Row indices, ordered top to bottom
pub type RowList = ArrayVec<u8, ROWS>;

/// The playfield - 10 columns x (20 visible + 4 hidden) rows
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Row-major cells (row * COLS + col)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= GRID_ROWS as i8 || col < 0 || col >= GRID_COLS as i8 {
            return None;
        }
        Some(row as usize * COLS + col as usize)
    }

    /// Index for a write; out-of-range writes are a caller bug
    #[inline(always)]
    fn write_index(row: i8, col: i8) -> usize {
        match Self::index(row, col) {
            Some(idx) => idx,
            None => panic!("grid write out of range at row {row}, col {col}"),
        }
    }

    /// Total rows, hidden ones included
    pub fn rows(&self) -> u8 {
        GRID_ROWS
    }

    pub fn cols(&self) -> u8 {
        GRID_COLS
    }

    /// Get the cell at `(row, col)`, `None` if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Whether `(row, col)` holds a block; out of bounds reads as empty
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Whether `(row, col)` is in bounds and empty
    pub fn is_free(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Overwrite a cell
    ///
    /// # Panics
    ///
    /// If `(row, col)` is outside the grid.
    pub fn set(&mut self, row: i8, col: i8, cell: Cell) {
        let idx = Self::write_index(row, col);
        self.cells[idx] = cell;
    }

    /// Place a single block, mostly for building fixtures
    pub fn fill(&mut self, row: i8, col: i8, kind: ShapeKind) {
        self.set(row, col, Some(kind));
    }

    /// Whether every cell of `mask` offset by `anchor` is in bounds and empty
    pub fn can_place_mask(&self, mask: &ShapeMask, anchor: Anchor) -> bool {
        mask.iter()
            .all(|&(r, c)| self.is_free(anchor.row + r, anchor.col + c))
    }

    /// Whether a piece fits at `anchor`
    pub fn can_place(&self, kind: ShapeKind, rotation: Rotation, anchor: Anchor) -> bool {
        self.can_place_mask(&rotation_mask(kind, rotation), anchor)
    }

    /// Mark every cell of the piece occupied. Does not clear lines.
    ///
    /// # Panics
    ///
    /// If a cell is out of bounds or already occupied; callers are expected
    /// to have checked [`Grid::can_place`] first.
    pub fn commit(&mut self, kind: ShapeKind, rotation: Rotation, anchor: Anchor) {
        for (r, c) in rotation_mask(kind, rotation) {
            let idx = Self::write_index(anchor.row + r, anchor.col + c);
            assert!(
                self.cells[idx].is_none(),
                "commit onto occupied cell at row {}, col {}",
                anchor.row + r,
                anchor.col + c
            );
            self.cells[idx] = Some(kind);
        }
    }

    /// Row the anchor comes to rest on when dropped straight down from
    /// `anchor`, or `None` if the piece does not fit at `anchor` at all
    pub fn landing_row(&self, kind: ShapeKind, rotation: Rotation, anchor: Anchor) -> Option<i8> {
        let mask = rotation_mask(kind, rotation);
        if !self.can_place_mask(&mask, anchor) {
            return None;
        }
        let mut row = anchor.row;
        while self.can_place_mask(&mask, Anchor::new(row + 1, anchor.col)) {
            row += 1;
        }
        Some(row)
    }

    fn row_slice(&self, row: usize) -> &[Cell] {
        let start = row * COLS;
        &self.cells[start..start + COLS]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        row < ROWS && self.row_slice(row).iter().all(|cell| cell.is_some())
    }

    /// Indices of all full rows, top to bottom
    pub fn find_full_rows(&self) -> RowList {
        (0..ROWS)
            .filter(|&row| self.is_row_full(row))
            .map(|row| row as u8)
            .collect()
    }

    /// Remove the given rows and let everything above fall into the gap
    ///
    /// Each surviving row moves down by the number of removed rows beneath
    /// it; columns never change. Emptied rows reappear at the top.
    /// Two-pointer pass from the bottom, no allocation.
    ///
    /// # Panics
    ///
    /// If a row index is outside the grid.
    pub fn clear_and_compact(&mut self, rows: &[u8]) {
        if rows.is_empty() {
            return;
        }
        assert!(
            rows.iter().all(|&r| (r as usize) < ROWS),
            "clear_and_compact given a row outside the grid: {rows:?}"
        );

        let mut write_row = ROWS;
        for read_row in (0..ROWS).rev() {
            if rows.contains(&(read_row as u8)) {
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * COLS;
                self.cells.copy_within(src..src + COLS, write_row * COLS);
            }
        }

        for cell in &mut self.cells[..write_row * COLS] {
            *cell = None;
        }
    }

    /// Find and clear every full row; returns the cleared indices
    pub fn clear_full_rows(&mut self) -> RowList {
        let full = self.find_full_rows();
        self.clear_and_compact(&full);
        full
    }

    /// Height of a column: `rows - topmost occupied row`, 0 when empty
    pub fn column_height(&self, col: usize) -> u8 {
        (0..ROWS)
            .find(|&row| self.cells[row * COLS + col].is_some())
            .map_or(0, |row| (ROWS - row) as u8)
    }

    /// Heights of all columns
    pub fn heights(&self) -> [u8; COLS] {
        let mut out = [0u8; COLS];
        for (col, h) in out.iter_mut().enumerate() {
            *h = self.column_height(col);
        }
        out
    }

    /// Whether any block sits in the hidden spawn rows (terminal condition)
    pub fn has_hidden_blocks(&self) -> bool {
        self.cells[..HIDDEN_ROWS as usize * COLS]
            .iter()
            .any(|cell| cell.is_some())
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Write cell codes (0 = empty, 1..=7 = kind index + 1) row by row
    pub fn write_u8_grid(&self, out: &mut [[u8; COLS]; ROWS]) {
        for (row, out_row) in out.iter_mut().enumerate() {
            for (col, code) in out_row.iter_mut().enumerate() {
                *code = self.cells[row * COLS + col].map_or(0, |k| k.index() as u8 + 1);
            }
        }
    }

    /// Build a grid from text rows, bottom-aligned
    ///
    /// `#` (or any non-`.` character) marks a block. Rows shorter than the
    /// grid width are padded with empty cells.
    ///
    /// # Panics
    ///
    /// If more rows or wider rows are given than the grid holds.
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= ROWS, "too many rows: {}", rows.len());
        let mut grid = Self::new();
        let top = ROWS - rows.len();
        for (i, text) in rows.iter().enumerate() {
            assert!(text.len() <= COLS, "row too wide: {text:?}");
            for (col, ch) in text.chars().enumerate() {
                if ch != '.' {
                    grid.fill((top + i) as i8, col as i8, ShapeKind::O);
                }
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            if row == HIDDEN_ROWS as usize {
                writeln!(f, "{}", "-".repeat(COLS))?;
            }
            for cell in self.row_slice(row) {
                f.write_str(if cell.is_some() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {{")?;
        fmt::Display::fmt(self, f)?;
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(0, 9), Some(9));
        assert_eq!(Grid::index(1, 0), Some(10));
        assert_eq!(Grid::index(23, 9), Some(239));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(0, 10), None);
        assert_eq!(Grid::index(24, 0), None);
    }

    #[test]
    fn test_out_of_bounds_reads_as_empty() {
        let grid = Grid::new();
        assert!(!grid.is_occupied(-1, 0));
        assert!(!grid.is_occupied(0, 10));
        assert!(!grid.is_free(24, 0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_write_panics() {
        let mut grid = Grid::new();
        grid.fill(24, 0, ShapeKind::T);
    }

    #[test]
    #[should_panic(expected = "occupied")]
    fn test_commit_onto_occupied_panics() {
        let mut grid = Grid::new();
        grid.fill(21, 1, ShapeKind::J);
        grid.commit(ShapeKind::O, Rotation::Zero, Anchor::new(20, 0));
    }

    #[test]
    fn test_commit_marks_mask_cells() {
        let mut grid = Grid::new();
        grid.commit(ShapeKind::O, Rotation::Zero, Anchor::new(22, 0));

        assert!(grid.is_occupied(22, 1));
        assert!(grid.is_occupied(22, 2));
        assert!(grid.is_occupied(23, 1));
        assert!(grid.is_occupied(23, 2));
        assert_eq!(grid.occupied_count(), 4);
        assert_eq!(grid.get(23, 1), Some(Some(ShapeKind::O)));
    }

    #[test]
    fn test_can_place_respects_walls_and_blocks() {
        let mut grid = Grid::new();
        assert!(grid.can_place(ShapeKind::I, Rotation::Zero, Anchor::new(0, 0)));
        assert!(!grid.can_place(ShapeKind::I, Rotation::Zero, Anchor::new(0, 7)));
        assert!(!grid.can_place(ShapeKind::I, Rotation::Zero, Anchor::new(23, 0)));

        grid.fill(1, 2, ShapeKind::Z);
        assert!(!grid.can_place(ShapeKind::I, Rotation::Zero, Anchor::new(0, 0)));
    }

    #[test]
    fn test_landing_row_on_floor_and_stack() {
        let mut grid = Grid::new();
        // Horizontal I occupies anchor row + 1, so it rests with anchor on row 22.
        assert_eq!(
            grid.landing_row(ShapeKind::I, Rotation::Zero, Anchor::new(0, 0)),
            Some(22)
        );

        grid.fill(23, 3, ShapeKind::T);
        assert_eq!(
            grid.landing_row(ShapeKind::I, Rotation::Zero, Anchor::new(0, 0)),
            Some(21)
        );
    }

    #[test]
    fn test_find_full_rows_top_to_bottom() {
        let grid = Grid::from_rows(&["##########", "#.########", "##########"]);
        let full: Vec<u8> = grid.find_full_rows().into_iter().collect();
        assert_eq!(full, vec![21, 23]);
    }

    #[test]
    fn test_clear_and_compact_shifts_rows_above() {
        let mut grid = Grid::from_rows(&[
            "#.........",
            "##########",
            ".#........",
            "##########",
        ]);
        let full = grid.clear_full_rows();
        assert_eq!(full.as_slice(), &[21, 23]);

        // Row 20 fell two rows, row 22 fell one row; columns unchanged.
        assert!(grid.is_occupied(22, 0));
        assert!(!grid.is_occupied(22, 1));
        assert!(grid.is_occupied(23, 1));
        assert!(!grid.is_occupied(23, 0));
        assert_eq!(grid.occupied_count(), 2);
    }

    #[test]
    fn test_clear_and_compact_removes_given_rows_only() {
        let mut grid = Grid::from_rows(&["#.........", "..#......."]);
        grid.clear_and_compact(&[23]);
        assert!(grid.is_occupied(23, 0));
        assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn test_heights_and_hidden_blocks() {
        let mut grid = Grid::from_rows(&["#.........", "#..#......"]);
        assert_eq!(grid.column_height(0), 2);
        assert_eq!(grid.column_height(3), 1);
        assert_eq!(grid.column_height(9), 0);
        assert!(!grid.has_hidden_blocks());

        grid.fill(3, 5, ShapeKind::L);
        assert!(grid.has_hidden_blocks());
        assert_eq!(grid.heights()[5], 21);
    }

    #[test]
    fn test_write_u8_grid_codes() {
        let mut grid = Grid::new();
        grid.fill(23, 0, ShapeKind::I);
        grid.fill(23, 9, ShapeKind::Z);

        let mut out = [[0u8; COLS]; ROWS];
        grid.write_u8_grid(&mut out);
        assert_eq!(out[23][0], 1);
        assert_eq!(out[23][9], 7);
        assert_eq!(out[22][0], 0);
    }

    #[test]
    fn test_display_marks_hidden_boundary() {
        let grid = Grid::from_rows(&["#........."]);
        let text = grid.to_string();
        assert_eq!(text.lines().count(), ROWS + 1);
        assert_eq!(text.lines().nth(HIDDEN_ROWS as usize), Some("----------"));
        assert_eq!(text.lines().last(), Some("#........."));
    }
}
