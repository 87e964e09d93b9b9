//! Shape catalog and rotation tests

use block_stack::core::shapes::{
    kicks, mask_bounds, rotation_mask, spawn_anchor, try_rotate, Anchor,
};
use block_stack::core::Grid;
use block_stack::types::{Rotation, ShapeKind, Spin, GRID_COLS, HIDDEN_ROWS};

// ============== Mask Tests ==============

#[test]
fn test_i_piece_masks() {
    assert_eq!(
        rotation_mask(ShapeKind::I, Rotation::Zero),
        [(1, 0), (1, 1), (1, 2), (1, 3)]
    );
    assert_eq!(
        rotation_mask(ShapeKind::I, Rotation::R),
        [(0, 2), (1, 2), (2, 2), (3, 2)]
    );
    assert_eq!(
        rotation_mask(ShapeKind::I, Rotation::Two),
        [(2, 0), (2, 1), (2, 2), (2, 3)]
    );
    assert_eq!(
        rotation_mask(ShapeKind::I, Rotation::L),
        [(0, 1), (1, 1), (2, 1), (3, 1)]
    );
}

#[test]
fn test_o_piece_same_for_all_rotations() {
    let zero = rotation_mask(ShapeKind::O, Rotation::Zero);
    for rotation in Rotation::ALL {
        assert_eq!(rotation_mask(ShapeKind::O, rotation), zero);
    }
}

#[test]
fn test_t_piece_points_the_right_way() {
    // Zero: nub on top; Two: nub below.
    assert_eq!(
        rotation_mask(ShapeKind::T, Rotation::Zero),
        [(0, 1), (1, 0), (1, 1), (1, 2)]
    );
    assert_eq!(
        rotation_mask(ShapeKind::T, Rotation::Two),
        [(1, 0), (1, 1), (1, 2), (2, 1)]
    );
}

#[test]
fn test_four_quarter_turns_return_to_start() {
    for kind in ShapeKind::ALL {
        let mut rotation = Rotation::Zero;
        for _ in 0..4 {
            rotation = rotation.rotate_cw();
        }
        assert_eq!(rotation_mask(kind, rotation), rotation_mask(kind, Rotation::Zero));
    }
}

// ============== Kick Tests ==============

#[test]
fn test_kick_tables_have_five_offsets_for_adjacent_turns() {
    for kind in [ShapeKind::I, ShapeKind::J, ShapeKind::T] {
        for from in Rotation::ALL {
            assert_eq!(kicks(kind, from, from.rotate_cw()).len(), 5);
            assert_eq!(kicks(kind, from, from.rotate_ccw()).len(), 5);
        }
    }
}

#[test]
fn test_missing_kick_table_defaults_to_zero() {
    assert_eq!(kicks(ShapeKind::O, Rotation::Zero, Rotation::R), &[(0, 0)]);
    assert_eq!(kicks(ShapeKind::S, Rotation::R, Rotation::L), &[(0, 0)]);
}

#[test]
fn test_jlstz_kicks_mirror_between_directions() {
    // Going 0->R and back R->0 uses opposite offsets.
    let there = kicks(ShapeKind::T, Rotation::Zero, Rotation::R);
    let back = kicks(ShapeKind::T, Rotation::R, Rotation::Zero);
    for (a, b) in there.iter().zip(back) {
        assert_eq!((a.0, a.1), (-b.0, -b.1));
    }
}

// ============== Rotation Tests ==============

#[test]
fn test_rotate_t_near_right_wall_kicks_left() {
    let grid = Grid::new();
    // Upright T with its stem against the right wall; turning flat needs
    // one more column than is left.
    let anchor = Anchor::new(10, GRID_COLS as i8 - 2);
    assert!(grid.can_place(ShapeKind::T, Rotation::L, anchor));
    assert!(!grid.can_place(ShapeKind::T, Rotation::Zero, anchor));

    let (rotation, kicked) = try_rotate(ShapeKind::T, Rotation::L, anchor, Spin::Cw, |r, c| {
        grid.is_free(r, c)
    })
    .unwrap();
    assert_eq!(rotation, Rotation::Zero);
    assert_eq!(kicked, anchor.shifted(-1, 0));
    assert!(grid.can_place(ShapeKind::T, rotation, kicked));
}

#[test]
fn test_spawn_anchor_puts_piece_on_first_visible_row() {
    for kind in ShapeKind::ALL {
        let anchor = spawn_anchor(kind);
        let bounds = mask_bounds(kind, Rotation::Zero);
        assert_eq!(anchor.row + bounds.max_row, HIDDEN_ROWS as i8);
        assert_eq!(anchor.col, 3);
    }
}
