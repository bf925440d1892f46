use scene_demos::grid::{ColorGrid, GridError};
use scene_demos::math::Rgba;
use scene_demos::picking::{CellPalette, GridCell};

#[test]
fn test_dimensions_and_layout() {
    let grid = ColorGrid::from_fn(2, 4, |r, c| Rgba::opaque(r as f32, c as f32, 0.0));
    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.cols(), 4);

    for r in 0..2 {
        for c in 0..4 {
            let cell = grid.get(r, c).unwrap();
            assert_eq!(cell.r, r as f32);
            assert_eq!(cell.g, c as f32);
        }
    }
}

#[test]
fn test_bounds_checked_accessors() {
    let mut grid = ColorGrid::filled(3, 3, Rgba::BLACK);

    assert!(matches!(
        grid.get(0, 3),
        Err(GridError::OutOfBounds { col: 3, .. })
    ));
    assert!(matches!(
        grid.set(3, 0, Rgba::WHITE),
        Err(GridError::OutOfBounds { row: 3, .. })
    ));
    // Failed set leaves the grid untouched.
    assert_eq!(grid.get(2, 0).unwrap(), Rgba::BLACK);
}

#[test]
fn test_mutation_is_per_cell() {
    let mut grid = ColorGrid::filled(3, 3, Rgba::BLACK);
    grid.set(1, 2, Rgba::WHITE).unwrap();

    for r in 0..3 {
        for c in 0..3 {
            let expected = if (r, c) == (1, 2) { Rgba::WHITE } else { Rgba::BLACK };
            assert_eq!(grid.get(r, c).unwrap(), expected);
        }
    }
}

#[test]
fn test_palette_view_matches_accessors() {
    let mut grid = ColorGrid::filled(2, 2, Rgba::opaque(0.1, 0.2, 0.3));

    let cell = GridCell::new(1, 1);
    assert_eq!(grid.color(cell), Some(Rgba::opaque(0.1, 0.2, 0.3)));
    assert!(grid.set_color(cell, Rgba::WHITE));
    assert_eq!(grid.get(1, 1).unwrap(), Rgba::WHITE);

    let outside = GridCell::new(2, 0);
    assert_eq!(grid.color(outside), None);
    assert!(!grid.set_color(outside, Rgba::WHITE));
}

#[test]
fn test_non_square_grids() {
    let grid = ColorGrid::filled(1, 5, Rgba::WHITE);
    assert!(grid.get(0, 4).is_ok());
    assert!(grid.get(1, 0).is_err());
}
