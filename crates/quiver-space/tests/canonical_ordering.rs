//! Canonical ordering agrees with the nested-loop definition.

use quiver_space::{Axis, Grid2D};

#[test]
fn grid_iteration_matches_nested_axis_loops() {
    let xs = Axis::new(-5.25, 5.25, 0.5).unwrap();
    let ys = Axis::new(-2.0, 2.0, 0.25).unwrap();
    let grid = Grid2D::new(xs.clone(), ys.clone()).unwrap();

    let mut expected = Vec::with_capacity(grid.point_count());
    for (i, x) in xs.iter().enumerate() {
        for (j, y) in ys.iter().enumerate() {
            expected.push((i, j, x, y));
        }
    }

    let actual: Vec<_> = grid
        .iter()
        .map(|p| (p.i, p.j, p.position.x, p.position.y))
        .collect();
    assert_eq!(actual, expected);

    for (k, &(i, j, _, _)) in expected.iter().enumerate() {
        assert_eq!(grid.flat_index(i, j).unwrap(), k);
    }
}
