//! Obstruction occlusion tracing.
//!
//! Obstructions whose vertical extent spans the evaluation height project a
//! blocked footprint onto the slice. Rays are cast from the waypoint's
//! reference cell to every cell on the grid's outer boundary; each ray
//! marks cells reachable until it first enters the footprint, and the
//! per-ray masks are OR-folded into the final mask. The result is the
//! shadow cast by the footprints from a point light at the reference cell.
//!
//! Rays are independent of one another: a ray is cut only by the footprint,
//! never by the state another ray left behind, so the fold order cannot
//! change the result and the rays run in parallel.

use rayon::prelude::*;

use crate::core::{Field2D, LineCells, SliceGrid};
use crate::source::Obstruction;

/// Footprint of all obstructions spanning `height`, on grid indices.
///
/// Each relevant obstruction marks the half-open index rectangle
/// `[nearest(x_min), nearest(x_max)) x [nearest(y_min), nearest(y_max))`.
/// An extent narrower than one cell spacing marks nothing.
pub fn blocked_footprint(
    grid: &SliceGrid,
    obstructions: &[Obstruction],
    height: f32,
) -> Field2D<bool> {
    let (nx, ny) = grid.dims();
    let mut out = Field2D::filled(nx, ny, false);
    for obst in obstructions {
        if !obst.spans_height(height) {
            continue;
        }
        let i_min = grid.nearest_x(obst.x.0);
        let i_max = grid.nearest_x(obst.x.1);
        let j_min = grid.nearest_y(obst.y.0);
        let j_max = grid.nearest_y(obst.y.1);
        for i in i_min..i_max {
            for j in j_min..j_max {
                out.set(i, j, true);
            }
        }
    }
    out
}

/// Cells with an unblocked line of sight from `ref_cell`.
///
/// A cell is reachable if any boundary ray marks it before hitting the
/// footprint; the first blocked cell on a ray and everything beyond it stay
/// unmarked. With an empty footprint every cell is reachable.
pub fn occlusion_mask(ref_cell: (usize, usize), blocked: &Field2D<bool>) -> Field2D<bool> {
    let (nx, ny) = blocked.dims();
    let boundary = boundary_cells(nx, ny);

    boundary
        .par_iter()
        .fold(
            || Field2D::filled(nx, ny, false),
            |mut mask, &edge| {
                for (i, j) in LineCells::new(ref_cell, edge) {
                    if blocked.at(i, j) {
                        break;
                    }
                    mask.set(i, j, true);
                }
                mask
            },
        )
        .reduce(
            || Field2D::filled(nx, ny, false),
            |mut a, b| {
                a.or_assign(&b);
                a
            },
        )
}

/// All cells on the perimeter of an `nx` by `ny` index rectangle.
fn boundary_cells(nx: usize, ny: usize) -> Vec<(usize, usize)> {
    let mut cells = Vec::with_capacity(2 * (nx + ny));
    for i in 0..nx {
        for j in 0..ny {
            if i == 0 || i == nx - 1 || j == 0 || j == ny - 1 {
                cells.push((i, j));
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid5() -> SliceGrid {
        let axis: Vec<f32> = (0..5).map(|v| v as f32).collect();
        SliceGrid::new(axis.clone(), axis).unwrap()
    }

    #[test]
    fn test_no_obstructions_everything_reachable() {
        let grid = grid5();
        let blocked = blocked_footprint(&grid, &[], 2.0);
        let mask = occlusion_mask((2, 2), &blocked);
        assert_eq!(mask.count_true(), 25);
    }

    #[test]
    fn test_footprint_half_open_range() {
        let grid = grid5();
        let obst = Obstruction::new((1.0, 3.0), (1.0, 2.0), (0.0, 3.0));
        let blocked = blocked_footprint(&grid, &[obst], 2.0);
        // x indices 1..3, y indices 1..2
        assert!(blocked.at(1, 1));
        assert!(blocked.at(2, 1));
        assert!(!blocked.at(3, 1));
        assert!(!blocked.at(1, 2));
        assert_eq!(blocked.count_true(), 2);
    }

    #[test]
    fn test_footprint_ignores_obstruction_outside_height() {
        let grid = grid5();
        let obst = Obstruction::new((1.0, 3.0), (1.0, 3.0), (4.0, 5.0));
        let blocked = blocked_footprint(&grid, &[obst], 2.0);
        assert_eq!(blocked.count_true(), 0);
    }

    #[test]
    fn test_degenerate_extent_marks_nothing() {
        let grid = grid5();
        let obst = Obstruction::new((2.0, 2.0), (0.0, 4.0), (0.0, 3.0));
        let blocked = blocked_footprint(&grid, &[obst], 2.0);
        assert_eq!(blocked.count_true(), 0);
    }

    #[test]
    fn test_wall_casts_shadow() {
        let grid = grid5();
        // Wall across x = 1..2 (cells at i = 1), y = 0..4 except a hole is
        // not present: block column i = 1, rows j = 1..4.
        let mut blocked = Field2D::filled(5, 5, false);
        for j in 0..5 {
            blocked.set(1, j, true);
        }
        let mask = occlusion_mask((3, 2), &blocked);
        // The blocked column itself is not reachable.
        for j in 0..5 {
            assert!(!mask.at(1, j), "blocked cell (1,{j}) must stay unmarked");
        }
        // Everything at x >= 2 is in front of the wall and reachable.
        for i in 2..5 {
            for j in 0..5 {
                assert!(mask.at(i, j), "cell ({i},{j}) in front of wall");
            }
        }
        // Cells straight behind the wall are shadowed.
        assert!(!mask.at(0, 2));
    }

    #[test]
    fn test_blocked_reference_cell_sees_nothing() {
        let grid = grid5();
        let mut blocked = blocked_footprint(&grid, &[], 2.0);
        blocked.set(2, 2, true);
        let mask = occlusion_mask((2, 2), &blocked);
        assert_eq!(mask.count_true(), 0);
    }

    #[test]
    fn test_adding_obstruction_is_monotonic() {
        let grid = grid5();
        let wall = Obstruction::new((1.0, 2.0), (0.0, 4.0), (0.0, 3.0));
        let extra = Obstruction::new((3.0, 4.0), (2.0, 4.0), (0.0, 3.0));
        let base = occlusion_mask((2, 2), &blocked_footprint(&grid, &[wall], 2.0));
        let more = occlusion_mask((2, 2), &blocked_footprint(&grid, &[wall, extra], 2.0));
        for ((i, j), reachable) in more.iter_cells() {
            if reachable {
                assert!(base.at(i, j), "({i},{j}) reachable only after adding");
            }
        }
    }

    #[test]
    fn test_single_row_grid() {
        let blocked = Field2D::filled(5, 1, false);
        let mask = occlusion_mask((0, 0), &blocked);
        assert_eq!(mask.count_true(), 5);
    }
}
