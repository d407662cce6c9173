//! Euclidean distance field from a waypoint.

use crate::core::{Field2D, Point2D, SliceGrid};

/// Distance from `point` to every cell coordinate of the grid.
pub fn distance_field(grid: &SliceGrid, point: Point2D) -> Field2D<f32> {
    let (nx, ny) = grid.dims();
    let mut out = Field2D::filled(nx, ny, 0.0f32);
    for i in 0..nx {
        for j in 0..ny {
            out.set(i, j, grid.coord(i, j).distance(&point));
        }
    }
    out
}
