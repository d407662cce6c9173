//! Directional view weighting.
//!
//! An exit sign is easiest to read head-on and unreadable from behind. The
//! weight for a cell is the cosine of the angle between the line of sight
//! and the sign's facing axis, and drops to zero on the half-plane behind
//! the sign.

use crate::core::{Field2D, SliceGrid};
use crate::waypoint::{Facing, Waypoint};

/// View-direction weight in `[0, 1]` for every cell.
///
/// With `enabled == false` or an unoriented waypoint the weight is 1
/// everywhere. At the waypoint's own cell (distance 0) the cosine is
/// defined as 1; the behind-sign mask is applied afterwards and wins on
/// the boundary line.
pub fn view_weights(
    grid: &SliceGrid,
    waypoint: &Waypoint,
    distance: &Field2D<f32>,
    enabled: bool,
) -> Field2D<f32> {
    let (nx, ny) = grid.dims();
    debug_assert_eq!(distance.dims(), (nx, ny));

    let facing = match waypoint.facing {
        Some(f) if enabled => f,
        _ => return Field2D::filled(nx, ny, 1.0),
    };

    let wp = waypoint.position;
    let mut out = Field2D::filled(nx, ny, 0.0f32);
    for i in 0..nx {
        for j in 0..ny {
            let cell = grid.coord(i, j);
            let dist = distance.at(i, j);
            let cosine = if dist > 0.0 {
                match facing {
                    Facing::PlusX | Facing::MinusX => (cell.x - wp.x).abs() / dist,
                    Facing::PlusY | Facing::MinusY => (cell.y - wp.y).abs() / dist,
                }
            } else {
                1.0
            };
            let behind = match facing {
                Facing::PlusX => cell.x <= wp.x,
                Facing::MinusX => cell.x >= wp.x,
                Facing::PlusY => cell.y <= wp.y,
                Facing::MinusY => cell.y >= wp.y,
            };
            out.set(i, j, if behind { 0.0 } else { cosine });
        }
    }
    out
}
