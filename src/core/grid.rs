//! Slice grid defined by non-uniform sample axes.
//!
//! Fire simulation slices sample the domain at explicit, possibly
//! non-uniformly spaced coordinates along each horizontal axis. The grid is
//! therefore defined by the two axis vectors themselves rather than by an
//! origin and a fixed resolution. Cell `(i, j)` sits at world coordinate
//! `(x[i], y[j])`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VisError};

use super::point::Point2D;

/// The rectangular lattice shared by every field and map in a session.
///
/// Both axes are non-empty and strictly increasing; this is validated at
/// construction and relied on by the nearest-sample lookups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SliceGrid {
    x: Vec<f32>,
    y: Vec<f32>,
}

impl SliceGrid {
    /// Build a grid from sample axes.
    ///
    /// # Errors
    /// Returns [`VisError::NonMonotonicAxis`] if either axis is empty or not
    /// strictly increasing.
    pub fn new(x: Vec<f32>, y: Vec<f32>) -> Result<Self> {
        if !strictly_increasing(&x) {
            return Err(VisError::NonMonotonicAxis("x"));
        }
        if !strictly_increasing(&y) {
            return Err(VisError::NonMonotonicAxis("y"));
        }
        Ok(Self { x, y })
    }

    /// X sample coordinates.
    #[inline]
    pub fn axis_x(&self) -> &[f32] {
        &self.x
    }

    /// Y sample coordinates.
    #[inline]
    pub fn axis_y(&self) -> &[f32] {
        &self.y
    }

    /// Grid dimensions `(nx, ny)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.x.len(), self.y.len())
    }

    /// World coordinate of cell `(i, j)`.
    #[inline]
    pub fn coord(&self, i: usize, j: usize) -> Point2D {
        Point2D::new(self.x[i], self.y[j])
    }

    /// Index of the x sample nearest to `x` (ties resolve to the lower index).
    #[inline]
    pub fn nearest_x(&self, x: f32) -> usize {
        nearest_index(&self.x, x)
    }

    /// Index of the y sample nearest to `y` (ties resolve to the lower index).
    #[inline]
    pub fn nearest_y(&self, y: f32) -> usize {
        nearest_index(&self.y, y)
    }

    /// Cell indices nearest to a world point.
    #[inline]
    pub fn nearest_cell(&self, point: Point2D) -> (usize, usize) {
        (self.nearest_x(point.x), self.nearest_y(point.y))
    }
}

fn strictly_increasing(axis: &[f32]) -> bool {
    !axis.is_empty()
        && axis.iter().all(|v| v.is_finite())
        && axis.windows(2).all(|w| w[0] < w[1])
}

/// Nearest-sample lookup on a strictly increasing axis.
///
/// Equidistant ties resolve to the lower index (first minimum).
fn nearest_index(axis: &[f32], value: f32) -> usize {
    // partition_point gives the count of samples below `value`.
    let upper = axis.partition_point(|&v| v < value);
    if upper == 0 {
        return 0;
    }
    if upper == axis.len() {
        return axis.len() - 1;
    }
    let lower = upper - 1;
    if value - axis[lower] <= axis[upper] - value {
        lower
    } else {
        upper
    }
}
