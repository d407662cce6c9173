//! Rectangular field storage congruent with a [`SliceGrid`].
//!
//! All intermediate fields (distance, view weight, mean extinction) and all
//! result maps (occlusion, boolean visibility) share one layout: row-major
//! `Vec<T>` indexed x-major, `index = i * ny + j`. Keeping a single layout
//! lets the aggregation stages merge maps cell-by-cell without any
//! coordinate bookkeeping.
//!
//! [`SliceGrid`]: super::grid::SliceGrid

use serde::{Deserialize, Serialize};

/// A 2D field of values on the slice lattice.
///
/// Dimensions are `(nx, ny)`; cell `(i, j)` corresponds to the grid
/// coordinate `(x[i], y[j])`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field2D<T> {
    data: Vec<T>,
    nx: usize,
    ny: usize,
}

impl<T: Copy> Field2D<T> {
    /// Create a field with every cell set to `value`.
    pub fn filled(nx: usize, ny: usize, value: T) -> Self {
        Self {
            data: vec![value; nx * ny],
            nx,
            ny,
        }
    }

    /// Field dimensions `(nx, ny)`.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Value at cell `(i, j)`.
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> T {
        self.data[i * self.ny + j]
    }

    /// Set cell `(i, j)`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: T) {
        self.data[i * self.ny + j] = value;
    }

    /// All values in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// All values in storage order, mutable.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Iterate `((i, j), value)` over all cells.
    pub fn iter_cells(&self) -> impl Iterator<Item = ((usize, usize), T)> + '_ {
        let ny = self.ny;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, &v)| ((idx / ny, idx % ny), v))
    }
}

impl Field2D<bool> {
    /// Cell-wise OR with another congruent map.
    pub fn or_assign(&mut self, other: &Field2D<bool>) {
        debug_assert_eq!(self.dims(), other.dims());
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a |= b;
        }
    }

    /// Cell-wise AND with another congruent map.
    pub fn and_assign(&mut self, other: &Field2D<bool>) {
        debug_assert_eq!(self.dims(), other.dims());
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a &= b;
        }
    }

    /// Number of true cells.
    pub fn count_true(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }
}
