//! Line-of-sight mean extinction.
//!
//! For every cell, the mean of the extinction field over the Bresenham line
//! between the waypoint's reference cell and that cell (both endpoints
//! included). This is the dominant cost of a visibility query: every cell
//! walks a line of up to `max(nx, ny)` cells, so the whole field is
//! O(nx * ny * max(nx, ny)), cubic in the linear grid size. Rows are
//! independent, so they are computed in parallel; the result is identical
//! to the sequential evaluation.

use rayon::prelude::*;

use crate::core::{Field2D, LineCells};

/// Mean extinction along the line of sight from `ref_cell` to every cell.
///
/// A cell coincident with the reference cell averages over the single-cell
/// line, i.e. its own value.
pub fn mean_extinction_field(ref_cell: (usize, usize), slice: &Field2D<f32>) -> Field2D<f32> {
    let (nx, ny) = slice.dims();
    let mut out = Field2D::filled(nx, ny, 0.0f32);

    out.as_mut_slice()
        .par_chunks_mut(ny)
        .enumerate()
        .for_each(|(i, row)| {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = mean_along_line(ref_cell, (i, j), slice);
            }
        });

    out
}

fn mean_along_line(from: (usize, usize), to: (usize, usize), slice: &Field2D<f32>) -> f32 {
    let mut sum = 0.0f32;
    let mut count = 0usize;
    for (i, j) in LineCells::new(from, to) {
        sum += slice.at(i, j);
        count += 1;
    }
    sum / count as f32
}
