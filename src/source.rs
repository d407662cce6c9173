//! Simulation data source interface.
//!
//! Parsing the simulator's native output is out of scope for this crate; a
//! reader adapter implements [`SliceSource`] and hands the core what it
//! needs: the two sample axes of the horizontal slice, a time-indexed
//! extinction-coefficient field, and the obstruction boxes.
//! [`SliceSeries`] is the in-memory implementation used by tests and by
//! adapters that have already decoded their frames.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::Field2D;
use crate::error::{Result, VisError};

/// An extinction slice together with the simulation time it belongs to.
///
/// `time` is the time of the frame actually returned, which may differ from
/// the requested time under the nearest-timestep policy. Sessions carry it
/// through to their result maps so callers can see which frame was used.
#[derive(Clone, Debug)]
pub struct TimedSlice {
    /// Simulation time of the returned frame.
    pub time: f32,
    /// Extinction coefficients, congruent with the source axes.
    pub cells: Field2D<f32>,
}

/// An axis-aligned obstruction box in world coordinates.
///
/// Only its horizontal footprint matters, and only when the evaluation
/// height lies within the z extent (inclusive on both ends).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstruction {
    /// X extent `(min, max)` in metres.
    pub x: (f32, f32),
    /// Y extent `(min, max)` in metres.
    pub y: (f32, f32),
    /// Z extent `(min, max)` in metres.
    pub z: (f32, f32),
}

impl Obstruction {
    /// Create an obstruction from its three extents.
    pub fn new(x: (f32, f32), y: (f32, f32), z: (f32, f32)) -> Self {
        Self { x, y, z }
    }

    /// Whether the box spans the given height.
    #[inline]
    pub fn spans_height(&self, z: f32) -> bool {
        self.z.0 <= z && z <= self.z.1
    }
}

/// Supplier of slice data for visibility computations.
///
/// Axes must be strictly increasing; `slice_at` must return a field
/// congruent with `(axis_x().len(), axis_y().len())` and never fail: the
/// nearest available timestep is always returned, with the chosen time
/// reported in [`TimedSlice::time`].
pub trait SliceSource {
    /// Strictly increasing x sample coordinates.
    fn axis_x(&self) -> &[f32];

    /// Strictly increasing y sample coordinates.
    fn axis_y(&self) -> &[f32];

    /// Extinction slice for the timestep nearest to `time`.
    fn slice_at(&self, time: f32) -> TimedSlice;

    /// Obstruction boxes in the simulated domain.
    fn obstructions(&self) -> &[Obstruction];
}

/// In-memory slice series: decoded frames at sorted timesteps.
#[derive(Clone, Debug)]
pub struct SliceSeries {
    axis_x: Vec<f32>,
    axis_y: Vec<f32>,
    times: Vec<f32>,
    frames: Vec<Field2D<f32>>,
    obstructions: Vec<Obstruction>,
}

impl SliceSeries {
    /// Build a series from axes and `(time, frame)` pairs.
    ///
    /// # Errors
    /// Returns [`VisError::NonMonotonicAxis`] if an axis or the time vector
    /// is empty or not strictly increasing, and
    /// [`VisError::DimensionMismatch`] if any frame is not congruent with
    /// the axes.
    pub fn new(
        axis_x: Vec<f32>,
        axis_y: Vec<f32>,
        times: Vec<f32>,
        frames: Vec<Field2D<f32>>,
    ) -> Result<Self> {
        if axis_x.is_empty() || axis_x.windows(2).any(|w| w[0] >= w[1]) {
            return Err(VisError::NonMonotonicAxis("x"));
        }
        if axis_y.is_empty() || axis_y.windows(2).any(|w| w[0] >= w[1]) {
            return Err(VisError::NonMonotonicAxis("y"));
        }
        if times.is_empty() || times.len() != frames.len() || times.windows(2).any(|w| w[0] >= w[1])
        {
            return Err(VisError::NonMonotonicAxis("time"));
        }
        let expected = (axis_x.len(), axis_y.len());
        for frame in &frames {
            if frame.dims() != expected {
                return Err(VisError::DimensionMismatch {
                    expected,
                    actual: frame.dims(),
                });
            }
        }
        debug!(
            "slice series: {}x{} cells, {} timesteps",
            expected.0,
            expected.1,
            times.len()
        );
        Ok(Self {
            axis_x,
            axis_y,
            times,
            frames,
            obstructions: Vec::new(),
        })
    }

    /// Attach obstruction boxes to the series.
    pub fn with_obstructions(mut self, obstructions: Vec<Obstruction>) -> Self {
        self.obstructions = obstructions;
        self
    }

    /// Available timesteps.
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    /// Index of the timestep nearest to `time` (ties resolve to the
    /// earlier step).
    fn nearest_step(&self, time: f32) -> usize {
        let upper = self.times.partition_point(|&t| t < time);
        if upper == 0 {
            return 0;
        }
        if upper == self.times.len() {
            return self.times.len() - 1;
        }
        let lower = upper - 1;
        if time - self.times[lower] <= self.times[upper] - time {
            lower
        } else {
            upper
        }
    }
}

impl SliceSource for SliceSeries {
    fn axis_x(&self) -> &[f32] {
        &self.axis_x
    }

    fn axis_y(&self) -> &[f32] {
        &self.axis_y
    }

    fn slice_at(&self, time: f32) -> TimedSlice {
        let step = self.nearest_step(time);
        TimedSlice {
            time: self.times[step],
            cells: self.frames[step].clone(),
        }
    }

    fn obstructions(&self) -> &[Obstruction] {
        &self.obstructions
    }
}
