//! Visibility mapping session.
//!
//! [`VisMap`] owns the data source, the derived grid, the waypoint list and
//! the accumulated per-time-step aggregate maps. Per-waypoint maps are
//! recomputed on every query; only the aggregation history is stateful, and
//! it is mutated exclusively through [`VisMap::aggregate`].

use log::{debug, trace};

use crate::config::VisConfig;
use crate::core::{Field2D, Point2D, SliceGrid};
use crate::error::{Result, VisError};
use crate::source::{SliceSource, TimedSlice};
use crate::vis::{
    blocked_footprint, classify, distance_field, mean_extinction_field, occlusion_mask,
    view_weights,
};
use crate::waypoint::Waypoint;

/// Boolean visibility map for one waypoint at one time step.
#[derive(Clone, Debug)]
pub struct WaypointVismap {
    /// Index of the waypoint this map belongs to.
    pub waypoint: usize,
    /// Simulation time of the slice actually used.
    pub source_time: f32,
    /// Per-cell verdict: can this cell see the waypoint.
    pub cells: Field2D<bool>,
}

/// OR-aggregate over all waypoints for one time step.
#[derive(Clone, Debug)]
pub struct AggregateMap {
    /// The requested time this entry is keyed by.
    pub time: f32,
    /// Simulation time of the slice actually used.
    pub source_time: f32,
    /// Per-cell verdict: can this cell see any waypoint.
    pub cells: Field2D<bool>,
}

/// Visibility mapping session over one slice data source.
///
/// # Usage
///
/// ```rust,no_run
/// use drishti_map::{SliceSeries, VisConfig, VisMap, Waypoint};
/// # fn series() -> SliceSeries { unimplemented!() }
///
/// let mut vismap = VisMap::new(series(), VisConfig::default()).unwrap();
/// vismap.add_waypoint(Waypoint::new(8.0, 2.0)).unwrap();
/// vismap.add_waypoint(Waypoint::new(0.5, 9.0).with_contrast(5.0)).unwrap();
///
/// for time in [0.0, 60.0, 120.0] {
///     let agg = vismap.aggregate(time).unwrap();
///     println!("t={}: {} cells covered", agg.time, agg.cells.count_true());
/// }
/// let safe_everywhen = vismap.time_agglomerated().unwrap();
/// println!("always covered: {}", safe_everywhen.count_true());
/// ```
pub struct VisMap<S: SliceSource> {
    source: S,
    grid: SliceGrid,
    config: VisConfig,
    waypoints: Vec<Waypoint>,
    start_point: Option<Point2D>,
    aggregated: Vec<AggregateMap>,
}

impl<S: SliceSource> VisMap<S> {
    /// Create a session, deriving and validating the grid from the source.
    pub fn new(source: S, config: VisConfig) -> Result<Self> {
        let grid = SliceGrid::new(source.axis_x().to_vec(), source.axis_y().to_vec())?;
        Ok(Self {
            source,
            grid,
            config,
            waypoints: Vec::new(),
            start_point: None,
            aggregated: Vec::new(),
        })
    }

    /// The grid shared by all fields and maps.
    pub fn grid(&self) -> &SliceGrid {
        &self.grid
    }

    /// Session configuration.
    pub fn config(&self) -> &VisConfig {
        &self.config
    }

    /// Mutable configuration, for adjusting thresholds or factor switches
    /// between computations.
    pub fn config_mut(&mut self) -> &mut VisConfig {
        &mut self.config
    }

    /// Waypoints in insertion order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// The annotation start point, if set.
    pub fn start_point(&self) -> Option<Point2D> {
        self.start_point
    }

    /// Set the annotation start point (egress path origin).
    pub fn set_start_point(&mut self, x: f32, y: f32) {
        self.start_point = Some(Point2D::new(x, y));
    }

    /// Append a waypoint; returns its index.
    ///
    /// # Errors
    /// [`VisError::InvalidWaypoint`] for non-finite coordinates or a
    /// non-positive contrast.
    pub fn add_waypoint(&mut self, waypoint: Waypoint) -> Result<usize> {
        if !waypoint.position.is_finite() {
            return Err(VisError::InvalidWaypoint(format!(
                "coordinates ({}, {}) must be finite",
                waypoint.position.x, waypoint.position.y
            )));
        }
        if !waypoint.contrast.is_finite() || waypoint.contrast <= 0.0 {
            return Err(VisError::InvalidWaypoint(format!(
                "contrast {} must be positive",
                waypoint.contrast
            )));
        }
        self.waypoints.push(waypoint);
        Ok(self.waypoints.len() - 1)
    }

    /// Boolean visibility map for one waypoint at the nearest source time.
    pub fn waypoint_vismap(&self, index: usize, time: f32) -> Result<WaypointVismap> {
        let waypoint = *self
            .waypoints
            .get(index)
            .ok_or(VisError::WaypointIndex {
                index,
                len: self.waypoints.len(),
            })?;
        let slice = self.fetch_slice(time)?;
        let cells = self.compute_waypoint(&waypoint, &slice);
        Ok(WaypointVismap {
            waypoint: index,
            source_time: slice.time,
            cells,
        })
    }

    /// OR-aggregate all waypoints' maps for one time step and record it.
    ///
    /// The entry is keyed by the requested `time`; aggregating the same key
    /// again replaces the previous entry. Returns the recorded map.
    ///
    /// # Errors
    /// [`VisError::NoWaypoints`] if no waypoints are configured.
    pub fn aggregate(&mut self, time: f32) -> Result<&AggregateMap> {
        if self.waypoints.is_empty() {
            return Err(VisError::NoWaypoints);
        }
        let slice = self.fetch_slice(time)?;

        let (nx, ny) = self.grid.dims();
        let mut combined = Field2D::filled(nx, ny, false);
        for waypoint in &self.waypoints {
            let map = self.compute_waypoint(waypoint, &slice);
            combined.or_assign(&map);
        }
        debug!(
            "aggregated t={} (source t={}): {}/{} cells covered",
            time,
            slice.time,
            combined.count_true(),
            nx * ny
        );

        let entry = AggregateMap {
            time,
            source_time: slice.time,
            cells: combined,
        };
        let slot = match self.aggregated.iter().position(|m| m.time == time) {
            Some(pos) => {
                self.aggregated[pos] = entry;
                pos
            }
            None => {
                self.aggregated.push(entry);
                self.aggregated.len() - 1
            }
        };
        Ok(&self.aggregated[slot])
    }

    /// All recorded aggregate maps, in insertion order.
    pub fn aggregated(&self) -> &[AggregateMap] {
        &self.aggregated
    }

    /// AND-reduce every recorded aggregate map: cells that can see some
    /// waypoint at every aggregated time step.
    ///
    /// # Errors
    /// [`VisError::NoAggregatedMaps`] before the first [`aggregate`] call.
    ///
    /// [`aggregate`]: VisMap::aggregate
    pub fn time_agglomerated(&self) -> Result<Field2D<bool>> {
        let mut maps = self.aggregated.iter();
        let first = maps.next().ok_or(VisError::NoAggregatedMaps)?;
        let mut out = first.cells.clone();
        for map in maps {
            out.and_assign(&map.cells);
        }
        Ok(out)
    }

    fn fetch_slice(&self, time: f32) -> Result<TimedSlice> {
        let slice = self.source.slice_at(time);
        if slice.cells.dims() != self.grid.dims() {
            return Err(VisError::DimensionMismatch {
                expected: self.grid.dims(),
                actual: slice.cells.dims(),
            });
        }
        Ok(slice)
    }

    fn compute_waypoint(&self, waypoint: &Waypoint, slice: &TimedSlice) -> Field2D<bool> {
        let factors = self.config.factors;
        let ref_cell = self.grid.nearest_cell(waypoint.position);
        trace!(
            "waypoint at ({}, {}) -> reference cell {:?}",
            waypoint.position.x,
            waypoint.position.y,
            ref_cell
        );

        let distance = distance_field(&self.grid, waypoint.position);
        let view = view_weights(&self.grid, waypoint, &distance, factors.view_angle);
        let mean_ext = factors
            .extinction
            .then(|| mean_extinction_field(ref_cell, &slice.cells));
        let occlusion = factors.occlusion.then(|| {
            let blocked = blocked_footprint(
                &self.grid,
                self.source.obstructions(),
                self.config.eval_height,
            );
            occlusion_mask(ref_cell, &blocked)
        });

        classify(
            &view,
            mean_ext.as_ref(),
            occlusion.as_ref(),
            &distance,
            waypoint.contrast,
            self.config.min_vis,
            self.config.max_vis,
        )
    }
}
