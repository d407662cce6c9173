//! # Drishti-Map: Smoke Visibility Mapping
//!
//! Computes, from a fire simulation's horizontal smoke extinction slice,
//! whether an occupant at any grid cell can see a safety waypoint (exit
//! sign) at a given simulation time, and aggregates per-waypoint maps into
//! "can some sign be seen from here" (per time step) and "can some sign be
//! seen from here at every time step" (time-agglomerated).
//!
//! ## Quick Start
//!
//! ```rust
//! use drishti_map::{Facing, Field2D, SliceSeries, VisConfig, VisMap, Waypoint};
//!
//! // A 5x5 slice with uniform smoke at two timesteps.
//! let axis: Vec<f32> = (0..5).map(|v| v as f32).collect();
//! let frames = vec![Field2D::filled(5, 5, 0.1), Field2D::filled(5, 5, 0.4)];
//! let series = SliceSeries::new(axis.clone(), axis, vec![0.0, 60.0], frames).unwrap();
//!
//! let mut vismap = VisMap::new(series, VisConfig::default()).unwrap();
//! vismap.add_waypoint(Waypoint::new(4.0, 2.0).with_facing(Facing::MinusX)).unwrap();
//!
//! vismap.aggregate(0.0).unwrap();
//! vismap.aggregate(60.0).unwrap();
//! let always = vismap.time_agglomerated().unwrap();
//! assert!(always.at(0, 2));
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: grid axes, field storage, line rasterization
//! - [`source`]: the [`SliceSource`] data interface and in-memory series
//! - [`waypoint`]: sign positions, contrast, facing direction
//! - [`vis`]: the per-waypoint computation kernels
//! - [`session`]: the [`VisMap`] session and aggregation state
//! - [`config`]: thresholds, evaluation height, factor switches
//!
//! ## Data Flow
//!
//! ```text
//!   ┌──────────────┐   axes, slices, obstructions
//!   │ SliceSource  ├──────────────┬─────────────────────┐
//!   └──────────────┘              │                     │
//!                                 ▼                     ▼
//!   ┌──────────────┐   ┌──────────────────┐   ┌──────────────────┐
//!   │   Waypoint   ├──►│ distance / view  │   │ mean extinction  │
//!   └──────────────┘   │     weights      │   │ along sight line │
//!                      └────────┬─────────┘   └────────┬─────────┘
//!                               │    ┌─────────────────┘
//!                               ▼    ▼
//!                      ┌──────────────────┐   ┌──────────────────┐
//!                      │    classify      │◄──┤ occlusion tracer │
//!                      │ (boolean vismap) │   └──────────────────┘
//!                      └────────┬─────────┘
//!                               │  OR over waypoints, per time step
//!                               ▼
//!                      ┌──────────────────┐   AND over time steps
//!                      │  AggregateMap    ├──► time-agglomerated map
//!                      └──────────────────┘
//! ```
//!
//! ## Cost Model
//!
//! The extinction averager and the occlusion tracer both rasterize one line
//! per cell or boundary cell and dominate the cost (cubic in the linear
//! grid size). Both parallelize over independent rows/rays with rayon;
//! results are independent of execution order.

pub mod config;
pub mod core;
pub mod error;
pub mod session;
pub mod source;
pub mod vis;
pub mod waypoint;

pub use config::{Factors, VisConfig};
pub use self::core::{Field2D, LineCells, Point2D, SliceGrid};
pub use error::{Result, VisError};
pub use session::{AggregateMap, VisMap, WaypointVismap};
pub use source::{Obstruction, SliceSeries, SliceSource, TimedSlice};
pub use waypoint::{Facing, Waypoint, DEFAULT_CONTRAST};
