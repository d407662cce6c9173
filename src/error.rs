//! Error types for drishti-map.

use thiserror::Error;

/// Errors surfaced by the visibility session and its collaborators.
///
/// Numeric edge cases (zero extinction, coincident cells) are not errors;
/// they resolve to documented fallback values inside the computation.
#[derive(Error, Debug)]
pub enum VisError {
    /// A visibility query was issued before any waypoint was configured.
    #[error("no waypoints configured")]
    NoWaypoints,

    /// Time agglomeration was requested before any time step was aggregated.
    #[error("no aggregated maps recorded; call aggregate() first")]
    NoAggregatedMaps,

    /// A per-waypoint query referenced a waypoint that does not exist.
    #[error("waypoint index {index} out of range (have {len})")]
    WaypointIndex { index: usize, len: usize },

    /// A waypoint failed validation on insert.
    #[error("invalid waypoint: {0}")]
    InvalidWaypoint(String),

    /// A data-source axis is empty or not strictly increasing.
    #[error("{0} axis must be non-empty and strictly increasing")]
    NonMonotonicAxis(&'static str),

    /// A slice returned by the data source does not match the grid.
    #[error("slice dimensions {actual:?} do not match grid {expected:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Configuration could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, VisError>;
