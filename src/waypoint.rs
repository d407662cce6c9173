//! Waypoints: the sign positions whose visibility is evaluated.

use serde::{Deserialize, Serialize};

use crate::core::Point2D;

/// Default sign contrast factor (JIN contrast for illuminated exit signs).
pub const DEFAULT_CONTRAST: f32 = 3.0;

/// Outward facing direction of a sign.
///
/// A sign mounted facing `MinusX` is readable only from cells with a smaller
/// x coordinate; the half-plane behind it is masked out by the view
/// weighter. The simulator encodes these as signed axis codes (±1 for x,
/// ±2 for y); [`Facing::from_ior`] accepts those.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    /// Faces toward increasing x; seen from cells with larger x.
    PlusX,
    /// Faces toward decreasing x; seen from cells with smaller x.
    MinusX,
    /// Faces toward increasing y.
    PlusY,
    /// Faces toward decreasing y.
    MinusY,
}

impl Facing {
    /// Decode a simulator orientation code (±1 → ±x, ±2 → ±y).
    ///
    /// Returns `None` for any other code, including 0.
    pub fn from_ior(ior: i8) -> Option<Facing> {
        match ior {
            1 => Some(Facing::PlusX),
            -1 => Some(Facing::MinusX),
            2 => Some(Facing::PlusY),
            -2 => Some(Facing::MinusY),
            _ => None,
        }
    }

    /// The simulator orientation code for this facing.
    pub fn ior(self) -> i8 {
        match self {
            Facing::PlusX => 1,
            Facing::MinusX => -1,
            Facing::PlusY => 2,
            Facing::MinusY => -2,
        }
    }
}

/// A point of interest (exit sign) with contrast and optional facing.
///
/// Appended to a session before computation and immutable afterwards;
/// referenced by its insertion index.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Sign position in world coordinates.
    pub position: Point2D,
    /// Contrast factor; must be positive.
    pub contrast: f32,
    /// Outward facing direction; `None` means visible from every direction.
    pub facing: Option<Facing>,
}

impl Waypoint {
    /// Sign at `(x, y)` with the default contrast and no facing.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Point2D::new(x, y),
            contrast: DEFAULT_CONTRAST,
            facing: None,
        }
    }

    /// Builder-style contrast override.
    pub fn with_contrast(mut self, contrast: f32) -> Self {
        self.contrast = contrast;
        self
    }

    /// Builder-style facing override.
    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = Some(facing);
        self
    }
}
