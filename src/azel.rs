//! Horizon-coordinate pairs.

use std::fmt;

use nalgebra::Vector2;

use crate::Float;

/// An azimuth/elevation pair, in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AzEl<F: Float> {
    /// Azimuth, in degrees.
    pub az: F,
    /// Elevation above the horizon, in degrees.
    pub el: F,
}

impl<F: Float> AzEl<F> {
    /// Create a new position.
    pub fn new(az: F, el: F) -> Self {
        Self { az, el }
    }

    /// Apply a relative offset `(Δaz, Δel)`.
    pub fn offset_by(self, offset: Vector2<F>) -> Self {
        Self {
            az: self.az + offset.x,
            el: self.el + offset.y,
        }
    }
}

impl<F: Float> fmt::Display for AzEl<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(az {:.2?}, el {:.2?})", self.az, self.el)
    }
}
