//! Error types raised during grid configuration and validation.

use thiserror::Error;

use crate::azel::AzEl;
use crate::limits::Axis;
use crate::Float;

/// Invalid input shape, caught while a grid is being configured.
///
/// None of these can occur once a sequence has been handed to a caller:
/// every variant is raised by a constructor or builder method, before any
/// position is generated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError<F: Float> {
    /// Parallel azimuth/elevation lists differ in length.
    #[error("mismatched coordinate lists: {azimuths} azimuth values but {elevations} elevation values")]
    MismatchedLengths {
        /// Number of azimuth values provided.
        azimuths: usize,
        /// Number of elevation values provided.
        elevations: usize,
    },

    /// An axis-value list is empty.
    #[error("empty {axis} list")]
    EmptySequence {
        /// The axis whose list was empty.
        axis: Axis,
    },

    /// An offset table with no entries.
    #[error("offset table is empty")]
    EmptyOffsets,

    /// A slew magnitude or walk radius that is not strictly positive.
    #[error("slew magnitude {value:.2?} must be strictly positive")]
    InvalidMagnitude {
        /// The offending magnitude, in degrees.
        value: F,
    },

    /// A probability outside `[0, 1]`.
    #[error("probability {value:.2?} outside [0, 1]")]
    InvalidProbability {
        /// The offending probability.
        value: F,
    },

    /// A sphere pixelization density of zero.
    #[error("grid density parameter nside must be at least 1, got {nside}")]
    InvalidDensity {
        /// The offending density parameter.
        nside: usize,
    },

    /// A min/max pair that does not satisfy `min < max`.
    #[error("{axis} range [{min:.2?}, {max:.2?}] does not satisfy min < max")]
    InvalidRange {
        /// The axis the range applies to.
        axis: Axis,
        /// Lower bound, in degrees.
        min: F,
        /// Upper bound, in degrees.
        max: F,
    },
}

/// A generated position violates the operational limits.
///
/// Identifies the offending axis and value, the limits, and the base grid
/// point whose pattern produced the position, so an operator can adjust the
/// grid rather than individual offsets.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{axis} {value:.2?} outside limits [{min:.2?}, {max:.2?}] for grid point {base}")]
pub struct BoundsError<F: Float> {
    /// The axis on which the violation occurred.
    pub axis: Axis,
    /// The offending coordinate value, in degrees.
    pub value: F,
    /// Lower limit on the axis, in degrees.
    pub min: F,
    /// Upper limit on the axis, in degrees.
    pub max: F,
    /// The base grid point whose pattern produced the position.
    pub base: AzEl<F>,
}

/// Any error this crate raises.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError<F: Float> {
    /// Invalid input shape.
    #[error(transparent)]
    Config(#[from] ConfigError<F>),
    /// A position outside the operational limits.
    #[error(transparent)]
    Bounds(#[from] BoundsError<F>),
}
