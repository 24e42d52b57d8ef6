//! Operational limits on telescope movement.

use std::fmt;

use crate::azel::AzEl;
use crate::error::{BoundsError, ConfigError};
use crate::Float;

/// A pointing axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// The azimuth axis.
    Azimuth,
    /// The elevation axis.
    Elevation,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Azimuth => write!(f, "azimuth"),
            Axis::Elevation => write!(f, "elevation"),
        }
    }
}

/// Hard min/max bounds on azimuth and elevation, in degrees.
///
/// Movement beyond these bounds is disallowed: every position produced by a
/// grid is checked against the limits before the sequence reaches a caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Limits<F: Float> {
    min_az: F,
    max_az: F,
    min_el: F,
    max_el: F,
}

impl<F: Float> Limits<F> {
    /// Create a new set of limits.
    ///
    /// Each axis must satisfy `min < max`.
    pub fn new(min_az: F, max_az: F, min_el: F, max_el: F) -> Result<Self, ConfigError<F>> {
        if min_az >= max_az {
            return Err(ConfigError::InvalidRange {
                axis: Axis::Azimuth,
                min: min_az,
                max: max_az,
            });
        }
        if min_el >= max_el {
            return Err(ConfigError::InvalidRange {
                axis: Axis::Elevation,
                min: min_el,
                max: max_el,
            });
        }
        Ok(Self {
            min_az,
            max_az,
            min_el,
            max_el,
        })
    }

    /// The permissive envelope: azimuth in `[0, 360]`, elevation in `[0, 90]`.
    pub fn full_range() -> Self {
        Self {
            min_az: F::from_f64(0.).unwrap(),
            max_az: F::from_f64(360.).unwrap(),
            min_el: F::from_f64(0.).unwrap(),
            max_el: F::from_f64(90.).unwrap(),
        }
    }

    /// Lower azimuth limit, in degrees.
    pub fn min_az(&self) -> F {
        self.min_az
    }

    /// Upper azimuth limit, in degrees.
    pub fn max_az(&self) -> F {
        self.max_az
    }

    /// Lower elevation limit, in degrees.
    pub fn min_el(&self) -> F {
        self.min_el
    }

    /// Upper elevation limit, in degrees.
    pub fn max_el(&self) -> F {
        self.max_el
    }

    /// Whether an azimuth value lies within the limits.
    pub fn az_in_range(&self, az: F) -> bool {
        az >= self.min_az && az <= self.max_az
    }

    /// Whether an elevation value lies within the limits.
    pub fn el_in_range(&self, el: F) -> bool {
        el >= self.min_el && el <= self.max_el
    }

    /// Whether a position lies within the limits on both axes.
    pub fn contains(&self, position: AzEl<F>) -> bool {
        self.az_in_range(position.az) && self.el_in_range(position.el)
    }

    /// Check a position, reporting the base grid point that produced it on
    /// violation.
    pub fn check(&self, position: AzEl<F>, base: AzEl<F>) -> Result<(), BoundsError<F>> {
        if !self.az_in_range(position.az) {
            return Err(BoundsError {
                axis: Axis::Azimuth,
                value: position.az,
                min: self.min_az,
                max: self.max_az,
                base,
            });
        }
        if !self.el_in_range(position.el) {
            return Err(BoundsError {
                axis: Axis::Elevation,
                value: position.el,
                min: self.min_el,
                max: self.max_el,
                base,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_ranges() {
        assert_eq!(
            Limits::new(270.0, -270.0, 15.0, 86.5),
            Err(ConfigError::InvalidRange {
                axis: Axis::Azimuth,
                min: 270.0,
                max: -270.0,
            })
        );
        assert_eq!(
            Limits::new(0.0, 360.0, 86.5, 86.5),
            Err(ConfigError::InvalidRange {
                axis: Axis::Elevation,
                min: 86.5,
                max: 86.5,
            })
        );
    }

    #[test]
    fn check_is_inclusive_at_the_bounds() {
        let limits = Limits::new(0.0, 360.0, 15.0, 86.5).unwrap();
        assert!(limits.check(AzEl::new(0.0, 86.5), AzEl::new(0.0, 80.0)).is_ok());
        assert!(limits.check(AzEl::new(360.0, 15.0), AzEl::new(0.0, 80.0)).is_ok());
    }

    #[test]
    fn check_reports_axis_value_and_base() {
        let limits = Limits::new(0.0, 360.0, 15.0, 86.5).unwrap();
        let base = AzEl::new(120.0, 82.0);
        let err = limits.check(AzEl::new(120.0, 88.2), base).unwrap_err();
        assert_eq!(err.axis, Axis::Elevation);
        assert_eq!(err.value, 88.2);
        assert_eq!(err.max, 86.5);
        assert_eq!(err.base, base);
    }

    #[test]
    fn contains_matches_per_axis_checks() {
        let limits = Limits::new(-180.0, 180.0, 20.0, 80.0).unwrap();
        assert!(limits.contains(AzEl::new(-180.0, 20.0)));
        assert!(!limits.contains(AzEl::new(-180.1, 50.0)));
        assert!(!limits.contains(AzEl::new(0.0, 19.9)));
    }
}
