//! Diamond slew patterns for dynamic performance characterization.

use nalgebra::Vector2;

use crate::azel::AzEl;
use crate::convert::IntoAxisValues;
use crate::error::ConfigError;
use crate::geometry::cumulative_track;
use crate::limits::Axis;
use crate::sequence::{Group, Pattern};
use crate::Float;

/// Decimal places kept on produced coordinates, so logged positions compare
/// reproducibly across runs.
pub(crate) const SLEW_DECIMALS: i32 = 2;

/// The canonical diamond offset table for a pair of slew magnitudes.
///
/// The table starts with a zero offset (the slew onto the grid point itself)
/// followed, for the long and then the short magnitude `m`, by a closed loop
/// that returns to the base point: elevation up by `m`, a 45° descending
/// diagonal of length `m`, elevation down by `m`, a 45° ascending diagonal
/// of length `m`, then azimuth out by `m` and back. Offsets are relative to
/// the previous position, not the base.
pub fn diamond_offsets<F: Float>(long_slew: F, short_slew: F) -> Vec<Vector2<F>> {
    let zero = F::from_f64(0.).unwrap();
    let mut offsets = vec![Vector2::new(zero, zero)];
    offsets.extend([long_slew, short_slew].into_iter().flat_map(|m| {
        let d = m * F::frac_pi_4().cos();
        [
            Vector2::new(zero, m),
            Vector2::new(d, -d),
            Vector2::new(zero, -m),
            Vector2::new(-d, d),
            Vector2::new(m, zero),
            Vector2::new(-m, zero),
        ]
    }));
    offsets
}

/// A cumulative-offset pattern executed around one or more base points.
///
/// Offsets apply cumulatively: each position is the previous position plus
/// the next table entry. Fully deterministic given the base points and the
/// table.
#[derive(Clone, Debug)]
pub struct DiamondPattern<F: Float> {
    bases: Vec<AzEl<F>>,
    offsets: Vec<Vector2<F>>,
}

impl<F: Float> DiamondPattern<F> {
    /// Create the pattern with the canonical table from
    /// [`diamond_offsets`].
    ///
    /// # Arguments
    /// - `azimuths`, `elevations`: parallel lists of base grid points, in
    ///   degrees. Must be non-empty and of equal length.
    /// - `long_slew`, `short_slew`: slew magnitudes in degrees, strictly
    ///   positive.
    pub fn new<A>(
        azimuths: A,
        elevations: A,
        long_slew: F,
        short_slew: F,
    ) -> Result<Self, ConfigError<F>>
    where
        A: IntoAxisValues<F>,
    {
        let zero = F::from_f64(0.).unwrap();
        for magnitude in [long_slew, short_slew] {
            if magnitude <= zero {
                return Err(ConfigError::InvalidMagnitude { value: magnitude });
            }
        }
        Ok(Self {
            bases: base_points(azimuths, elevations)?,
            offsets: diamond_offsets(long_slew, short_slew),
        })
    }

    /// Replace the offset table.
    pub(crate) fn set_offsets(&mut self, offsets: &[(F, F)]) -> Result<(), ConfigError<F>> {
        if offsets.is_empty() {
            return Err(ConfigError::EmptyOffsets);
        }
        self.offsets = offsets
            .iter()
            .map(|&(daz, del)| Vector2::new(daz, del))
            .collect();
        Ok(())
    }

    /// Flip the sign of every offset, producing the mirror-image traversal.
    pub(crate) fn reverse(&mut self) {
        for offset in &mut self.offsets {
            *offset = -*offset;
        }
    }
}

impl<F: Float> Pattern<F> for DiamondPattern<F> {
    fn expand(&self) -> Result<Vec<Group<F>>, ConfigError<F>> {
        Ok(self
            .bases
            .iter()
            .map(|&base| Group::new(base, cumulative_track(base, &self.offsets, SLEW_DECIMALS)))
            .collect())
    }
}

/// Zip parallel azimuth/elevation lists into base points.
fn base_points<F, A>(azimuths: A, elevations: A) -> Result<Vec<AzEl<F>>, ConfigError<F>>
where
    F: Float,
    A: IntoAxisValues<F>,
{
    let azimuths = azimuths.into_axis_values();
    let elevations = elevations.into_axis_values();
    if azimuths.is_empty() {
        return Err(ConfigError::EmptySequence { axis: Axis::Azimuth });
    }
    if elevations.is_empty() {
        return Err(ConfigError::EmptySequence {
            axis: Axis::Elevation,
        });
    }
    if azimuths.len() != elevations.len() {
        return Err(ConfigError::MismatchedLengths {
            azimuths: azimuths.len(),
            elevations: elevations.len(),
        });
    }
    Ok(azimuths
        .into_iter()
        .zip(elevations)
        .map(|(az, el)| AzEl::new(az, el))
        .collect())
}
