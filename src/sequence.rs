//! Sequence assembly and validation, and the main interface.

use log::{debug, info};
use ndarray::Array2;

use crate::azel::AzEl;
use crate::convert::IntoAxisValues;
use crate::diamond::DiamondPattern;
use crate::error::{ConfigError, GridError};
use crate::limits::Limits;
use crate::sphere::SkyGridPattern;
use crate::Float;

/// Generalizes over grid construction schemes.
pub trait Pattern<F: Float>: Clone {
    /// Expand the pattern into per-grid-point target groups.
    ///
    /// Expansion is pure: no randomness, no limit checking. Limits are
    /// applied afterwards by [`SlewGrid::generate`].
    fn expand(&self) -> Result<Vec<Group<F>>, ConfigError<F>>;
}

/// The ordered targets produced around one base grid point.
#[derive(Clone, Debug, PartialEq)]
pub struct Group<F: Float> {
    base: AzEl<F>,
    targets: Vec<AzEl<F>>,
}

impl<F: Float> Group<F> {
    /// Create a group from its base point and targets.
    pub fn new(base: AzEl<F>, targets: Vec<AzEl<F>>) -> Self {
        Self { base, targets }
    }

    /// The base grid point this group was expanded from.
    pub fn base(&self) -> AzEl<F> {
        self.base
    }

    /// The targets, in traversal order.
    pub fn targets(&self) -> &[AzEl<F>] {
        &self.targets
    }

    /// A short name for progress reporting, derived from the base point.
    pub fn label(&self) -> String {
        format!("az{:.2?}_el{:.2?}", self.base.az, self.base.el)
    }
}

/// An ordered, immutable, finite sequence of validated positions, grouped by
/// base grid point.
///
/// Produced once by [`SlewGrid::generate`]; every position has already been
/// checked against the operational limits.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionSequence<F: Float> {
    groups: Vec<Group<F>>,
}

impl<F: Float> PositionSequence<F> {
    /// The per-grid-point groups, in traversal order.
    pub fn groups(&self) -> &[Group<F>] {
        &self.groups
    }

    /// Total number of positions across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.targets.len()).sum()
    }

    /// Whether the sequence holds no positions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all positions in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &AzEl<F>> + '_ {
        self.groups.iter().flat_map(|group| group.targets.iter())
    }

    /// The positions as an `(n, 2)` array of az/el rows, for downstream
    /// analysis.
    pub fn to_array(&self) -> Array2<F> {
        let flat: Vec<F> = self
            .iter()
            .flat_map(|position| [position.az, position.el])
            .collect();
        Array2::from_shape_vec((self.len(), 2), flat).unwrap()
    }
}

impl<F: Float> IntoIterator for PositionSequence<F> {
    type Item = AzEl<F>;
    type IntoIter = std::vec::IntoIter<AzEl<F>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups
            .into_iter()
            .flat_map(|group| group.targets)
            .collect::<Vec<_>>()
            .into_iter()
    }
}

/// The central struct of this library.
///
/// Use the variant constructors ([`diamond`](SlewGrid::diamond),
/// [`sky_grid`](SlewGrid::sky_grid)) to choose a grid construction scheme,
/// `with_*` functions to set options, and [`generate`](SlewGrid::generate)
/// to obtain the validated sequence. For more details, check the
/// module-level documentation.
#[derive(Clone, Debug)]
pub struct SlewGrid<F: Float, P: Pattern<F>> {
    /// Grid construction scheme.
    pattern: P,
    /// Operational limits every position must satisfy.
    limits: Limits<F>,
}

impl<F: Float> SlewGrid<F, DiamondPattern<F>> {
    /// Use a diamond slew pattern around the given base points.
    /// Use `with_` functions to set parameters.
    ///
    /// # Arguments
    /// - `azimuths`, `elevations`: parallel lists of base grid points, in
    ///   degrees.
    /// - `long_slew`, `short_slew`: magnitudes of the canonical offset
    ///   table, in degrees.
    pub fn diamond<A>(
        azimuths: A,
        elevations: A,
        long_slew: F,
        short_slew: F,
    ) -> Result<Self, ConfigError<F>>
    where
        A: IntoAxisValues<F>,
    {
        Ok(Self::new(DiamondPattern::new(
            azimuths, elevations, long_slew, short_slew,
        )?))
    }

    /// Replace the canonical offset table with a custom list of
    /// `(Δaz, Δel)` pairs, applied cumulatively.
    pub fn with_offsets(mut self, offsets: &[(F, F)]) -> Result<Self, ConfigError<F>> {
        self.pattern.set_offsets(offsets)?;
        Ok(self)
    }

    /// Flip the sign of every offset, producing the mirror-image traversal
    /// used for movement-symmetry checks.
    pub fn reversed(mut self) -> Self {
        self.pattern.reverse();
        self
    }
}

impl<F: Float> SlewGrid<F, SkyGridPattern<F>> {
    /// Use a near-uniform sky grid of density `nside`.
    /// Use `with_` functions to set parameters.
    pub fn sky_grid(nside: usize) -> Result<Self, ConfigError<F>> {
        Ok(Self::new(SkyGridPattern::new(nside)?))
    }

    /// Keep only grid points with elevation in `[min_el, max_el]` degrees.
    pub fn with_elevation_band(mut self, min_el: F, max_el: F) -> Result<Self, ConfigError<F>> {
        self.pattern.set_elevation_band(min_el, max_el)?;
        Ok(self)
    }
}

impl<F: Float, P: Pattern<F>> SlewGrid<F, P> {
    /// Create a new instance from any [`Pattern`], with the permissive
    /// [`Limits::full_range`] envelope.
    pub fn new(pattern: P) -> Self {
        Self {
            pattern,
            limits: Limits::full_range(),
        }
    }

    /// Set the operational limits.
    pub fn with_limits(mut self, limits: Limits<F>) -> Self {
        self.limits = limits;
        self
    }

    /// Expand the pattern and validate every position against the limits.
    ///
    /// The whole sequence is validated before it is returned, so a
    /// late-sequence violation never hands a partially valid grid to a
    /// command-issuing caller. The reported violation is the earliest in
    /// traversal order.
    pub fn generate(self) -> Result<PositionSequence<F>, GridError<F>> {
        let groups = self.pattern.expand()?;
        debug!("Expanded {} grid points.", groups.len());

        for group in &groups {
            for &target in group.targets() {
                self.limits.check(target, group.base())?;
            }
            debug!(
                "Grid point {} valid with {} targets.",
                group.label(),
                group.targets().len()
            );
        }

        let total: usize = groups.iter().map(|group| group.targets().len()).sum();
        info!(
            "Validated {} positions across {} grid points.",
            total,
            groups.len()
        );
        Ok(PositionSequence { groups })
    }
}

#[cfg(feature = "parallel")]
mod parallel {
    use rayon::prelude::*;

    use super::*;

    impl<F, P> SlewGrid<F, P>
    where
        F: Float + Send + Sync,
        P: Pattern<F>,
    {
        /// Expand the pattern and validate every position in parallel.
        ///
        /// Also see [`generate`](SlewGrid::generate) for more details.
        ///
        /// **Warning: when several positions violate the limits, the
        /// reported violation is not guaranteed to be the earliest in
        /// traversal order.**
        pub fn generate_par(self) -> Result<PositionSequence<F>, GridError<F>> {
            let groups = self.pattern.expand()?;
            debug!("Expanded {} grid points.", groups.len());

            groups.par_iter().try_for_each(|group| {
                group
                    .targets()
                    .iter()
                    .try_for_each(|&target| self.limits.check(target, group.base()))
            })?;

            let total: usize = groups.iter().map(|group| group.targets().len()).sum();
            info!(
                "Validated {} positions across {} grid points.",
                total,
                groups.len()
            );
            Ok(PositionSequence { groups })
        }
    }
}
