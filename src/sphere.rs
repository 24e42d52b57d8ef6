//! Near-uniform sky grids for pointing-model data collection.

use itertools::Itertools;

use crate::azel::AzEl;
use crate::error::ConfigError;
use crate::limits::Axis;
use crate::sequence::{Group, Pattern};
use crate::Float;

/// A near-uniform sample of the sphere, filtered to an elevation band.
///
/// The sample points are the centers of an equal-area ring-scheme sphere
/// pixelization with `12 * nside * nside` pixels, visited in ring order from
/// the zenith cap down. Each surviving center becomes its own grid point
/// with a single target, the usual shape for pointing-model data collection
/// where one observation is taken per station.
#[derive(Clone, Debug)]
pub struct SkyGridPattern<F: Float> {
    nside: usize,
    min_el: F,
    max_el: F,
}

impl<F: Float> SkyGridPattern<F> {
    /// Create a grid with density `nside` (must be at least 1) and the
    /// default elevation band of `[0, 90]` degrees.
    pub fn new(nside: usize) -> Result<Self, ConfigError<F>> {
        if nside == 0 {
            return Err(ConfigError::InvalidDensity { nside });
        }
        Ok(Self {
            nside,
            min_el: F::from_f64(0.).unwrap(),
            max_el: F::from_f64(90.).unwrap(),
        })
    }

    /// Restrict the grid to elevations in `[min_el, max_el]` degrees.
    pub(crate) fn set_elevation_band(&mut self, min_el: F, max_el: F) -> Result<(), ConfigError<F>> {
        if min_el >= max_el {
            return Err(ConfigError::InvalidRange {
                axis: Axis::Elevation,
                min: min_el,
                max: max_el,
            });
        }
        self.min_el = min_el;
        self.max_el = max_el;
        Ok(())
    }
}

impl<F: Float> Pattern<F> for SkyGridPattern<F> {
    fn expand(&self) -> Result<Vec<Group<F>>, ConfigError<F>> {
        let npix = 12 * self.nside * self.nside;
        let centers = (0..npix)
            .map(|pix| {
                let (z, phi) = ring_center(self.nside, pix);
                let el = 90. - z.acos().to_degrees();
                AzEl::new(
                    F::from_f64(phi.to_degrees()).unwrap(),
                    F::from_f64(el).unwrap(),
                )
            })
            .filter(|center| center.el >= self.min_el && center.el <= self.max_el)
            .collect_vec();
        Ok(centers
            .into_iter()
            .map(|center| Group::new(center, vec![center]))
            .collect())
    }
}

/// Center of ring-scheme pixel `pix`, as `(z, phi)` with `z = cos(colatitude)`
/// and `phi` the azimuthal angle in `[0, 2π)`.
///
/// Ring numbering runs from the north polar cap (`pix = 0`) through the
/// equatorial belt to the south cap.
pub(crate) fn ring_center(nside: usize, pix: usize) -> (f64, f64) {
    let n = nside as f64;
    let npix = 12 * nside * nside;
    let ncap = 2 * nside * (nside - 1);

    if pix < ncap {
        // north polar cap
        let ph = (pix as f64 + 1.) / 2.;
        let ring = (ph - ph.floor().sqrt()).sqrt().floor() as usize + 1;
        let index = pix + 1 - 2 * ring * (ring - 1);
        let z = 1. - (ring * ring) as f64 / (3. * n * n);
        let phi = (index as f64 - 0.5) * std::f64::consts::FRAC_PI_2 / ring as f64;
        (z, phi)
    } else if pix < npix - ncap {
        // equatorial belt
        let offset = pix - ncap;
        let ring = offset / (4 * nside) + nside;
        let index = offset % (4 * nside) + 1;
        // odd rings are staggered by half a pixel width
        let stagger = if (ring + nside) % 2 == 1 { 1. } else { 0.5 };
        let z = 4. / 3. - 2. * ring as f64 / (3. * n);
        let phi = (index as f64 - stagger) * std::f64::consts::FRAC_PI_2 / n;
        (z, phi)
    } else {
        // south polar cap, mirror of the north
        let from_south = npix - pix;
        let ph = from_south as f64 / 2.;
        let ring = (ph - ph.floor().sqrt()).sqrt().floor() as usize + 1;
        let index = 4 * ring + 1 - (from_south - 2 * ring * (ring - 1));
        let z = -1. + (ring * ring) as f64 / (3. * n * n);
        let phi = (index as f64 - 0.5) * std::f64::consts::FRAC_PI_2 / ring as f64;
        (z, phi)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    use super::*;

    #[test]
    fn nside_one_ring_centers() {
        // Three rings of four pixels at z = 2/3, 0, -2/3.
        let expected_z = [2. / 3., 0., -2. / 3.];
        for pix in 0..12 {
            let (z, phi) = ring_center(1, pix);
            assert_abs_diff_eq!(z, expected_z[pix / 4], epsilon = 1e-12);
            let expected_phi = if pix / 4 == 1 {
                // equator ring starts at phi = 0
                (pix % 4) as f64 * PI / 2.
            } else {
                PI / 4. + (pix % 4) as f64 * PI / 2.
            };
            assert_abs_diff_eq!(phi, expected_phi, epsilon = 1e-12);
        }
    }

    #[test]
    fn nside_two_cap_and_belt_centers() {
        // First cap pixel.
        let (z, phi) = ring_center(2, 0);
        assert_abs_diff_eq!(z, 1. - 1. / 12., epsilon = 1e-12);
        assert_abs_diff_eq!(phi, PI / 4., epsilon = 1e-12);

        // First belt pixel, ring 2 of 8 staggered pixels.
        let (z, phi) = ring_center(2, 4);
        assert_abs_diff_eq!(z, 2. / 3., epsilon = 1e-12);
        assert_abs_diff_eq!(phi, PI / 8., epsilon = 1e-12);

        // Equator ring starts unstaggered.
        let (z, phi) = ring_center(2, 12);
        assert_abs_diff_eq!(z, 1. / 3., epsilon = 1e-12);
        assert_abs_diff_eq!(phi, 0., epsilon = 1e-12);

        // Last pixel mirrors the first.
        let (z, phi) = ring_center(2, 47);
        assert_abs_diff_eq!(z, -(1. - 1. / 12.), epsilon = 1e-12);
        assert_abs_diff_eq!(phi, 7. * PI / 4., epsilon = 1e-12);
    }

    #[test]
    fn default_band_keeps_the_visible_hemisphere() {
        let groups = SkyGridPattern::<f64>::new(1).unwrap().expand().unwrap();
        // Rings at el ~41.8 and el 0 survive; the southern ring does not.
        assert_eq!(groups.len(), 8);
        for group in &groups {
            assert!(group.base().el >= 0.);
        }
        assert_abs_diff_eq!(groups[0].base().az, 45., epsilon = 1e-9);
        assert_abs_diff_eq!(groups[0].base().el, 41.8103148957691, epsilon = 1e-9);
    }

    #[test]
    fn elevation_band_filters_rings() {
        let mut pattern = SkyGridPattern::<f64>::new(1).unwrap();
        pattern.set_elevation_band(30., 60.).unwrap();
        let groups = pattern.expand().unwrap();
        // Only the upper ring falls inside the band.
        assert_eq!(groups.len(), 4);
    }

    #[test]
    fn pixel_count_scales_with_density() {
        let groups = SkyGridPattern::<f64>::new(4).unwrap().expand().unwrap();
        // Half of 192 pixels sit above the horizon; the equatorial ring at
        // z = 0 survives the inclusive band edge.
        assert_eq!(groups.len(), 96 + 8);
    }

    #[test]
    fn zero_density_is_rejected() {
        let err = SkyGridPattern::<f64>::new(0).unwrap_err();
        assert_eq!(err, ConfigError::InvalidDensity { nside: 0 });
    }

    #[test]
    fn inverted_band_is_rejected() {
        let mut pattern = SkyGridPattern::<f64>::new(1).unwrap();
        assert_eq!(
            pattern.set_elevation_band(60., 30.),
            Err(ConfigError::InvalidRange {
                axis: Axis::Elevation,
                min: 60.,
                max: 30.,
            })
        );
    }
}
