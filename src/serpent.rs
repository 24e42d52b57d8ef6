//! Back-and-forth traversal of an azimuth/elevation product grid.

use crate::azel::AzEl;
use crate::convert::IntoAxisValues;
use crate::error::ConfigError;
use crate::limits::Axis;
use crate::Float;

/// An infinite iterator cycling through azimuth and elevation sequences
/// forward and backwards.
///
/// For each azimuth the elevation list is traversed forward, then at the
/// turnaround the azimuth advances and the elevations are traversed
/// backward; when the azimuth list is exhausted its direction reverses too,
/// so consecutive positions always differ by one grid step.
///
/// The iterator never ends; callers bound consumption themselves, typically
/// with [`positions_by_time`](crate::positions_by_time). It is restartable
/// only by recreating it.
///
/// # Example:
/// ```
/// # use slewgrid::AzElSerpent;
/// let seq = AzElSerpent::new(vec![0.0, 180.0], vec![15.0, 45.0]).unwrap();
/// let cycle: Vec<(f64, f64)> = seq.take(5).map(|p| (p.az, p.el)).collect();
/// assert_eq!(
///     cycle,
///     [(0., 15.), (0., 45.), (180., 45.), (180., 15.), (0., 15.)]
/// );
/// ```
#[derive(Clone, Debug)]
pub struct AzElSerpent<F: Float> {
    azimuths: Vec<F>,
    elevations: Vec<F>,
    el_cutoff: Option<F>,
    az_index: usize,
    el_index: usize,
    az_forward: bool,
    el_forward: bool,
}

impl<F: Float> AzElSerpent<F> {
    /// Create a new traversal over the given sequences.
    ///
    /// The lists are independent axes of a product grid, so they need not
    /// have equal length; they must both be non-empty.
    pub fn new<A>(azimuths: A, elevations: A) -> Result<Self, ConfigError<F>>
    where
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
        Ok(Self {
            azimuths,
            elevations,
            el_cutoff: None,
            az_index: 0,
            el_index: 0,
            az_forward: true,
            el_forward: true,
        })
    }

    /// Skip positions with elevation strictly above `cutoff` while the
    /// elevation list is being traversed backward.
    ///
    /// Used to avoid revisiting zenith-adjacent points on the way back down.
    /// Forward traversal is never filtered.
    pub fn with_el_cutoff(mut self, cutoff: F) -> Self {
        self.el_cutoff = Some(cutoff);
        self
    }

    /// Step the cursor one grid position.
    fn advance(&mut self) {
        if self.el_forward {
            if self.el_index + 1 < self.elevations.len() {
                self.el_index += 1;
                return;
            }
        } else if self.el_index > 0 {
            self.el_index -= 1;
            return;
        }

        // elevation turnaround: reverse and move to the next azimuth
        self.el_forward = !self.el_forward;
        if self.az_forward {
            if self.az_index + 1 < self.azimuths.len() {
                self.az_index += 1;
                return;
            }
        } else if self.az_index > 0 {
            self.az_index -= 1;
            return;
        }

        // azimuth turnaround
        self.az_forward = !self.az_forward;
        if self.azimuths.len() > 1 {
            if self.az_forward {
                self.az_index += 1;
            } else {
                self.az_index -= 1;
            }
        }
    }
}

impl<F: Float> Iterator for AzElSerpent<F> {
    type Item = AzEl<F>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let position = AzEl::new(self.azimuths[self.az_index], self.elevations[self.el_index]);
            // cutoff only applies while descending
            let keep = self.el_forward
                || self
                    .el_cutoff
                    .is_none_or(|cutoff| position.el <= cutoff);
            self.advance();
            if keep {
                return Some(position);
            }
        }
    }
}
