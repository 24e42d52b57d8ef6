//! Conversions accepting axis-value lists from the common ecosystem types.

use nalgebra::DVector;
use ndarray::Array1;

use crate::Float;

/// Types accepted wherever a list of per-axis coordinate values is expected.
///
/// Implemented for `Vec<F>`, slices, `ndarray::Array1` and
/// `nalgebra::DVector`, so callers can pass whichever representation their
/// pipeline already uses.
pub trait IntoAxisValues<F: Float> {
    /// Convert into a plain vector of values.
    fn into_axis_values(self) -> Vec<F>;
}

impl<F: Float> IntoAxisValues<F> for Vec<F> {
    fn into_axis_values(self) -> Vec<F> {
        self
    }
}

impl<F: Float> IntoAxisValues<F> for &[F] {
    fn into_axis_values(self) -> Vec<F> {
        self.to_vec()
    }
}

impl<F: Float, const N: usize> IntoAxisValues<F> for [F; N] {
    fn into_axis_values(self) -> Vec<F> {
        self.to_vec()
    }
}

impl<F: Float> IntoAxisValues<F> for Array1<F> {
    fn into_axis_values(self) -> Vec<F> {
        self.to_vec()
    }
}

impl<F: Float> IntoAxisValues<F> for DVector<F> {
    fn into_axis_values(self) -> Vec<F> {
        self.iter().copied().collect()
    }
}
