use nalgebra::Vector2;

use crate::azel::AzEl;
use crate::Float;

/// Round `value` to `decimals` decimal places.
pub(crate) fn round_to<F: Float>(value: F, decimals: i32) -> F {
    let scale = F::from_f64(10f64.powi(decimals)).unwrap();
    (value * scale).round() / scale
}

/// Offset of `magnitude` along `angle`, as an `(Δaz, Δel)` vector.
pub(crate) fn polar_offset<F: Float>(angle: F, magnitude: F) -> Vector2<F> {
    Vector2::new(magnitude * angle.cos(), magnitude * angle.sin())
}

/// Apply `offsets` cumulatively from `base`, rounding every produced
/// coordinate to `decimals` places.
///
/// Each position is the previous position plus the next offset; the
/// accumulator itself is kept unrounded so rounding error does not build up
/// across a long table.
pub(crate) fn cumulative_track<F: Float>(
    base: AzEl<F>,
    offsets: &[Vector2<F>],
    decimals: i32,
) -> Vec<AzEl<F>> {
    let mut current = base;
    let mut track = Vec::with_capacity(offsets.len());
    for offset in offsets {
        current = current.offset_by(*offset);
        track.push(AzEl::new(
            round_to(current.az, decimals),
            round_to(current.el, decimals),
        ));
    }
    track
}
