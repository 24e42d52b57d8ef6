//! Random-walk offset generation and wall-clock-bounded consumption.

use std::time::{Duration, Instant};

use log::debug;
use nalgebra::Vector2;
use rand::Rng;

use crate::azel::AzEl;
use crate::error::ConfigError;
use crate::geometry::polar_offset;
use crate::limits::Limits;
use crate::Float;

/// Parameters of a bounded random walk across the sky.
///
/// Each step draws a uniform direction and one of two magnitudes: the
/// occasional `big_radius` excursion (with probability `big_prob`) on top of
/// the regular `radius`. The walk itself is stateless; the caller threads
/// the current position through [`step`](RandomWalk::step), or wraps it in a
/// [`Wander`] cursor via [`walk_from`](RandomWalk::walk_from).
#[derive(Clone, Copy, Debug)]
pub struct RandomWalk<F: Float> {
    radius: F,
    big_radius: F,
    big_prob: F,
    limits: Limits<F>,
}

impl<F: Float> RandomWalk<F> {
    /// Create a new walk.
    ///
    /// # Arguments
    /// - `radius`: regular offset magnitude, in degrees. Strictly positive.
    /// - `big_radius`: excursion magnitude, in degrees. Strictly positive.
    /// - `big_prob`: probability in `[0, 1]` of drawing an excursion.
    /// - `limits`: operational envelope the walk reflects off.
    pub fn new(
        radius: F,
        big_radius: F,
        big_prob: F,
        limits: Limits<F>,
    ) -> Result<Self, ConfigError<F>> {
        let zero = F::from_f64(0.).unwrap();
        let one = F::from_f64(1.).unwrap();
        for magnitude in [radius, big_radius] {
            if magnitude <= zero {
                return Err(ConfigError::InvalidMagnitude { value: magnitude });
            }
        }
        if big_prob < zero || big_prob > one {
            return Err(ConfigError::InvalidProbability { value: big_prob });
        }
        Ok(Self {
            radius,
            big_radius,
            big_prob,
            limits,
        })
    }

    /// Draw one step from `current`.
    ///
    /// The candidate position is `current` plus a polar offset with uniform
    /// angle in `[0, 2π)`. If the candidate violates a limit on an axis,
    /// that axis's offset sign is flipped once; the reflected position is
    /// returned without re-validation or resampling.
    pub fn step<R: Rng + ?Sized>(&self, rng: &mut R, current: AzEl<F>) -> AzEl<F> {
        let angle = F::from_f64(rng.random_range(0.0..std::f64::consts::TAU)).unwrap();
        let magnitude = if F::from_f64(rng.random::<f64>()).unwrap() < self.big_prob {
            self.big_radius
        } else {
            self.radius
        };
        self.displace(current, polar_offset(angle, magnitude))
    }

    /// Apply `offset` to `current`, reflecting each out-of-range axis once.
    fn displace(&self, current: AzEl<F>, offset: Vector2<F>) -> AzEl<F> {
        let mut offset = offset;
        if !self.limits.az_in_range(current.az + offset.x) {
            debug!(
                "Azimuth {:.2?} out of range, reflecting offset.",
                current.az + offset.x
            );
            offset.x = -offset.x;
        }
        if !self.limits.el_in_range(current.el + offset.y) {
            debug!(
                "Elevation {:.2?} out of range, reflecting offset.",
                current.el + offset.y
            );
            offset.y = -offset.y;
        }
        current.offset_by(offset)
    }

    /// Wrap the walk into an infinite [`Wander`] cursor starting at `start`.
    pub fn walk_from<R: Rng>(self, rng: R, start: AzEl<F>) -> Wander<F, R> {
        Wander {
            walk: self,
            rng,
            current: start,
            steps: 0,
        }
    }
}

/// The mutable cursor of a random walk: current position, step counter and
/// owned RNG.
///
/// An infinite iterator; bound consumption with [`positions_by_time`].
#[derive(Clone, Debug)]
pub struct Wander<F: Float, R: Rng> {
    walk: RandomWalk<F>,
    rng: R,
    current: AzEl<F>,
    steps: usize,
}

impl<F: Float, R: Rng> Wander<F, R> {
    /// Number of steps drawn so far.
    pub fn steps(&self) -> usize {
        self.steps
    }
}

impl<F: Float, R: Rng> Iterator for Wander<F, R> {
    type Item = AzEl<F>;

    fn next(&mut self) -> Option<Self::Item> {
        self.current = self.walk.step(&mut self.rng, self.current);
        self.steps += 1;
        Some(self.current)
    }
}

/// Bound an infinite (or long) position producer by wall-clock time.
///
/// The countdown of `total_time` starts immediately. Positions are pulled
/// one at a time and paired with a 0-based step index; production stops once
/// the countdown expires, regardless of whether the underlying producer is
/// exhausted. A position numerically identical to the immediately preceding
/// one is skipped, guarding against degenerate zero-offset steps.
///
/// The returned sequence is finite and lazy, and as restartable as the
/// underlying producer (an [`AzElSerpent`](crate::AzElSerpent) or
/// [`Wander`] must be recreated).
///
/// # Example:
/// ```
/// # use std::time::Duration;
/// # use slewgrid::{positions_by_time, AzElSerpent};
/// let serpent = AzElSerpent::new(vec![0.0, 180.0], vec![15.0, 45.0]).unwrap();
/// for (step, position) in positions_by_time(serpent, Duration::from_millis(1)) {
///     assert!(position.el >= 15.0);
///     if step > 10 {
///         break;
///     }
/// }
/// ```
pub fn positions_by_time<F, I>(positions: I, total_time: Duration) -> TimedPositions<F, I::IntoIter>
where
    F: Float,
    I: IntoIterator<Item = AzEl<F>>,
{
    TimedPositions {
        inner: positions.into_iter(),
        deadline: Instant::now() + total_time,
        previous: None,
        step: 0,
    }
}

/// Iterator returned by [`positions_by_time`].
#[derive(Debug)]
pub struct TimedPositions<F: Float, I: Iterator<Item = AzEl<F>>> {
    inner: I,
    deadline: Instant,
    previous: Option<AzEl<F>>,
    step: usize,
}

impl<F: Float, I: Iterator<Item = AzEl<F>>> Iterator for TimedPositions<F, I> {
    type Item = (usize, AzEl<F>);

    fn next(&mut self) -> Option<Self::Item> {
        while Instant::now() < self.deadline {
            let position = self.inner.next()?;
            if self.previous == Some(position) {
                continue;
            }
            match self.previous {
                Some(previous) => debug!("Step {}: slewing {previous} -> {position}.", self.step),
                None => debug!("Step {}: starting at {position}.", self.step),
            }
            self.previous = Some(position);
            let step = self.step;
            self.step += 1;
            return Some((step, position));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use nalgebra::Vector2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn walk(limits: Limits<f64>) -> RandomWalk<f64> {
        RandomWalk::new(3.5, 30.0, 0.1, limits).unwrap()
    }

    #[test]
    fn displace_applies_offset_inside_the_envelope() {
        let walk = walk(Limits::new(0.0, 360.0, 20.0, 80.0).unwrap());
        let next = walk.displace(AzEl::new(180.0, 50.0), Vector2::new(2.0, -3.0));
        assert_eq!(next, AzEl::new(182.0, 47.0));
    }

    #[test]
    fn displace_reflects_azimuth_on_first_violation() {
        let walk = walk(Limits::new(0.0, 90.0, 20.0, 80.0).unwrap());
        // 89 + 5 crosses max_az; the offset flips sign, no resampling.
        let next = walk.displace(AzEl::new(89.0, 50.0), Vector2::new(5.0, 1.0));
        assert_eq!(next, AzEl::new(84.0, 51.0));
    }

    #[test]
    fn displace_reflects_each_axis_independently() {
        let walk = walk(Limits::new(0.0, 90.0, 20.0, 80.0).unwrap());
        let next = walk.displace(AzEl::new(1.0, 79.5), Vector2::new(-5.0, 2.0));
        assert_eq!(next, AzEl::new(6.0, 77.5));
    }

    #[test]
    fn displace_does_not_revalidate_after_reflecting() {
        // Reflection can under-correct near a corner; the reflected position
        // is returned as-is.
        let walk = walk(Limits::new(40.0, 50.0, 20.0, 80.0).unwrap());
        let next = walk.displace(AzEl::new(41.0, 50.0), Vector2::new(-15.0, 0.0));
        assert_eq!(next, AzEl::new(56.0, 50.0));
        assert!(!walk.limits.contains(next));
    }

    #[test]
    fn steps_stay_inside_an_interior_envelope() {
        let limits = Limits::new(0.0, 360.0, 20.0, 80.0).unwrap();
        let walk = RandomWalk::new(3.5, 12.0, 0.2, limits).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut current = AzEl::new(180.0, 50.0);
        for _ in 0..500 {
            current = walk.step(&mut rng, current);
            assert!(limits.contains(current));
        }
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let limits = Limits::new(0.0, 360.0, 20.0, 80.0).unwrap();
        assert_eq!(
            RandomWalk::new(0.0, 30.0, 0.1, limits).unwrap_err(),
            ConfigError::InvalidMagnitude { value: 0.0 }
        );
        assert_eq!(
            RandomWalk::new(3.5, 30.0, 1.5, limits).unwrap_err(),
            ConfigError::InvalidProbability { value: 1.5 }
        );
    }

    #[test]
    fn wander_counts_steps() {
        let limits = Limits::new(0.0, 360.0, 20.0, 80.0).unwrap();
        let mut wander = walk(limits).walk_from(StdRng::seed_from_u64(3), AzEl::new(180.0, 50.0));
        wander.by_ref().take(5).for_each(drop);
        assert_eq!(wander.steps(), 5);
    }

    #[test]
    fn timed_consumption_is_bounded_by_the_clock_not_the_producer() {
        // An infinite producer that yields one position every 20 ms.
        let mut el = 19.0;
        let slow = std::iter::repeat_with(move || {
            thread::sleep(Duration::from_millis(20));
            el += 1.0;
            AzEl::new(100.0, el)
        });

        let steps: Vec<_> = positions_by_time(slow, Duration::from_millis(200)).collect();
        assert!(!steps.is_empty());
        assert!(steps.len() <= 30, "got {} positions", steps.len());
        // 0-based contiguous step indices.
        for (expected, (step, _)) in steps.iter().enumerate() {
            assert_eq!(expected, *step);
        }
    }

    #[test]
    fn zero_budget_yields_nothing() {
        let serpent =
            crate::AzElSerpent::new(vec![0.0, 180.0], vec![15.0, 45.0]).unwrap();
        let mut timed = positions_by_time(serpent, Duration::ZERO);
        assert_eq!(timed.next(), None);
    }

    #[test]
    fn consecutive_duplicates_are_skipped() {
        let positions = vec![
            AzEl::new(0.0, 15.0),
            AzEl::new(0.0, 15.0),
            AzEl::new(0.0, 45.0),
            AzEl::new(0.0, 45.0),
            AzEl::new(0.0, 15.0),
        ];
        let collected: Vec<_> = positions_by_time(positions, Duration::from_secs(5))
            .map(|(_, position)| position)
            .collect();
        assert_eq!(
            collected,
            vec![
                AzEl::new(0.0, 15.0),
                AzEl::new(0.0, 45.0),
                AzEl::new(0.0, 15.0),
            ]
        );
    }
}
