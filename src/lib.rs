#![warn(missing_docs)]

//! Deterministic azimuth/elevation grid and offset sequence generation for
//! telescope slew characterization and pointing-model data collection. \
//! No movement commands are issued here: the crate only produces ordered
//! target sequences, checks every position against hard operational limits
//! before a caller can consume any of them, and provides the lazy infinite
//! producers (serpent traversal, random walk) and the wall-clock-bounded
//! driver the surrounding orchestration composes them with.
//!
//! ## Interface
//! The central struct of this library is [`SlewGrid`]. It is used to choose
//! the grid construction scheme, specify the base points and limits, and
//! produce the validated [`PositionSequence`]. \
//! In most cases, it should be created with [`SlewGrid::diamond()`] or
//! [`SlewGrid::sky_grid()`], but for generic contexts, any [`Pattern`] can
//! be supplied to [`SlewGrid::new()`].
//! In any case, additional parameters are set via `SlewGrid::with_*()`
//! functions.
//!
//! Example:
//! ```rust
//! use slewgrid::{Limits, SlewGrid};
//!
//! # fn main() -> Result<(), slewgrid::GridError<f64>> {
//! let limits = Limits::new(0.0, 360.0, 15.0, 86.5)?;
//! let sequence = SlewGrid::diamond(vec![30.0, 210.0], vec![60.0, 45.0], 24.0, 3.5)?
//!     .with_limits(limits)
//!     .generate()?;
//!
//! assert_eq!(sequence.groups().len(), 2);
//! for group in sequence.groups() {
//!     for target in group.targets() {
//!         // hand each target to the slew layer
//!         assert!(limits.contains(*target));
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The infinite producers are plain iterators and pair with
//! [`positions_by_time`] when consumption is bounded by a wall-clock budget
//! rather than a point count:
//! ```rust
//! use std::time::Duration;
//! use slewgrid::{positions_by_time, AzEl, Limits, RandomWalk};
//!
//! let limits = Limits::new(0.0, 360.0, 20.0, 80.0).unwrap();
//! let walk = RandomWalk::new(3.5, 30.0, 0.1, limits).unwrap();
//! let wander = walk.walk_from(rand::rng(), AzEl::new(180.0, 50.0));
//!
//! for (step, target) in positions_by_time(wander, Duration::from_millis(1)) {
//!     assert!(limits.contains(target));
//!     if step > 100 {
//!         break;
//!     }
//! }
//! ```
//!
//! ## Parameters
//! - `limits`: Hard min/max bounds on azimuth and elevation. Every generated
//!     position must satisfy them; a violation is raised before any position
//!     reaches a caller, identifying the axis, value and base grid point.
//! - `long_slew`/`short_slew`: Magnitudes of the canonical diamond offset
//!     table, exercising long and short movements and their 45° diagonals.
//! - `nside`: Density of the near-uniform sky grid; the sphere is sampled
//!     with `12 * nside * nside` equal-area pixels.
//! - `el_cutoff`: While a serpent traversal descends in elevation, positions
//!     strictly above the cutoff are skipped so zenith-adjacent points are
//!     not revisited.
//! - `big_prob`/`big_radius`: Probability and magnitude of the occasional
//!     large random-walk excursion.

pub(crate) mod azel;
pub(crate) mod convert;
pub(crate) mod diamond;
pub(crate) mod error;
pub(crate) mod geometry;
pub(crate) mod sequence;
pub(crate) mod serpent;
pub(crate) mod sphere;
pub(crate) mod walk;
pub mod limits;

pub use azel::AzEl;
pub use convert::IntoAxisValues;
pub use diamond::{diamond_offsets, DiamondPattern};
pub use error::{BoundsError, ConfigError, GridError};
pub use limits::{Axis, Limits};
pub use sequence::{Group, Pattern, PositionSequence, SlewGrid};
pub use serpent::AzElSerpent;
pub use sphere::SkyGridPattern;
pub use walk::{positions_by_time, RandomWalk, TimedPositions, Wander};

/// A generic float trait such that sequence generation works over both
/// `f32` and `f64`.
///
/// Blanket-implemented for every type satisfying the supertraits, which in
/// particular covers `f32` and `f64`. [`num_traits::Float`] is deliberately
/// not among them: its duplicate definitions of the basic math functions
/// would force disambiguation all over the coordinate arithmetic.
pub trait Float: Copy + Default + nalgebra::RealField + num_traits::FromPrimitive {}

impl<F> Float for F where F: Copy + Default + nalgebra::RealField + num_traits::FromPrimitive {}
