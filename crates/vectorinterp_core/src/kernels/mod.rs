//! Pair-interpolation kernels.
//!
//! A kernel turns a bracket factor `t` and the two bracketing values into an
//! interpolated value. Kernels that need the whole series (the Akima spline)
//! keep a cache rebuilt by [`Kernel::rebuild`] whenever the data changes.
//!
//! ## Available Kernels
//!
//! - [`Linear`]: `t * y2 + (1 - t) * y1`
//! - [`Nearest`]: closest bracketing value, with optional tie averaging
//! - [`Akima`]: modified Akima (makima) cubic with linear boundary segments
//! - [`Slerp`]: spherical linear interpolation of unit quaternions

mod akima;
mod linear;
mod nearest;
mod slerp;

pub use akima::Akima;
pub use linear::Linear;
pub use nearest::Nearest;
pub use slerp::Slerp;

use crate::bracket::Bracket;
use crate::error::InterpolationError;
use crate::serialization::{ByteReader, ByteWriter};
use crate::value::{Scalar, SeriesValue};
use std::fmt;

/// Interpolation kernel plugged into [`crate::Interpolator`].
///
/// `evaluate` is only called with a bracket located on `xs` (at least 2
/// points) and `extrapolate` only with a boundary bracket.
pub trait Kernel<T: Scalar>: Clone + fmt::Debug + Default + Send + Sync {
    /// Element type stored in the `Y` column.
    type Value: SeriesValue<T>;

    /// Class name written in the serialisation tag.
    const NAME: &'static str;

    /// Blend two values with factor `t` (`t` may lie outside `[0, 1]`).
    fn interpolate_pair(&self, t: T, y1: &Self::Value, y2: &Self::Value) -> Self::Value;

    /// Bring an accepted `Y` value into the form the kernel stores.
    fn prepare_value(&self, y: &Self::Value) -> Result<Self::Value, InterpolationError> {
        Ok(y.clone())
    }

    /// Refresh cached state after the series changed.
    fn rebuild(&mut self, _xs: &[T], _ys: &[Self::Value]) {}

    /// Value at `x` inside the domain.
    fn evaluate(&self, _xs: &[T], ys: &[Self::Value], bracket: &Bracket<T>, x: T) -> Self::Value {
        self.interpolate_pair(
            bracket.factor(x),
            &ys[bracket.lower()],
            &ys[bracket.upper()],
        )
    }

    /// Value at `x` outside the domain, `bracket` being the boundary interval.
    fn extrapolate(&self, xs: &[T], ys: &[Self::Value], bracket: &Bracket<T>, x: T) -> Self::Value {
        self.evaluate(xs, ys, bracket, x)
    }

    /// Write kernel options (not caches) to the binary layout.
    fn encode_options(&self, _w: &mut ByteWriter) {}

    /// Read kernel options written by [`Kernel::encode_options`].
    fn decode_options(_r: &mut ByteReader<'_>) -> Result<Self, InterpolationError> {
        Ok(Self::default())
    }
}
