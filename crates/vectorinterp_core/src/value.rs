//! Element types stored in an interpolation series.
//!
//! - [`Scalar`]: floating-point coordinate type (`f32`, `f64`)
//! - [`SeriesValue`]: anything that can be stored as a `Y` value (scalars, quaternions)

use crate::error::InterpolationError;
use crate::serialization::{ByteReader, ByteWriter};
use num_traits::Float;
use std::fmt;

/// Relative tolerance used when comparing two series for equality.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-4;

/// Relative float comparison with NaN == NaN and same-sign infinities equal.
///
/// # Example
///
/// ```
/// use vectorinterp_core::value::approx_eq;
///
/// assert!(approx_eq(1.0_f64, 1.00001, 1e-4));
/// assert!(!approx_eq(1.0_f64, 1.1, 1e-4));
/// assert!(approx_eq(f64::NAN, f64::NAN, 1e-4));
/// ```
pub fn approx_eq<T: Float>(a: T, b: T, relative: T) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    if a == b {
        return true;
    }
    (a - b).abs() <= relative * a.abs().max(b.abs())
}

/// A value that can live in the `Y` column of a series.
///
/// Implemented for [`Scalar`] types and for [`crate::rotation::Quaternion`].
pub trait SeriesValue<T: Float>: Clone + fmt::Debug + Send + Sync {
    /// Number of `f64` words one value occupies in the binary layout.
    const WIDTH: usize;

    /// All components are finite.
    fn is_finite_value(&self) -> bool;

    /// Component-wise relative comparison.
    fn approx_eq_value(&self, other: &Self, relative: T) -> bool;

    /// Append the value to the binary layout.
    fn encode(&self, w: &mut ByteWriter);

    /// Read one value from the binary layout.
    fn decode(r: &mut ByteReader<'_>) -> Result<Self, InterpolationError>;
}

/// Floating-point coordinate type used for `X` values, factors and scalar `Y` values.
pub trait Scalar: Float + SeriesValue<Self> + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Convert from f64 (lossy for f32).
    fn from_f64_lossy(v: f64) -> Self;

    /// Convert to f64.
    fn to_f64_lossless(self) -> f64;
}

macro_rules! impl_scalar {
    ($t:ty) => {
        impl SeriesValue<$t> for $t {
            const WIDTH: usize = 1;

            #[inline]
            fn is_finite_value(&self) -> bool {
                self.is_finite()
            }

            #[inline]
            fn approx_eq_value(&self, other: &Self, relative: $t) -> bool {
                approx_eq(*self, *other, relative)
            }

            fn encode(&self, w: &mut ByteWriter) {
                w.write_f64(*self as f64);
            }

            fn decode(r: &mut ByteReader<'_>) -> Result<Self, InterpolationError> {
                Ok(r.read_f64()? as $t)
            }
        }

        impl Scalar for $t {
            #[inline]
            fn from_f64_lossy(v: f64) -> Self {
                v as $t
            }

            #[inline]
            fn to_f64_lossless(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_scalar!(f32);
impl_scalar!(f64);

/// Compare two series element-wise with [`SeriesValue::approx_eq_value`].
pub fn approx_eq_slice<T: Scalar, V: SeriesValue<T>>(a: &[V], b: &[V], relative: T) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b.iter())
            .all(|(lhs, rhs)| lhs.approx_eq_value(rhs, relative))
}
