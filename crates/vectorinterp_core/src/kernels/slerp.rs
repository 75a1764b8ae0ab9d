//! Spherical linear interpolation of attitude quaternions.

use super::Kernel;
use crate::error::InterpolationError;
use crate::rotation::Quaternion;
use crate::value::Scalar;

/// Slerp between the two bracketing unit quaternions.
///
/// Stored quaternions are normalised on the way in; a zero quaternion is
/// rejected.
///
/// Extrapolation reuses the bracket factor, so the boundary rotation is
/// continued (over-rotated) past the endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slerp;

impl<T: Scalar> Kernel<T> for Slerp {
    type Value = Quaternion<T>;

    const NAME: &'static str = "SlerpInterpolator";

    fn prepare_value(&self, y: &Quaternion<T>) -> Result<Quaternion<T>, InterpolationError> {
        let norm_squared = y.norm_squared();
        if norm_squared == T::zero() {
            return Err(InterpolationError::invalid_argument(
                "zero quaternion does not describe a rotation",
            ));
        }
        if (norm_squared - T::one()).abs() <= T::epsilon() * T::from_f64_lossy(4.0) {
            return Ok(*y);
        }
        Ok(y.normalize())
    }

    #[inline]
    fn interpolate_pair(&self, t: T, y1: &Quaternion<T>, y2: &Quaternion<T>) -> Quaternion<T> {
        y1.slerp(y2, t)
    }
}
