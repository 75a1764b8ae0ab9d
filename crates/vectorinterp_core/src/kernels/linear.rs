//! Linear interpolation kernel.

use super::Kernel;
use crate::value::Scalar;

/// Piecewise linear kernel: `t * y2 + (1 - t) * y1`.
///
/// Extrapolation continues the boundary segment's line.
///
/// # Example
///
/// ```
/// use vectorinterp_core::kernels::{Kernel, Linear};
///
/// let y = Linear.interpolate_pair(0.25_f64, &0.0, &4.0);
/// assert!((y - 1.0).abs() < 1e-12);
///
/// // extrapolation past the second value
/// let y = Linear.interpolate_pair(1.5_f64, &0.0, &4.0);
/// assert!((y - 6.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Linear;

impl<T: Scalar> Kernel<T> for Linear {
    type Value = T;

    const NAME: &'static str = "LinearInterpolator";

    #[inline]
    fn interpolate_pair(&self, t: T, y1: &T, y2: &T) -> T {
        t * *y2 + (T::one() - t) * *y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_endpoints() {
        assert_eq!(Linear.interpolate_pair(0.0_f64, &3.0, &7.0), 3.0);
        assert_eq!(Linear.interpolate_pair(1.0_f64, &3.0, &7.0), 7.0);
    }

    #[test]
    fn test_midpoint() {
        assert_relative_eq!(Linear.interpolate_pair(0.5_f64, &-1.0, &1.0), 0.0);
    }

    #[test]
    fn test_negative_factor_extrapolates() {
        assert_relative_eq!(Linear.interpolate_pair(-0.2_f64, &1.0, &0.0), 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_function() {
        for t in [-3.0_f64, 0.0, 0.4, 1.0, 7.0] {
            assert_relative_eq!(Linear.interpolate_pair(t, &2.5, &2.5), 2.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_with_f32() {
        let y: f32 = Linear.interpolate_pair(0.5_f32, &1.0, &2.0);
        assert!((y - 1.5).abs() < 1e-6);
    }
}
