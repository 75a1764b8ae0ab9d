use std::fmt;
use std::ops::{Mul, Neg};

use crate::error::InterpolationError;
use crate::serialization::{ByteReader, ByteWriter};
use crate::value::{approx_eq, Scalar, SeriesValue};

/// Rotation quaternion.
///
/// Scalar-first convention: `[w, x, y, z]` where `w` is the scalar part
/// and `(x, y, z)` is the vector part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion<T> {
    /// Scalar part
    pub w: T,
    /// Vector part, x component
    pub x: T,
    /// Vector part, y component
    pub y: T,
    /// Vector part, z component
    pub z: T,
}

// ========================================
// Constructors
// ========================================

impl<T: Scalar> Quaternion<T> {
    /// Create a quaternion from components.
    #[inline]
    pub fn new(w: T, x: T, y: T, z: T) -> Self {
        Self { w, x, y, z }
    }

    /// Identity quaternion (no rotation).
    #[inline]
    pub fn identity() -> Self {
        Self::new(T::one(), T::zero(), T::zero(), T::zero())
    }

    /// Create from yaw (Z), pitch (Y) and roll (X) in radians.
    ///
    /// Equivalent to `Rz(yaw) * Ry(pitch) * Rx(roll)`, normalised.
    pub fn from_ypr(yaw: T, pitch: T, roll: T) -> Self {
        let half = T::from_f64_lossy(0.5);
        let (sy, cy) = (yaw * half).sin_cos();
        let (sp, cp) = (pitch * half).sin_cos();
        let (sr, cr) = (roll * half).sin_cos();

        let qz = Self::new(cy, T::zero(), T::zero(), sy);
        let qy = Self::new(cp, T::zero(), sp, T::zero());
        let qx = Self::new(cr, sr, T::zero(), T::zero());

        (qz * qy * qx).normalize()
    }
}

// ========================================
// Core operations
// ========================================

impl<T: Scalar> Quaternion<T> {
    /// Squared norm: `w² + x² + y² + z²`.
    #[inline]
    pub fn norm_squared(&self) -> T {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Norm (magnitude).
    #[inline]
    pub fn norm(&self) -> T {
        self.norm_squared().sqrt()
    }

    /// Normalize to unit quaternion.
    #[inline]
    pub fn normalize(&self) -> Self {
        self.scale(T::one() / self.norm())
    }

    /// Conjugate: `(w, -x, -y, -z)`.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Dot product of two quaternions.
    #[inline]
    pub fn dot(&self, rhs: &Self) -> T {
        self.w * rhs.w + self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Multiply every component by `s`.
    #[inline]
    pub fn scale(&self, s: T) -> Self {
        Self::new(self.w * s, self.x * s, self.y * s, self.z * s)
    }

    /// Component-wise sum `a * self + b * other`.
    #[inline]
    fn combine(&self, a: T, other: &Self, b: T) -> Self {
        Self::new(
            self.w * a + other.w * b,
            self.x * a + other.x * b,
            self.y * a + other.y * b,
            self.z * a + other.z * b,
        )
    }
}

// ========================================
// Conversions
// ========================================

impl<T: Scalar> Quaternion<T> {
    /// Convert to `(yaw, pitch, roll)` in radians.
    ///
    /// The quaternion is normalised first. Yaw and roll are returned as
    /// computed by `atan2` (range `[-π, π]`); pitch is in `[-π/2, π/2]`.
    /// Use [`super::normalize_angles_rad`] to map them to the canonical ranges.
    pub fn to_ypr(&self) -> (T, T, T) {
        let q = self.normalize();
        let one = T::one();
        let two = one + one;
        let (w, x, y, z) = (q.w, q.x, q.y, q.z);

        let roll = (two * (w * x + y * z)).atan2(one - two * (x * x + y * y));

        // clamp against rounding past ±1 at gimbal lock
        let sinp = (two * (w * y - z * x)).max(-one).min(one);
        let pitch = sinp.asin();

        let yaw = (two * (w * z + x * y)).atan2(one - two * (y * y + z * z));

        (yaw, pitch, roll)
    }

    /// Rotate a 3-vector: `q v q⁻¹`.
    ///
    /// Uses `v' = v + 2w(u × v) + 2(u × (u × v))` with `u = (x, y, z)`.
    pub fn rotate(&self, v: [T; 3]) -> [T; 3] {
        let two = T::one() + T::one();
        let u = [self.x, self.y, self.z];
        let uv = cross(&u, &v);
        let uuv = cross(&u, &uv);
        [
            v[0] + uv[0] * (two * self.w) + uuv[0] * two,
            v[1] + uv[1] * (two * self.w) + uuv[1] * two,
            v[2] + uv[2] * (two * self.w) + uuv[2] * two,
        ]
    }
}

#[inline]
fn cross<T: Scalar>(a: &[T; 3], b: &[T; 3]) -> [T; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

// ========================================
// Interpolation
// ========================================

/// Dot products this close to ±1 fall back to linear weights.
const SLERP_PARALLEL_THRESHOLD: f64 = 1e-12;

impl<T: Scalar> Quaternion<T> {
    /// Spherical linear interpolation between `self` and `other`.
    ///
    /// `t = 0` returns `self`, `t = 1` returns `other`. Takes the short
    /// path on the 4-sphere by flipping the sign of the second weight when
    /// the dot product is negative. Values of `t` outside `[0, 1]` continue
    /// the rotation past the endpoints. The result is not renormalised.
    pub fn slerp(&self, other: &Self, t: T) -> Self {
        let one = T::one();
        let d = self.dot(other);
        let abs_d = d.abs();

        let (s0, mut s1) = if abs_d >= one - T::from_f64_lossy(SLERP_PARALLEL_THRESHOLD) {
            (one - t, t)
        } else {
            let theta = abs_d.acos();
            let sin_theta = theta.sin();
            (
                ((one - t) * theta).sin() / sin_theta,
                (t * theta).sin() / sin_theta,
            )
        };
        if d < T::zero() {
            s1 = -s1;
        }

        self.combine(s0, other, s1)
    }
}

// ========================================
// Operators
// ========================================

// Hamilton product: q1 * q2
impl<T: Scalar> Mul for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

impl<T: Scalar> Neg for Quaternion<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl<T: fmt::Display> fmt::Display for Quaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.w, self.x, self.y, self.z)
    }
}

// ========================================
// Series storage
// ========================================

impl<T: Scalar> SeriesValue<T> for Quaternion<T> {
    const WIDTH: usize = 4;

    fn is_finite_value(&self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    fn approx_eq_value(&self, other: &Self, relative: T) -> bool {
        approx_eq(self.w, other.w, relative)
            && approx_eq(self.x, other.x, relative)
            && approx_eq(self.y, other.y, relative)
            && approx_eq(self.z, other.z, relative)
    }

    fn encode(&self, w: &mut ByteWriter) {
        for c in [self.w, self.x, self.y, self.z] {
            w.write_f64(c.to_f64_lossless());
        }
    }

    fn decode(r: &mut ByteReader<'_>) -> Result<Self, InterpolationError> {
        let w = T::from_f64_lossy(r.read_f64()?);
        let x = T::from_f64_lossy(r.read_f64()?);
        let y = T::from_f64_lossy(r.read_f64()?);
        let z = T::from_f64_lossy(r.read_f64()?);
        Ok(Self::new(w, x, y, z))
    }
}
