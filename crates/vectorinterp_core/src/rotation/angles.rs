use crate::value::Scalar;

use super::Quaternion;

/// Wrap `value` into `[0, period)`.
#[inline]
fn wrap<T: Scalar>(value: T, period: T) -> T {
    let r = value % period;
    let r = if r < T::zero() { r + period } else { r };
    // r + period can round up to period for tiny negative r
    if r >= period {
        T::zero()
    } else {
        r
    }
}

fn normalize_with_half_turn<T: Scalar>(ypr: [T; 3], half_turn: T) -> [T; 3] {
    let full_turn = half_turn + half_turn;
    let [yaw, pitch, roll] = ypr;
    [
        wrap(yaw, full_turn),
        pitch,
        wrap(roll + half_turn, full_turn) - half_turn,
    ]
}

/// Map yaw to `[0, 2π)` and roll to `[-π, π)`. Pitch is left unchanged.
///
/// ```
/// use vectorinterp_core::rotation::normalize_angles_rad;
/// use std::f64::consts::PI;
///
/// let [yaw, pitch, roll] = normalize_angles_rad([-PI / 2.0, 0.1, PI]);
/// assert!((yaw - 1.5 * PI).abs() < 1e-12);
/// assert_eq!(pitch, 0.1);
/// assert!((roll + PI).abs() < 1e-12);
/// ```
pub fn normalize_angles_rad<T: Scalar>(ypr: [T; 3]) -> [T; 3] {
    normalize_with_half_turn(ypr, T::from_f64_lossy(std::f64::consts::PI))
}

/// Map yaw to `[0, 360)` and roll to `[-180, 180)`. Pitch is left unchanged.
pub fn normalize_angles_degrees<T: Scalar>(ypr: [T; 3]) -> [T; 3] {
    normalize_with_half_turn(ypr, T::from_f64_lossy(180.0))
}

/// Build a unit quaternion from a yaw/pitch/roll triple.
pub fn quaternion_from_ypr<T: Scalar>(ypr: [T; 3], input_in_degrees: bool) -> Quaternion<T> {
    let [yaw, pitch, roll] = if input_in_degrees {
        ypr.map(|a| a.to_radians())
    } else {
        ypr
    };
    Quaternion::from_ypr(yaw, pitch, roll)
}

/// Convert a quaternion to a normalised yaw/pitch/roll triple.
///
/// Yaw lands in `[0, 360)`, pitch in `[-90, 90]` and roll in `[-180, 180)`
/// (or the radian equivalents).
pub fn ypr_from_quaternion<T: Scalar>(q: &Quaternion<T>, output_in_degrees: bool) -> [T; 3] {
    let (yaw, pitch, roll) = q.to_ypr();
    if output_in_degrees {
        normalize_angles_degrees([yaw, pitch, roll].map(|a| a.to_degrees()))
    } else {
        normalize_angles_rad([yaw, pitch, roll])
    }
}

/// Rotate the vector `(x, y, z)` by `q`.
#[inline]
pub fn rotate_xyz<T: Scalar>(q: &Quaternion<T>, x: T, y: T, z: T) -> [T; 3] {
    q.rotate([x, y, z])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_degrees_ranges() {
        let [yaw, pitch, roll] = normalize_angles_degrees([-90.0_f64, 12.0, 190.0]);
        assert_relative_eq!(yaw, 270.0, epsilon = 1e-12);
        assert_relative_eq!(pitch, 12.0);
        assert_relative_eq!(roll, -170.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_degrees_boundaries() {
        let [yaw, _, roll] = normalize_angles_degrees([360.0_f64, 0.0, 180.0]);
        assert_eq!(yaw, 0.0);
        assert_eq!(roll, -180.0);

        let [yaw, _, roll] = normalize_angles_degrees([720.5_f64, 0.0, -180.0]);
        assert_relative_eq!(yaw, 0.5, epsilon = 1e-9);
        assert_eq!(roll, -180.0);
    }

    #[test]
    fn test_wrap_tiny_negative_stays_in_range() {
        let r = wrap(-1e-20_f64, 360.0);
        assert!((0.0..360.0).contains(&r));
    }

    #[test]
    fn test_degrees_round_trip() {
        let q = quaternion_from_ypr([45.0_f64, 45.0, 45.0], true);
        let [yaw, pitch, roll] = ypr_from_quaternion(&q, true);
        assert_relative_eq!(yaw, 45.0, epsilon = 1e-9);
        assert_relative_eq!(pitch, 45.0, epsilon = 1e-9);
        assert_relative_eq!(roll, 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_radians_output() {
        let q = quaternion_from_ypr([300.0_f64, 10.0, -20.0], true);
        let [yaw, pitch, roll] = ypr_from_quaternion(&q, false);
        assert_relative_eq!(yaw, 300.0_f64.to_radians(), epsilon = 1e-9);
        assert_relative_eq!(pitch, 10.0_f64.to_radians(), epsilon = 1e-9);
        assert_relative_eq!(roll, (-20.0_f64).to_radians(), epsilon = 1e-9);
    }

    #[test]
    fn test_rotate_xyz_pitch() {
        let q = quaternion_from_ypr([0.0_f64, 90.0, 0.0], true);
        let [x, y, z] = rotate_xyz(&q, 1.0, 0.0, 0.0);
        assert_relative_eq!(x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(z, -1.0, epsilon = 1e-12);
    }
}
