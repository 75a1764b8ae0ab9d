//! Yaw/pitch/roll convenience API for the slerp interpolator.

use super::Interpolator;
use crate::error::InterpolationError;
use crate::extrapolation::ExtrapolationMode;
use crate::kernels::Slerp;
use crate::rotation::{quaternion_from_ypr, ypr_from_quaternion, Quaternion};
use crate::value::Scalar;

fn to_quaternions<T: Scalar>(ypr: &[[T; 3]], input_in_degrees: bool) -> Vec<Quaternion<T>> {
    ypr.iter()
        .map(|&angles| quaternion_from_ypr(angles, input_in_degrees))
        .collect()
}

impl<T: Scalar> Interpolator<T, Slerp> {
    /// Construct from yaw/pitch/roll triples.
    ///
    /// Angles are converted once to unit quaternions.
    ///
    /// # Example
    ///
    /// ```
    /// use vectorinterp_core::{ExtrapolationMode, SlerpInterpolator};
    ///
    /// let mut interp = SlerpInterpolator::from_ypr(
    ///     &[0.0_f64, 10.0],
    ///     &[[10.0, 0.0, 0.0], [50.0, 0.0, 0.0]],
    ///     true,
    ///     ExtrapolationMode::Extrapolate,
    /// )
    /// .unwrap();
    ///
    /// let [yaw, pitch, roll] = interp.ypr(5.0, true).unwrap();
    /// assert!((yaw - 30.0).abs() < 1e-9);
    /// assert!(pitch.abs() < 1e-9 && roll.abs() < 1e-9);
    /// ```
    pub fn from_ypr(
        xs: &[T],
        ypr: &[[T; 3]],
        input_in_degrees: bool,
        mode: ExtrapolationMode,
    ) -> Result<Self, InterpolationError> {
        Self::new(xs, &to_quaternions(ypr, input_in_degrees), mode)
    }

    /// Replace the series with yaw/pitch/roll triples.
    pub fn set_data_ypr(&mut self, xs: &[T], ypr: &[[T; 3]], input_in_degrees: bool) -> Result<(), InterpolationError> {
        self.set_data_xy(xs, &to_quaternions(ypr, input_in_degrees))
    }

    /// Append one yaw/pitch/roll sample.
    pub fn append_ypr(&mut self, x: T, ypr: [T; 3], input_in_degrees: bool) -> Result<(), InterpolationError> {
        self.append(x, quaternion_from_ypr(ypr, input_in_degrees))
    }

    /// Extend with yaw/pitch/roll samples beyond the current maximum.
    pub fn extend_ypr(&mut self, xs: &[T], ypr: &[[T; 3]], input_in_degrees: bool) -> Result<(), InterpolationError> {
        self.extend(xs, &to_quaternions(ypr, input_in_degrees))
    }

    /// Insert yaw/pitch/roll samples at arbitrary positions.
    pub fn insert_ypr(
        &mut self,
        xs: &[T],
        ypr: &[[T; 3]],
        input_in_degrees: bool,
        is_sorted: bool,
    ) -> Result<(), InterpolationError> {
        self.insert(xs, &to_quaternions(ypr, input_in_degrees), is_sorted)
    }

    /// Interpolated attitude at `x` as `[yaw, pitch, roll]`.
    ///
    /// Yaw is in `[0, 360)`, pitch in `[-90, 90]`, roll in `[-180, 180)`
    /// (or the radian equivalents).
    pub fn ypr(&mut self, x: T, output_in_degrees: bool) -> Result<[T; 3], InterpolationError> {
        let q = self.interpolate(x)?;
        Ok(ypr_from_quaternion(&q, output_in_degrees))
    }

    /// Attitudes at every point of `xs`; see [`Interpolator::interpolate_many`].
    pub fn ypr_many(&self, xs: &[T], output_in_degrees: bool, workers: usize) -> Result<Vec<[T; 3]>, InterpolationError> {
        Ok(self
            .interpolate_many(xs, workers)?
            .iter()
            .map(|q| ypr_from_quaternion(q, output_in_degrees))
            .collect())
    }

    /// Stored attitudes converted back to yaw/pitch/roll.
    pub fn data_ypr(&self, output_in_degrees: bool) -> Vec<[T; 3]> {
        self.data_y()
            .iter()
            .map(|q| ypr_from_quaternion(q, output_in_degrees))
            .collect()
    }
}
