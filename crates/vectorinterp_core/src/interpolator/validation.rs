//! Input checks shared by construction and mutation.

use crate::error::InterpolationError;
use crate::value::{Scalar, SeriesValue};

pub(crate) fn check_sizes(nx: usize, ny: usize) -> Result<(), InterpolationError> {
    if nx != ny {
        return Err(InterpolationError::invalid_argument(format!(
            "X and Y must have the same length: got {} and {}",
            nx, ny
        )));
    }
    Ok(())
}

pub(crate) fn check_finite_x<T: Scalar>(xs: &[T]) -> Result<(), InterpolationError> {
    match xs.iter().position(|x| !x.is_finite()) {
        Some(i) => Err(InterpolationError::invalid_argument(format!(
            "X[{}] = {} is not finite",
            i, xs[i]
        ))),
        None => Ok(()),
    }
}

pub(crate) fn check_finite_y<T: Scalar, V: SeriesValue<T>>(ys: &[V]) -> Result<(), InterpolationError> {
    match ys.iter().position(|y| !y.is_finite_value()) {
        Some(i) => Err(InterpolationError::invalid_argument(format!(
            "Y[{}] = {:?} is not finite",
            i, ys[i]
        ))),
        None => Ok(()),
    }
}

/// Strictly increasing, no duplicates.
pub(crate) fn check_increasing<T: Scalar>(xs: &[T]) -> Result<(), InterpolationError> {
    for (i, pair) in xs.windows(2).enumerate() {
        if pair[1] == pair[0] {
            return Err(InterpolationError::invalid_argument(format!(
                "duplicate X value {} at index {}",
                pair[1],
                i + 1
            )));
        }
        if pair[1] < pair[0] {
            return Err(InterpolationError::invalid_argument(format!(
                "X is not sorted in ascending order at index {} ({} < {})",
                i + 1,
                pair[1],
                pair[0]
            )));
        }
    }
    Ok(())
}
