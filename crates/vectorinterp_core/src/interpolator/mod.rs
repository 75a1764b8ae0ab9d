//! Sorted-series interpolator with a cached bracket and an extrapolation policy.
//!
//! [`Interpolator`] owns the `(X, Y)` series, the [`Bracket`] cache, the
//! [`ExtrapolationMode`] and one [`Kernel`]. All mutations validate their
//! input before touching the series, so a failed call leaves the instance
//! unchanged.

pub(crate) mod validation;
mod ypr;

use crate::bracket::{Bracket, Location};
use crate::error::InterpolationError;
use crate::extrapolation::ExtrapolationMode;
use crate::kernels::{Akima, Kernel, Linear, Nearest, Slerp};
use crate::parallel;
use crate::sampling;
use crate::serialization::{version_tag, ByteReader, ByteWriter};
use crate::value::{approx_eq_slice, Scalar, SeriesValue, DEFAULT_RELATIVE_TOLERANCE};
use std::fmt;
use tracing::{debug, trace, warn};

use validation::{check_finite_x, check_finite_y, check_increasing, check_sizes};

/// Piecewise linear interpolator.
pub type LinearInterpolator<T = f64> = Interpolator<T, Linear>;
/// Nearest-neighbour interpolator.
pub type NearestInterpolator<T = f64> = Interpolator<T, Nearest>;
/// Modified Akima spline interpolator.
pub type AkimaInterpolator<T = f64> = Interpolator<T, Akima<T>>;
/// Quaternion slerp interpolator (yaw/pitch/roll in and out).
pub type SlerpInterpolator<T = f64> = Interpolator<T, Slerp>;

/// 1-D interpolator over a strictly increasing series.
///
/// # Type Parameters
///
/// * `T` - Coordinate type (`f32` or `f64`)
/// * `K` - Kernel combining the two bracketing values
///
/// # Example
///
/// ```
/// use vectorinterp_core::{ExtrapolationMode, LinearInterpolator};
///
/// let mut interp = LinearInterpolator::new(
///     &[-10.0_f64, -5.0, 0.0, 6.0, 12.0],
///     &[1.0, 0.0, 1.0, 0.0, -1.0],
///     ExtrapolationMode::Extrapolate,
/// )
/// .unwrap();
///
/// assert!((interp.interpolate(-7.5).unwrap() - 0.5).abs() < 1e-12);
/// assert!((interp.interpolate(3.0).unwrap() - 0.5).abs() < 1e-12);
///
/// interp.set_extrapolation_mode(ExtrapolationMode::Fail);
/// assert!(interp.interpolate(13.0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Interpolator<T: Scalar, K: Kernel<T>> {
    /// Strictly increasing coordinates
    xs: Vec<T>,
    /// Values, same length as `xs`
    ys: Vec<K::Value>,
    mode: ExtrapolationMode,
    /// Last bracket used by [`Interpolator::interpolate`]
    bracket: Bracket<T>,
    kernel: K,
}

// ========================================
// Construction
// ========================================

impl<T: Scalar, K: Kernel<T>> Interpolator<T, K> {
    /// Construct from `xs`/`ys` with the kernel's default options.
    ///
    /// # Arguments
    ///
    /// * `xs` - Strictly increasing, finite coordinates (at least 2)
    /// * `ys` - Values, one per coordinate
    /// * `mode` - Behaviour outside `[xs[0], xs[n-1]]`
    ///
    /// # Returns
    ///
    /// * `Ok(Interpolator)` - Successfully constructed interpolator
    /// * `Err(InterpolationError::InvalidArgument)` - Size mismatch, fewer than 2
    ///   points, unsorted/duplicate/non-finite `xs` or non-finite `ys`
    pub fn new(xs: &[T], ys: &[K::Value], mode: ExtrapolationMode) -> Result<Self, InterpolationError> {
        Self::with_kernel(xs, ys, mode, K::default())
    }

    /// Construct with an explicitly configured kernel.
    ///
    /// ```
    /// use vectorinterp_core::kernels::Nearest;
    /// use vectorinterp_core::{ExtrapolationMode, NearestInterpolator};
    ///
    /// let mut interp = NearestInterpolator::with_kernel(
    ///     &[0.0, 1.0],
    ///     &[1.0, 2.0],
    ///     ExtrapolationMode::Nearest,
    ///     Nearest::new(true),
    /// )
    /// .unwrap();
    /// assert_eq!(interp.interpolate(0.5).unwrap(), 1.5);
    /// ```
    pub fn with_kernel(
        xs: &[T],
        ys: &[K::Value],
        mode: ExtrapolationMode,
        kernel: K,
    ) -> Result<Self, InterpolationError> {
        let mut interp = Self::empty_with_kernel(mode, kernel);
        interp.set_data_xy(xs, ys)?;
        Ok(interp)
    }

    /// Interpolator without data. Grow it with `append`, `extend` or `insert`.
    ///
    /// Querying an empty interpolator fails with `DomainError`; with a single
    /// point every query returns that point's value.
    pub fn empty(mode: ExtrapolationMode) -> Self {
        Self::empty_with_kernel(mode, K::default())
    }

    /// Empty interpolator with an explicitly configured kernel.
    pub fn empty_with_kernel(mode: ExtrapolationMode, kernel: K) -> Self {
        Self {
            xs: Vec::new(),
            ys: Vec::new(),
            mode,
            bracket: Bracket::default(),
            kernel,
        }
    }
}

// ========================================
// Introspection
// ========================================

impl<T: Scalar, K: Kernel<T>> Interpolator<T, K> {
    /// Stored coordinates.
    #[inline]
    pub fn data_x(&self) -> &[T] {
        &self.xs
    }

    /// Stored values.
    #[inline]
    pub fn data_y(&self) -> &[K::Value] {
        &self.ys
    }

    /// Number of stored points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// True when no points are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// `(xs[0], xs[n-1])`, or `None` without data.
    pub fn domain(&self) -> Option<(T, T)> {
        Some((*self.xs.first()?, *self.xs.last()?))
    }

    /// Current extrapolation mode.
    #[inline]
    pub fn extrapolation_mode(&self) -> ExtrapolationMode {
        self.mode
    }

    /// Change the extrapolation mode.
    #[inline]
    pub fn set_extrapolation_mode(&mut self, mode: ExtrapolationMode) {
        self.mode = mode;
    }

    /// Kernel in use.
    #[inline]
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Last bracket used by [`Interpolator::interpolate`].
    #[inline]
    pub fn bracket(&self) -> Bracket<T> {
        self.bracket
    }

    /// Coordinates kept by gap-aware downsampling at `interval` spacing.
    ///
    /// See [`sampling::compute_downsampling_indices`] for the selection rule.
    pub fn get_sampled_x(&self, interval: f64, max_gap: f64) -> Vec<T> {
        sampling::compute_downsampling_indices(&self.xs, interval, max_gap)
            .into_iter()
            .map(|i| self.xs[i])
            .collect()
    }
}

// ========================================
// Queries
// ========================================

impl<T: Scalar, K: Kernel<T>> Interpolator<T, K> {
    /// Value at `x`, updating the cached bracket.
    ///
    /// # Returns
    ///
    /// * `Ok(value)` - Interpolated (or extrapolated) value
    /// * `Err(InterpolationError::OutOfRange)` - `x` outside the domain in `Fail` mode
    /// * `Err(InterpolationError::DomainError)` - Interpolator holds no data
    pub fn interpolate(&mut self, x: T) -> Result<K::Value, InterpolationError> {
        let mut bracket = self.bracket;
        let value = self.evaluate_with(&mut bracket, x);
        self.bracket = bracket;
        value
    }

    /// Value at `x` using a caller-owned bracket cache.
    ///
    /// Lets several readers share one interpolator, each with its own cache.
    pub fn evaluate_with(&self, bracket: &mut Bracket<T>, x: T) -> Result<K::Value, InterpolationError> {
        match self.xs.len() {
            0 => {
                return Err(InterpolationError::domain(
                    "cannot interpolate: interpolator holds no data",
                ))
            }
            1 => return Ok(self.ys[0].clone()),
            _ => {}
        }

        if !x.is_finite() {
            warn!(x = x.to_f64_lossless(), "non-finite query point");
        }

        let location = bracket.locate(&self.xs, x);
        trace!(x = x.to_f64_lossless(), lower = bracket.lower(), ?location, "located query");

        match location {
            Location::Inside => {
                // stored nodes are returned verbatim
                if x == self.xs[bracket.lower()] {
                    return Ok(self.ys[bracket.lower()].clone());
                }
                if x == self.xs[bracket.upper()] {
                    return Ok(self.ys[bracket.upper()].clone());
                }
                Ok(self.kernel.evaluate(&self.xs, &self.ys, bracket, x))
            }
            Location::Below | Location::Above => match self.mode {
                ExtrapolationMode::Fail => Err(self.out_of_range(x)),
                ExtrapolationMode::Nearest => Ok(if location == Location::Below {
                    self.ys[0].clone()
                } else {
                    self.ys[self.ys.len() - 1].clone()
                }),
                ExtrapolationMode::Extrapolate => {
                    Ok(self.kernel.extrapolate(&self.xs, &self.ys, bracket, x))
                }
            },
        }
    }

    /// Values at every point of `xs`, in order.
    ///
    /// With `workers > 1` the batch is split into contiguous chunks evaluated
    /// on the rayon pool; each chunk starts from a copy of the cached bracket.
    /// The first error aborts the batch.
    pub fn interpolate_many(&self, xs: &[T], workers: usize) -> Result<Vec<K::Value>, InterpolationError> {
        parallel::map_chunks(xs, workers, |chunk| {
            let mut bracket = self.bracket;
            chunk
                .iter()
                .map(|&x| self.evaluate_with(&mut bracket, x))
                .collect()
        })
    }

    fn out_of_range(&self, x: T) -> InterpolationError {
        InterpolationError::OutOfRange {
            x: x.to_f64_lossless(),
            min: self.xs[0].to_f64_lossless(),
            max: self.xs[self.xs.len() - 1].to_f64_lossless(),
        }
    }
}

// ========================================
// Mutation
// ========================================

impl<T: Scalar, K: Kernel<T>> Interpolator<T, K> {
    fn prepared(&self, ys: &[K::Value]) -> Result<Vec<K::Value>, InterpolationError> {
        ys.iter().map(|y| self.kernel.prepare_value(y)).collect()
    }

    fn data_changed(&mut self) {
        self.bracket = Bracket::first(&self.xs);
        self.kernel.rebuild(&self.xs, &self.ys);
    }

    /// Replace the whole series.
    ///
    /// Requires at least 2 points; validation is the same as [`Interpolator::new`].
    pub fn set_data_xy(&mut self, xs: &[T], ys: &[K::Value]) -> Result<(), InterpolationError> {
        check_sizes(xs.len(), ys.len())?;
        if xs.len() < 2 {
            return Err(InterpolationError::invalid_argument(format!(
                "at least 2 points required, got {}",
                xs.len()
            )));
        }
        check_finite_x(xs)?;
        check_finite_y::<T, K::Value>(ys)?;
        check_increasing(xs)?;
        let ys = self.prepared(ys)?;

        self.xs = xs.to_vec();
        self.ys = ys;
        self.data_changed();
        debug!(points = self.xs.len(), kernel = K::NAME, "replaced series");
        Ok(())
    }

    /// Append one point beyond the current maximum.
    ///
    /// # Returns
    ///
    /// * `Err(InterpolationError::InvalidArgument)` - Non-finite `x` or `y`
    /// * `Err(InterpolationError::DomainError)` - `x` not greater than the last coordinate
    pub fn append(&mut self, x: T, y: K::Value) -> Result<(), InterpolationError> {
        check_finite_x(&[x])?;
        check_finite_y::<T, K::Value>(std::slice::from_ref(&y))?;
        if let Some(&last) = self.xs.last() {
            if x <= last {
                return Err(InterpolationError::domain(format!(
                    "appended x {} is not larger than the last x {}",
                    x, last
                )));
            }
        }
        let y = self.kernel.prepare_value(&y)?;

        self.xs.push(x);
        self.ys.push(y);
        self.data_changed();
        Ok(())
    }

    /// Append a strictly increasing batch beyond the current maximum.
    ///
    /// All-or-nothing: on error the series is unchanged.
    pub fn extend(&mut self, xs: &[T], ys: &[K::Value]) -> Result<(), InterpolationError> {
        check_sizes(xs.len(), ys.len())?;
        if xs.is_empty() {
            return Ok(());
        }
        check_finite_x(xs)?;
        check_finite_y::<T, K::Value>(ys)?;
        check_increasing(xs)?;
        if let Some(&last) = self.xs.last() {
            if xs[0] <= last {
                return Err(InterpolationError::domain(format!(
                    "extended x {} is not larger than the last x {}",
                    xs[0], last
                )));
            }
        }
        let ys = self.prepared(ys)?;

        self.xs.extend_from_slice(xs);
        self.ys.extend(ys);
        self.data_changed();
        debug!(added = xs.len(), points = self.xs.len(), "extended series");
        Ok(())
    }

    /// Merge points at arbitrary positions.
    ///
    /// When `is_sorted` is set and the batch starts beyond the current maximum
    /// this is [`Interpolator::extend`]; otherwise the merged series is sorted
    /// and re-validated. Duplicate coordinates (within the batch or against
    /// stored data) are rejected. All-or-nothing.
    pub fn insert(&mut self, xs: &[T], ys: &[K::Value], is_sorted: bool) -> Result<(), InterpolationError> {
        check_sizes(xs.len(), ys.len())?;
        if xs.is_empty() {
            return Ok(());
        }
        check_finite_x(xs)?;
        check_finite_y::<T, K::Value>(ys)?;

        let beyond_end = self.xs.last().map_or(true, |&last| xs[0] > last);
        if is_sorted && beyond_end {
            return self.extend(xs, ys);
        }
        let ys = self.prepared(ys)?;

        let mut merged: Vec<(T, K::Value)> = self
            .xs
            .iter()
            .copied()
            .zip(self.ys.iter().cloned())
            .chain(xs.iter().copied().zip(ys))
            .collect();
        merged.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        let (merged_xs, merged_ys): (Vec<T>, Vec<K::Value>) = merged.into_iter().unzip();
        check_increasing(&merged_xs)?;

        self.xs = merged_xs;
        self.ys = merged_ys;
        self.data_changed();
        debug!(added = xs.len(), points = self.xs.len(), "inserted into series");
        Ok(())
    }
}

// ========================================
// Serialisation
// ========================================

impl<T: Scalar, K: Kernel<T>> Interpolator<T, K> {
    /// Class/version tag written in front of the encoded series.
    pub fn type_tag() -> String {
        version_tag(K::NAME)
    }

    /// Encode as `[tag][mode: u8][kernel options][X container][Y container]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = ByteWriter::new();
        self.encode(&mut w);
        w.into_bytes()
    }

    /// Decode bytes written by [`Interpolator::to_bytes`].
    ///
    /// # Returns
    ///
    /// * `Err(InterpolationError::VersionMismatch)` - Tag of another class or layout version
    /// * `Err(InterpolationError::Decode)` - Truncated buffer or trailing bytes
    /// * `Err(InterpolationError::InvalidArgument)` - Decoded series violates the invariants
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InterpolationError> {
        let mut r = ByteReader::new(bytes);
        let interp = Self::decode(&mut r)?;
        r.finish()?;
        Ok(interp)
    }

    pub(crate) fn encode(&self, w: &mut ByteWriter) {
        w.write_tag(&Self::type_tag());
        w.write_u8(self.mode.to_code());
        self.kernel.encode_options(w);
        let xs: Vec<f64> = self.xs.iter().map(|x| x.to_f64_lossless()).collect();
        w.write_f64_slice(&xs);
        w.write_u64(self.ys.len() as u64);
        for y in &self.ys {
            y.encode(w);
        }
    }

    pub(crate) fn decode(r: &mut ByteReader<'_>) -> Result<Self, InterpolationError> {
        r.read_tag(&Self::type_tag())?;
        let mode = ExtrapolationMode::from_code(r.read_u8()?)?;
        let kernel = K::decode_options(r)?;
        let xs: Vec<T> = r.read_f64_vec()?.into_iter().map(T::from_f64_lossy).collect();
        let n = r.read_len(8 * <K::Value as SeriesValue<T>>::WIDTH)?;
        let ys = (0..n)
            .map(|_| <K::Value as SeriesValue<T>>::decode(r))
            .collect::<Result<Vec<_>, _>>()?;

        let mut interp = Self::empty_with_kernel(mode, kernel);
        if xs.len() >= 2 {
            interp.set_data_xy(&xs, &ys)?;
        } else {
            check_sizes(xs.len(), ys.len())?;
            interp.extend(&xs, &ys)?;
        }
        Ok(interp)
    }
}

// ========================================
// Traits
// ========================================

impl<T: Scalar, K: Kernel<T>> PartialEq for Interpolator<T, K> {
    /// Same mode and approximately equal series (relative 1e-4, NaN == NaN).
    /// Kernel caches are not compared.
    fn eq(&self, other: &Self) -> bool {
        let rel = T::from_f64_lossy(DEFAULT_RELATIVE_TOLERANCE);
        self.mode == other.mode
            && approx_eq_slice::<T, T>(&self.xs, &other.xs, rel)
            && approx_eq_slice::<T, K::Value>(&self.ys, &other.ys, rel)
    }
}

impl<T: Scalar, K: Kernel<T>> fmt::Display for Interpolator<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(mode={}, points={}", K::NAME, self.mode, self.len())?;
        if let Some((min, max)) = self.domain() {
            write!(f, ", domain=[{}, {}]", min, max)?;
        }
        write!(f, ")")
    }
}
