//! Two-dimensional interpolation composed from per-row column interpolators.
//!
//! A [`BivariateInterpolator`] holds strictly increasing row coordinates and
//! one column [`Interpolator`] per row. A query `(row, col)` evaluates the two
//! rows bracketing `row` at `col` and blends both results with the row kernel:
//!
//! ```text
//! y1 = rows[lower](col)
//! y2 = rows[upper](col)
//! f(row, col) = kernel(t_row, y1, y2)
//! ```

use crate::bracket::{Bracket, Location};
use crate::error::InterpolationError;
use crate::extrapolation::ExtrapolationMode;
use crate::interpolator::validation::{check_finite_x, check_increasing};
use crate::interpolator::Interpolator;
use crate::kernels::{Akima, Kernel, Linear, Nearest, Slerp};
use crate::parallel;
use crate::serialization::{version_tag, ByteReader, ByteWriter};
use crate::value::{approx_eq_slice, Scalar, DEFAULT_RELATIVE_TOLERANCE};
use std::fmt;
use tracing::debug;

/// Bilinear grid interpolator.
pub type BivariateLinearInterpolator<T = f64> = BivariateInterpolator<T, Linear>;
/// Nearest-neighbour grid interpolator.
pub type BivariateNearestInterpolator<T = f64> = BivariateInterpolator<T, Nearest>;
/// Akima along columns, linear blend between rows.
pub type BivariateAkimaInterpolator<T = f64> = BivariateInterpolator<T, Akima<T>>;
/// Attitude grid interpolator.
pub type BivariateSlerpInterpolator<T = f64> = BivariateInterpolator<T, Slerp>;

/// Grid interpolator `f(row, col)` over per-row column series.
///
/// Rows may have different column coordinates. The row axis follows the
/// same [`ExtrapolationMode`] as the column interpolators.
///
/// # Example
///
/// ```
/// use vectorinterp_core::{BivariateLinearInterpolator, ExtrapolationMode};
///
/// let mut grid = BivariateLinearInterpolator::new(ExtrapolationMode::Fail);
/// grid.append_row(0.0, &[0.0, 10.0], &[0.0, 10.0]).unwrap();
/// grid.append_row(1.0, &[0.0, 10.0], &[100.0, 110.0]).unwrap();
///
/// let v: f64 = grid.interpolate(0.5, 5.0).unwrap();
/// assert!((v - 55.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BivariateInterpolator<T: Scalar, K: Kernel<T>> {
    mode: ExtrapolationMode,
    /// Strictly increasing row coordinates
    rows: Vec<T>,
    /// One column interpolator per row coordinate
    columns: Vec<Interpolator<T, K>>,
    row_bracket: Bracket<T>,
    kernel: K,
}

/// Locate `row` and blend the bracketing rows' values from `column_value`.
fn blend_rows<T, K, F>(
    rows: &[T],
    mode: ExtrapolationMode,
    kernel: &K,
    bracket: &mut Bracket<T>,
    row: T,
    mut column_value: F,
) -> Result<K::Value, InterpolationError>
where
    T: Scalar,
    K: Kernel<T>,
    F: FnMut(usize) -> Result<K::Value, InterpolationError>,
{
    match rows.len() {
        0 => {
            return Err(InterpolationError::domain(
                "cannot interpolate: bivariate interpolator holds no rows",
            ))
        }
        1 => return column_value(0),
        _ => {}
    }

    let location = bracket.locate(rows, row);
    if location != Location::Inside {
        match mode {
            ExtrapolationMode::Fail => {
                return Err(InterpolationError::OutOfRange {
                    x: row.to_f64_lossless(),
                    min: rows[0].to_f64_lossless(),
                    max: rows[rows.len() - 1].to_f64_lossless(),
                })
            }
            ExtrapolationMode::Nearest => {
                return column_value(if location == Location::Below { 0 } else { rows.len() - 1 })
            }
            ExtrapolationMode::Extrapolate => {}
        }
    }

    if row == rows[bracket.lower()] {
        return column_value(bracket.lower());
    }
    if row == rows[bracket.upper()] {
        return column_value(bracket.upper());
    }
    let y1 = column_value(bracket.lower())?;
    let y2 = column_value(bracket.upper())?;
    Ok(kernel.interpolate_pair(bracket.factor(row), &y1, &y2))
}

impl<T: Scalar, K: Kernel<T>> BivariateInterpolator<T, K> {
    /// Empty grid with the kernel's default options.
    pub fn new(mode: ExtrapolationMode) -> Self {
        Self::with_kernel(mode, K::default())
    }

    /// Empty grid; `kernel` is used for the row blend and cloned into every row.
    pub fn with_kernel(mode: ExtrapolationMode, kernel: K) -> Self {
        Self {
            mode,
            rows: Vec::new(),
            columns: Vec::new(),
            row_bracket: Bracket::default(),
            kernel,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True without rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row coordinates.
    #[inline]
    pub fn row_coordinates(&self) -> &[T] {
        &self.rows
    }

    /// Column interpolator of row `index`.
    #[inline]
    pub fn row(&self, index: usize) -> Option<&Interpolator<T, K>> {
        self.columns.get(index)
    }

    /// Current extrapolation mode.
    #[inline]
    pub fn extrapolation_mode(&self) -> ExtrapolationMode {
        self.mode
    }

    /// Change the mode of the row axis and of every column interpolator.
    pub fn set_extrapolation_mode(&mut self, mode: ExtrapolationMode) {
        self.mode = mode;
        for column in &mut self.columns {
            column.set_extrapolation_mode(mode);
        }
    }

    fn build_row(&self, row: T, col_xs: &[T], values: &[K::Value]) -> Result<Interpolator<T, K>, InterpolationError> {
        check_finite_x(&[row])?;
        Interpolator::with_kernel(col_xs, values, self.mode, self.kernel.clone())
    }

    /// Add a row beyond the last row coordinate.
    ///
    /// # Returns
    ///
    /// * `Err(InterpolationError::DomainError)` - `row` not greater than the last row
    /// * `Err(InterpolationError::InvalidArgument)` - Column data fails the series checks
    pub fn append_row(&mut self, row: T, col_xs: &[T], values: &[K::Value]) -> Result<(), InterpolationError> {
        if let Some(&last) = self.rows.last() {
            if row <= last {
                return Err(InterpolationError::domain(format!(
                    "appended row {} is not larger than the last row {}",
                    row, last
                )));
            }
        }
        let column = self.build_row(row, col_xs, values)?;

        self.rows.push(row);
        self.columns.push(column);
        self.row_bracket = Bracket::first(&self.rows);
        Ok(())
    }

    /// Add a row at its sorted position, replacing a row with the same coordinate.
    pub fn insert_row(&mut self, row: T, col_xs: &[T], values: &[K::Value]) -> Result<(), InterpolationError> {
        let column = self.build_row(row, col_xs, values)?;

        let index = self.rows.partition_point(|&r| r < row);
        if self.rows.get(index) == Some(&row) {
            debug!(row = row.to_f64_lossless(), "replacing row");
            self.columns[index] = column;
        } else {
            self.rows.insert(index, row);
            self.columns.insert(index, column);
        }
        self.row_bracket = Bracket::first(&self.rows);
        Ok(())
    }

    /// Value at `(row, col)`, updating the row and column caches.
    pub fn interpolate(&mut self, row: T, col: T) -> Result<K::Value, InterpolationError> {
        let columns = &mut self.columns;
        blend_rows(
            &self.rows,
            self.mode,
            &self.kernel,
            &mut self.row_bracket,
            row,
            |i| columns[i].interpolate(col),
        )
    }

    /// Values at a batch of `(row, col)` pairs, in order.
    pub fn interpolate_pairs(&self, points: &[(T, T)], workers: usize) -> Result<Vec<K::Value>, InterpolationError> {
        parallel::map_chunks(points, workers, |chunk| {
            let mut row_bracket = self.row_bracket;
            let mut col_brackets = self.column_brackets();
            chunk
                .iter()
                .map(|&(row, col)| {
                    blend_rows(&self.rows, self.mode, &self.kernel, &mut row_bracket, row, |i| {
                        self.columns[i].evaluate_with(&mut col_brackets[i], col)
                    })
                })
                .collect()
        })
    }

    /// `rows.len() x cols.len()` matrix of values, indexed `[row][col]`.
    ///
    /// Columns are distributed over `workers` threads; each worker keeps its
    /// own copies of the row and column caches.
    pub fn interpolate_grid(
        &self,
        rows: &[T],
        cols: &[T],
        workers: usize,
    ) -> Result<Vec<Vec<K::Value>>, InterpolationError> {
        let per_column: Vec<Vec<K::Value>> = parallel::map_chunks(cols, workers, |chunk| {
            let mut row_bracket = self.row_bracket;
            let mut col_brackets = self.column_brackets();
            chunk
                .iter()
                .map(|&col| {
                    rows.iter()
                        .map(|&row| {
                            blend_rows(&self.rows, self.mode, &self.kernel, &mut row_bracket, row, |i| {
                                self.columns[i].evaluate_with(&mut col_brackets[i], col)
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()
                })
                .collect()
        })?;

        Ok((0..rows.len())
            .map(|r| per_column.iter().map(|column| column[r].clone()).collect())
            .collect())
    }

    fn column_brackets(&self) -> Vec<Bracket<T>> {
        self.columns.iter().map(Interpolator::bracket).collect()
    }
}

// ========================================
// Serialisation
// ========================================

impl<T: Scalar, K: Kernel<T>> BivariateInterpolator<T, K> {
    /// Class/version tag, e.g. `BivariateLinearInterpolator_V1`.
    pub fn type_tag() -> String {
        version_tag(&format!("Bivariate{}", K::NAME))
    }

    /// Encode as `[tag][mode: u8][kernel options][row container][row interpolators...]`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut w = ByteWriter::new();
        w.write_tag(&Self::type_tag());
        w.write_u8(self.mode.to_code());
        self.kernel.encode_options(&mut w);
        let rows: Vec<f64> = self.rows.iter().map(|r| r.to_f64_lossless()).collect();
        w.write_f64_slice(&rows);
        for column in &self.columns {
            column.encode(&mut w);
        }
        w.into_bytes()
    }

    /// Decode bytes written by [`BivariateInterpolator::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InterpolationError> {
        let mut r = ByteReader::new(bytes);
        r.read_tag(&Self::type_tag())?;
        let mode = ExtrapolationMode::from_code(r.read_u8()?)?;
        let kernel = K::decode_options(&mut r)?;
        let rows: Vec<T> = r.read_f64_vec()?.into_iter().map(T::from_f64_lossy).collect();
        check_finite_x(&rows)?;
        check_increasing(&rows)?;
        let columns = (0..rows.len())
            .map(|_| Interpolator::decode(&mut r))
            .collect::<Result<Vec<_>, _>>()?;
        r.finish()?;

        let row_bracket = Bracket::first(&rows);
        Ok(Self {
            mode,
            rows,
            columns,
            row_bracket,
            kernel,
        })
    }
}

impl<T: Scalar, K: Kernel<T>> PartialEq for BivariateInterpolator<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode
            && approx_eq_slice::<T, T>(&self.rows, &other.rows, T::from_f64_lossy(DEFAULT_RELATIVE_TOLERANCE))
            && self.columns == other.columns
    }
}

impl<T: Scalar, K: Kernel<T>> fmt::Display for BivariateInterpolator<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bivariate{}(mode={}, rows={})", K::NAME, self.mode, self.len())
    }
}
