//! Cached interval search over a sorted coordinate array.
//!
//! A [`Bracket`] remembers the last pair of adjacent indices `(lower, upper)`
//! used for a query. Sequential queries (the usual resampling pattern) hit the
//! cached pair or one of its neighbours, so lookup is amortised O(1). Random
//! queries fall back to a linear rescan from the cached position.
//!
//! The cache is plain `Copy` data. Parallel readers each take their own copy,
//! which keeps the shared series immutable while queries run.

use crate::value::Scalar;

/// Position of a query relative to the stored domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Query is smaller than the first coordinate
    Below,
    /// Query lies within `[xs[lower], xs[upper]]`
    Inside,
    /// Query is larger than the last coordinate
    Above,
}

/// Pair of adjacent indices bounding a query, with the precomputed inverse span.
///
/// # Example
///
/// ```
/// use vectorinterp_core::bracket::{Bracket, Location};
///
/// let xs: [f64; 4] = [0.0, 1.0, 3.0, 4.0];
/// let mut bracket = Bracket::first(&xs);
///
/// assert_eq!(bracket.locate(&xs, 2.0), Location::Inside);
/// assert_eq!((bracket.lower(), bracket.upper()), (1, 2));
/// assert!((bracket.factor(2.0) - 0.5).abs() < 1e-12);
///
/// assert_eq!(bracket.locate(&xs, 5.0), Location::Above);
/// assert_eq!((bracket.lower(), bracket.upper()), (2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket<T: Scalar> {
    lower: usize,
    upper: usize,
    xmin: T,
    xmax: T,
    inverse_span: T,
}

impl<T: Scalar> Default for Bracket<T> {
    fn default() -> Self {
        Self {
            lower: 0,
            upper: 1,
            xmin: T::zero(),
            xmax: T::one(),
            inverse_span: T::one(),
        }
    }
}

impl<T: Scalar> Bracket<T> {
    /// Bracket `(lower, lower + 1)` over `xs`.
    ///
    /// `xs` must hold at least `lower + 2` values.
    #[inline]
    pub fn at(xs: &[T], lower: usize) -> Self {
        let xmin = xs[lower];
        let xmax = xs[lower + 1];
        Self {
            lower,
            upper: lower + 1,
            xmin,
            xmax,
            inverse_span: T::one() / (xmax - xmin),
        }
    }

    /// Bracket over the first interval, or the default placeholder if `xs` has fewer than 2 values.
    #[inline]
    pub fn first(xs: &[T]) -> Self {
        if xs.len() >= 2 {
            Self::at(xs, 0)
        } else {
            Self::default()
        }
    }

    /// Index of the smaller coordinate.
    #[inline]
    pub fn lower(&self) -> usize {
        self.lower
    }

    /// Index of the larger coordinate.
    #[inline]
    pub fn upper(&self) -> usize {
        self.upper
    }

    /// Coordinates `(xmin, xmax)` of the bracket.
    #[inline]
    pub fn bounds(&self) -> (T, T) {
        (self.xmin, self.xmax)
    }

    /// Normalised factor `t = (x - xmin) / (xmax - xmin)`.
    ///
    /// `t` lies in `[0, 1]` for in-range queries and outside it when extrapolating.
    #[inline]
    pub fn factor(&self, x: T) -> T {
        (x - self.xmin) * self.inverse_span
    }

    /// Move the bracket to the interval containing `x` and report where `x` lies.
    ///
    /// `xs` must be strictly increasing with at least 2 values. When `x` is
    /// outside the domain the bracket is left on the boundary interval.
    pub fn locate(&mut self, xs: &[T], x: T) -> Location {
        let last = xs.len() - 1;

        // stale cache (series replaced or shrunk)
        if self.upper > last || xs[self.lower] != self.xmin || xs[self.upper] != self.xmax {
            *self = Self::at(xs, 0);
        }

        if x > xs[self.upper] {
            let mut i = self.upper;
            loop {
                i += 1;
                if i > last {
                    *self = Self::at(xs, last - 1);
                    return Location::Above;
                }
                if x <= xs[i] {
                    *self = Self::at(xs, i - 1);
                    return Location::Inside;
                }
            }
        }

        if x < xs[self.lower] {
            let mut i = self.lower;
            loop {
                if i == 0 {
                    *self = Self::at(xs, 0);
                    return Location::Below;
                }
                i -= 1;
                if x >= xs[i] {
                    *self = Self::at(xs, i);
                    return Location::Inside;
                }
            }
        }

        Location::Inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XS: [f64; 5] = [-10.0, -5.0, 0.0, 6.0, 12.0];

    // ========================================
    // Construction
    // ========================================

    #[test]
    fn test_at_precomputes_inverse_span() {
        let b = Bracket::at(&XS, 2);
        assert_eq!((b.lower(), b.upper()), (2, 3));
        assert_eq!(b.bounds(), (0.0, 6.0));
        assert!((b.factor(3.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_first_with_short_series_is_placeholder() {
        let b = Bracket::<f64>::first(&[1.0]);
        assert_eq!(b, Bracket::default());
    }

    // ========================================
    // Search
    // ========================================

    #[test]
    fn test_cached_bracket_is_reused() {
        let mut b = Bracket::at(&XS, 1);
        assert_eq!(b.locate(&XS, -2.0), Location::Inside);
        assert_eq!(b.lower(), 1);
    }

    #[test]
    fn test_forward_scan() {
        let mut b = Bracket::first(&XS);
        assert_eq!(b.locate(&XS, 7.0), Location::Inside);
        assert_eq!((b.lower(), b.upper()), (3, 4));
    }

    #[test]
    fn test_backward_scan() {
        let mut b = Bracket::at(&XS, 3);
        assert_eq!(b.locate(&XS, -7.5), Location::Inside);
        assert_eq!((b.lower(), b.upper()), (0, 1));
    }

    #[test]
    fn test_nodes_are_inside() {
        let mut b = Bracket::first(&XS);
        for &x in XS.iter().rev() {
            assert_eq!(b.locate(&XS, x), Location::Inside);
            assert!(XS[b.lower()] <= x && x <= XS[b.upper()]);
        }
    }

    #[test]
    fn test_above_leaves_last_interval() {
        let mut b = Bracket::first(&XS);
        assert_eq!(b.locate(&XS, 13.0), Location::Above);
        assert_eq!((b.lower(), b.upper()), (3, 4));
        assert!(b.factor(13.0) > 1.0);
    }

    #[test]
    fn test_below_leaves_first_interval() {
        let mut b = Bracket::at(&XS, 3);
        assert_eq!(b.locate(&XS, -11.0), Location::Below);
        assert_eq!((b.lower(), b.upper()), (0, 1));
        assert!(b.factor(-11.0) < 0.0);
    }

    #[test]
    fn test_stale_cache_is_reset() {
        let mut b = Bracket::at(&XS, 3);
        let shorter = [0.0, 1.0, 2.0];
        assert_eq!(b.locate(&shorter, 1.5), Location::Inside);
        assert_eq!((b.lower(), b.upper()), (1, 2));
    }

    #[test]
    fn test_two_point_series() {
        let xs = [1.0_f32, 2.0];
        let mut b = Bracket::first(&xs);
        assert_eq!(b.locate(&xs, 1.25), Location::Inside);
        assert_eq!(b.locate(&xs, 0.0), Location::Below);
        assert_eq!(b.locate(&xs, 3.0), Location::Above);
    }
}
