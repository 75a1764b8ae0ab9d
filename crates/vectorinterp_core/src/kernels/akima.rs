//! Modified Akima (makima) cubic interpolation.

use super::Kernel;
use crate::bracket::Bracket;
use crate::value::Scalar;
use tracing::debug;

/// Fraction of the first/last interval spanned by the boundary segments.
const BOUNDARY_FRACTION: f64 = 0.01;

/// Minimum number of points for the spline; below this the kernel is linear.
pub(crate) const MIN_SPLINE_POINTS: usize = 4;

/// Straight line through two points, used past the domain ends.
#[derive(Debug, Clone, Copy)]
struct Segment<T: Scalar> {
    x0: T,
    y0: T,
    x1: T,
    y1: T,
}

impl<T: Scalar> Segment<T> {
    #[inline]
    fn at(&self, x: T) -> T {
        self.y0 + (x - self.x0) * (self.y1 - self.y0) / (self.x1 - self.x0)
    }
}

/// Modified Akima cubic Hermite spline with linear boundary segments.
///
/// Node slopes follow the makima weighting `w(a, b) = |a - b| + |a + b| / 2`
/// with two ghost slopes extrapolated at each end, so flat runs stay flat and
/// the curve does not overshoot next to steps.
///
/// Outside the domain the kernel follows two short synthetic segments: from
/// `(x0, y0)` to the spline value 1% into the first interval, and from the
/// spline value 1% before the last node to `(xn-1, yn-1)`.
///
/// With fewer than 4 points the kernel is exactly [`super::Linear`].
#[derive(Debug, Clone)]
pub struct Akima<T: Scalar> {
    /// Node slopes; empty when the series is too short for the spline
    slopes: Vec<T>,
    lower: Option<Segment<T>>,
    upper: Option<Segment<T>>,
}

impl<T: Scalar> Default for Akima<T> {
    fn default() -> Self {
        Self {
            slopes: Vec::new(),
            lower: None,
            upper: None,
        }
    }
}

#[inline]
fn makima_weight<T: Scalar>(a: T, b: T) -> T {
    (a - b).abs() + (a + b).abs() * T::from_f64_lossy(0.5)
}

/// Makima node slopes for `n >= 4` points.
fn makima_slopes<T: Scalar>(xs: &[T], ys: &[T]) -> Vec<T> {
    let n = xs.len();
    let two = T::one() + T::one();

    // segment slopes padded with two ghost slopes on each side:
    // ext[k] = m[k - 2]
    let mut ext = Vec::with_capacity(n + 3);
    ext.push(T::zero());
    ext.push(T::zero());
    ext.extend((0..n - 1).map(|i| (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])));
    ext[1] = two * ext[2] - ext[3];
    ext[0] = two * ext[1] - ext[2];
    let mnm1 = two * ext[n] - ext[n - 1];
    ext.push(mnm1);
    let mn = two * mnm1 - ext[n];
    ext.push(mn);

    (0..n)
        .map(|i| {
            let w1 = makima_weight(ext[i + 3], ext[i + 2]);
            let w2 = makima_weight(ext[i + 1], ext[i]);
            let sum = w1 + w2;
            if sum == T::zero() {
                return T::zero();
            }
            let s = (w1 * ext[i + 1] + w2 * ext[i + 2]) / sum;
            if s.is_nan() {
                T::zero()
            } else {
                s
            }
        })
        .collect()
}

impl<T: Scalar> Akima<T> {
    /// True when the spline is active (at least 4 points).
    #[inline]
    pub fn is_spline(&self) -> bool {
        !self.slopes.is_empty()
    }

    /// Cubic Hermite value on segment `i`.
    fn hermite(&self, xs: &[T], ys: &[T], i: usize, x: T) -> T {
        let one = T::one();
        let two = one + one;
        let three = two + one;

        let (x0, x1) = (xs[i], xs[i + 1]);
        let (y0, y1) = (ys[i], ys[i + 1]);
        let (s0, s1) = (self.slopes[i], self.slopes[i + 1]);
        let dx = x1 - x0;
        let u = (x - x0) / dx;
        let v = one - u;

        v * v * (y0 * (one + two * u) + s0 * (x - x0)) + u * u * (y1 * (three - two * u) + dx * s1 * (u - one))
    }
}

impl<T: Scalar> Kernel<T> for Akima<T> {
    type Value = T;

    const NAME: &'static str = "AkimaInterpolator";

    #[inline]
    fn interpolate_pair(&self, t: T, y1: &T, y2: &T) -> T {
        t * *y2 + (T::one() - t) * *y1
    }

    fn rebuild(&mut self, xs: &[T], ys: &[T]) {
        let n = xs.len();
        if n < MIN_SPLINE_POINTS {
            *self = Self::default();
            return;
        }

        self.slopes = makima_slopes(xs, ys);

        let fraction = T::from_f64_lossy(BOUNDARY_FRACTION);
        let min_x_dx = xs[0] + (xs[1] - xs[0]) * fraction;
        let max_x_dx = xs[n - 1] - (xs[n - 1] - xs[n - 2]) * fraction;

        self.lower = Some(Segment {
            x0: xs[0],
            y0: ys[0],
            x1: min_x_dx,
            y1: self.hermite(xs, ys, 0, min_x_dx),
        });
        self.upper = Some(Segment {
            x0: max_x_dx,
            y0: self.hermite(xs, ys, n - 2, max_x_dx),
            x1: xs[n - 1],
            y1: ys[n - 1],
        });

        debug!(points = n, "rebuilt akima spline");
    }

    fn evaluate(&self, xs: &[T], ys: &[T], bracket: &Bracket<T>, x: T) -> T {
        if !self.is_spline() {
            return self.interpolate_pair(bracket.factor(x), &ys[bracket.lower()], &ys[bracket.upper()]);
        }
        self.hermite(xs, ys, bracket.lower(), x)
    }

    fn extrapolate(&self, xs: &[T], ys: &[T], bracket: &Bracket<T>, x: T) -> T {
        let segment = if x < xs[0] { self.lower } else { self.upper };
        match segment {
            Some(segment) => segment.at(x),
            None => self.interpolate_pair(bracket.factor(x), &ys[bracket.lower()], &ys[bracket.upper()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::Location;
    use approx::assert_relative_eq;

    const XS: [f64; 5] = [-10.0, -5.0, 0.0, 6.0, 12.0];
    const YS: [f64; 5] = [1.0, 0.0, 1.0, 0.0, -1.0];

    fn built(xs: &[f64], ys: &[f64]) -> Akima<f64> {
        let mut k = Akima::default();
        k.rebuild(xs, ys);
        k
    }

    fn eval(k: &Akima<f64>, xs: &[f64], ys: &[f64], x: f64) -> f64 {
        let mut b = Bracket::first(xs);
        match b.locate(xs, x) {
            Location::Inside => k.evaluate(xs, ys, &b, x),
            _ => k.extrapolate(xs, ys, &b, x),
        }
    }

    // ========================================
    // Slopes
    // ========================================

    #[test]
    fn test_slopes_of_straight_line_are_constant() {
        let xs = [0.0, 1.0, 3.0, 4.0, 7.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x - 1.0).collect();
        for s in makima_slopes(&xs, &ys) {
            assert_relative_eq!(s, 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_flat_data_has_zero_slopes() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [5.0; 4];
        assert!(makima_slopes(&xs, &ys).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_reference_slopes() {
        let s = makima_slopes(&XS, &YS);
        assert_eq!(s.len(), 5);
        assert_relative_eq!(s[3], -1.0 / 6.0, epsilon = 1e-12);
        assert_relative_eq!(s[4], -1.0 / 6.0, epsilon = 1e-12);
    }

    // ========================================
    // Evaluation
    // ========================================

    #[test]
    fn test_reference_values() {
        let k = built(&XS, &YS);
        assert!(k.is_spline());
        assert_relative_eq!(eval(&k, &XS, &YS, -7.5), 0.2684859155, epsilon = 1e-9);
        assert_relative_eq!(eval(&k, &XS, &YS, -2.6), 0.5509550555, epsilon = 1e-9);
        assert_relative_eq!(eval(&k, &XS, &YS, 3.0), 0.5808823529, epsilon = 1e-9);
        assert_relative_eq!(eval(&k, &XS, &YS, 8.0), -1.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_nodes_are_exact() {
        let k = built(&XS, &YS);
        for (&x, &y) in XS.iter().zip(YS.iter()) {
            assert_relative_eq!(eval(&k, &XS, &YS, x), y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_boundary_segments_extrapolate() {
        let k = built(&XS, &YS);
        assert_relative_eq!(eval(&k, &XS, &YS, -100.0), 28.0618464789, epsilon = 1e-8);
        assert_relative_eq!(eval(&k, &XS, &YS, 100.0), -15.6666666667, epsilon = 1e-8);
    }

    #[test]
    fn test_short_series_is_linear() {
        let xs = [0.0, 1.0, 3.0];
        let ys = [0.0, 2.0, -2.0];
        let k = built(&xs, &ys);
        assert!(!k.is_spline());
        assert_relative_eq!(eval(&k, &xs, &ys, 0.5), 1.0, epsilon = 1e-12);
        assert_relative_eq!(eval(&k, &xs, &ys, 2.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(eval(&k, &xs, &ys, 4.0), -4.0, epsilon = 1e-12);
        assert_relative_eq!(eval(&k, &xs, &ys, -1.0), -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rebuild_to_short_series_clears_cache() {
        let mut k = built(&XS, &YS);
        k.rebuild(&XS[..2], &YS[..2]);
        assert!(!k.is_spline());
    }

    #[test]
    fn test_no_overshoot_next_to_step() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [0.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let k = built(&xs, &ys);
        for i in 0..=50 {
            let x = i as f64 * 0.1;
            let y = eval(&k, &xs, &ys, x);
            assert!((-1e-12..=1.0 + 1e-12).contains(&y), "overshoot at {}: {}", x, y);
        }
    }
}
