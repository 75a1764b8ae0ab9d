//! Gap-aware downsampling and shared-section detection for sorted series.
//!
//! A *section* is a run of consecutive values no more than `max_gap` apart.
//! Shared sections of several series are the ranges covered by a section of
//! every series, e.g. the time spans where navigation and attitude data both
//! exist.

use crate::value::Scalar;

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range<T> {
    /// Inclusive lower bound
    pub min: T,
    /// Inclusive upper bound
    pub max: T,
}

impl<T: Scalar> Range<T> {
    /// Range from its bounds (not checked).
    #[inline]
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// `min <= value <= max`
    #[inline]
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// True when the ranges share at least one point.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min <= other.max && self.max >= other.min
    }

    /// Overlapping part; invalid (`min > max`) when the ranges are disjoint.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        Self::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// `min <= max`
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

#[inline]
fn is_valid_gap(max_gap: f64) -> bool {
    max_gap.is_finite() && max_gap > 0.0
}

#[inline]
fn is_downsampling_disabled(interval: f64) -> bool {
    interval <= 0.0 || !interval.is_finite()
}

fn effective_max_gap(max_gap: f64, interval: f64) -> f64 {
    if is_valid_gap(max_gap) {
        max_gap
    } else if is_downsampling_disabled(interval) {
        10.0
    } else {
        2.0 * interval
    }
}

/// Indices of `data` kept when downsampling to one value per `interval`.
///
/// Index 0 is always kept. A later index is kept when its value is at least
/// `interval` past the last kept value, or when the gap to the previous value
/// exceeds `max_gap` (sampling restarts after the gap).
///
/// `interval <= 0` or non-finite disables downsampling (all indices are
/// returned). `max_gap <= 0` or non-finite defaults to `2 * interval`.
///
/// # Example
///
/// ```
/// use vectorinterp_core::sampling::compute_downsampling_indices;
///
/// let t = [0.0, 0.4, 1.0, 1.3, 2.1, 10.0, 10.2, 11.0];
/// assert_eq!(compute_downsampling_indices(&t, 1.0, 5.0), vec![0, 2, 4, 5, 7]);
/// ```
pub fn compute_downsampling_indices<T: Scalar>(data: &[T], interval: f64, max_gap: f64) -> Vec<usize> {
    let n = data.len();
    if n == 0 {
        return Vec::new();
    }
    if is_downsampling_disabled(interval) {
        return (0..n).collect();
    }
    let max_gap = effective_max_gap(max_gap, interval);

    let first = data[0].to_f64_lossless();
    let last = data[n - 1].to_f64_lossless();
    let estimated = ((last - first) / interval) as usize + 1;
    let mut indices = Vec::with_capacity(estimated.min(n));

    indices.push(0);
    let mut last_selected = first;
    for i in 1..n {
        let current = data[i].to_f64_lossless();
        let gap = current - data[i - 1].to_f64_lossless();
        if gap > max_gap || current - last_selected >= interval {
            indices.push(i);
            last_selected = current;
        }
    }
    indices
}

/// Values of `data` at [`compute_downsampling_indices`].
pub fn downsample_values<T: Scalar>(data: &[T], interval: f64, max_gap: f64) -> Vec<T> {
    compute_downsampling_indices(data, interval, max_gap)
        .into_iter()
        .map(|i| data[i])
        .collect()
}

/// Split sorted `data` into sections at gaps larger than `max_gap`.
///
/// One value gives a single degenerate section; an invalid `max_gap`
/// (non-positive or non-finite) gives one section spanning all data.
pub fn get_sections<T: Scalar>(data: &[T], max_gap: f64) -> Vec<Range<T>> {
    let (first, last) = match (data.first(), data.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Vec::new(),
    };
    if data.len() == 1 || !is_valid_gap(max_gap) {
        return vec![Range::new(first, last)];
    }

    let mut sections = Vec::new();
    let mut start = first;
    for pair in data.windows(2) {
        if (pair[1] - pair[0]).to_f64_lossless() > max_gap {
            sections.push(Range::new(start, pair[0]));
            start = pair[1];
        }
    }
    sections.push(Range::new(start, last));
    sections
}

fn intersect_ranges<T: Scalar>(a: &[Range<T>], b: &[Range<T>]) -> Vec<Range<T>> {
    a.iter()
        .flat_map(|r1| {
            b.iter()
                .filter(move |r2| r1.overlaps(r2))
                .map(move |r2| r1.intersection(r2))
        })
        .filter(Range::is_valid)
        .collect()
}

/// Ranges covered by a section of every container.
///
/// Sections are intersected progressively; the search stops as soon as no
/// shared range remains.
///
/// ```
/// use vectorinterp_core::sampling::{get_shared_sections, Range};
///
/// let a = [0.0, 1.0, 2.0, 3.0, 10.0, 11.0, 12.0];
/// let b = [1.5, 2.5, 3.5, 4.5, 11.5, 12.5];
/// let shared = get_shared_sections(&[&a[..], &b[..]], 2.0);
/// assert_eq!(shared, vec![Range::new(1.5, 3.0), Range::new(11.5, 12.0)]);
/// ```
pub fn get_shared_sections<T: Scalar>(containers: &[&[T]], max_gap: f64) -> Vec<Range<T>> {
    let (first, rest) = match containers.split_first() {
        Some(split) => split,
        None => return Vec::new(),
    };

    let mut shared = get_sections(first, max_gap);
    for container in rest {
        if shared.is_empty() {
            break;
        }
        shared = intersect_ranges(&shared, &get_sections(container, max_gap));
    }
    shared
}

/// For every container, the indices of values inside a shared section.
pub fn get_shared_section_indices<T: Scalar>(containers: &[&[T]], max_gap: f64) -> Vec<Vec<usize>> {
    let shared = get_shared_sections(containers, max_gap);
    containers
        .iter()
        .map(|container| {
            container
                .iter()
                .enumerate()
                .filter(|(_, v)| shared.iter().any(|s| s.contains(**v)))
                .map(|(i, _)| i)
                .collect()
        })
        .collect()
}

/// For every container, the values inside a shared section.
pub fn cut_to_shared_sections<T: Scalar>(containers: &[&[T]], max_gap: f64) -> Vec<Vec<T>> {
    get_shared_section_indices(containers, max_gap)
        .into_iter()
        .zip(containers.iter())
        .map(|(indices, container)| indices.into_iter().map(|i| container[i]).collect())
        .collect()
}
