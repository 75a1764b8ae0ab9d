//! # vectorinterp_core: Interval-Based Series Interpolation
//!
//! Interpolates values stored against a strictly increasing coordinate
//! (typically time) at arbitrary query points:
//! - Bracket cache giving amortised O(1) sequential lookups (`bracket`)
//! - Linear, nearest, modified Akima and quaternion slerp kernels (`kernels`)
//! - Per-instance extrapolation policy (`extrapolation`)
//! - Generic container with validated mutation and serialisation (`interpolator`)
//! - Two-dimensional interpolation over per-row series (`bivariate`)
//! - Yaw/pitch/roll conversions for attitude data (`rotation`)
//! - Gap-aware downsampling and shared-section detection (`sampling`)
//!
//! ## Usage Examples
//!
//! ```rust
//! use vectorinterp_core::{AkimaInterpolator, ExtrapolationMode, LinearInterpolator};
//!
//! let xs: [f64; 5] = [-10.0, -5.0, 0.0, 6.0, 12.0];
//! let ys = [1.0, 0.0, 1.0, 0.0, -1.0];
//!
//! let mut linear = LinearInterpolator::new(&xs, &ys, ExtrapolationMode::Extrapolate).unwrap();
//! assert!((linear.interpolate(-7.5).unwrap() - 0.5).abs() < 1e-12);
//!
//! let mut akima = AkimaInterpolator::new(&xs, &ys, ExtrapolationMode::Nearest).unwrap();
//! assert_eq!(akima.interpolate(100.0).unwrap(), -1.0);
//!
//! // Batch queries on 4 worker threads
//! let queries: Vec<f64> = (0..100).map(|i| -10.0 + 0.2 * i as f64).collect();
//! let values = akima.interpolate_many(&queries, 4).unwrap();
//! assert_eq!(values.len(), queries.len());
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): Run batch queries on a rayon thread pool
//! - `serde`: Serialise `ExtrapolationMode` and `sampling::Range`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod bivariate;
pub mod bracket;
pub mod error;
pub mod extrapolation;
pub mod interpolator;
pub mod kernels;
mod parallel;
pub mod rotation;
pub mod sampling;
pub mod serialization;
pub mod value;

pub use bivariate::{
    BivariateAkimaInterpolator, BivariateInterpolator, BivariateLinearInterpolator,
    BivariateNearestInterpolator, BivariateSlerpInterpolator,
};
pub use error::InterpolationError;
pub use extrapolation::ExtrapolationMode;
pub use interpolator::{
    AkimaInterpolator, Interpolator, LinearInterpolator, NearestInterpolator, SlerpInterpolator,
};
pub use kernels::Kernel;
pub use rotation::Quaternion;
pub use value::{Scalar, SeriesValue};
