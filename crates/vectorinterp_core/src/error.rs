//! Error types for structured error handling.
//!
//! This module provides [`InterpolationError`], the single error type returned
//! by construction, mutation, query and (de)serialisation operations.

use thiserror::Error;

/// Categorised interpolation errors.
///
/// # Variants
/// - `InvalidArgument`: malformed construction or mutation input
/// - `DomainError`: mutation violates ordering relative to existing data
/// - `OutOfRange`: query outside the domain while extrapolation mode is `Fail`
/// - `VersionMismatch`: serialised class/version tag does not match
/// - `Decode`: truncated or malformed byte buffer
///
/// # Examples
/// ```
/// use vectorinterp_core::InterpolationError;
///
/// let err = InterpolationError::OutOfRange { x: 13.0, min: -10.0, max: 12.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// Invalid input data or parameters.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Mutation conflicts with the data already held by the interpolator.
    #[error("Domain error: {0}")]
    DomainError(String),

    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfRange {
        /// The query point that was out of range
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Class name / version tag mismatch while decoding.
    #[error("ClassName/Version mismatch: expected {expected}, got {found}")]
    VersionMismatch {
        /// Tag this build writes and expects
        expected: String,
        /// Tag read from the buffer
        found: String,
    },

    /// Byte buffer could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl InterpolationError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a domain error
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::DomainError(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
