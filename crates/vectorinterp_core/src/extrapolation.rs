//! Extrapolation policy for queries outside the stored domain.

use crate::error::InterpolationError;
use std::fmt;
use std::str::FromStr;

/// Behaviour of an interpolator when a query falls outside `[min(X), max(X)]`.
///
/// # Variants
///
/// - `Extrapolate`: evaluate the kernel with the boundary bracket (factor outside `[0, 1]`)
/// - `Fail`: return [`InterpolationError::OutOfRange`]
/// - `Nearest`: return the value at the nearest domain endpoint
///
/// # Example
///
/// ```
/// use vectorinterp_core::ExtrapolationMode;
///
/// let mode: ExtrapolationMode = "nearest".parse().unwrap();
/// assert_eq!(mode, ExtrapolationMode::Nearest);
/// assert_eq!(mode.as_str(), "nearest");
/// assert_eq!(ExtrapolationMode::default(), ExtrapolationMode::Extrapolate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExtrapolationMode {
    /// Continue the kernel formula past the boundary
    #[default]
    Extrapolate,
    /// Reject out-of-domain queries
    Fail,
    /// Clamp to the nearest boundary value
    Nearest,
}

impl ExtrapolationMode {
    /// All modes, in wire-code order.
    pub const ALL: [ExtrapolationMode; 3] = [
        ExtrapolationMode::Extrapolate,
        ExtrapolationMode::Fail,
        ExtrapolationMode::Nearest,
    ];

    /// Return the lowercase name of the mode.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtrapolationMode::Extrapolate => "extrapolate",
            ExtrapolationMode::Fail => "fail",
            ExtrapolationMode::Nearest => "nearest",
        }
    }

    /// Single byte code used in the binary layout.
    #[inline]
    pub fn to_code(self) -> u8 {
        match self {
            ExtrapolationMode::Extrapolate => 0,
            ExtrapolationMode::Fail => 1,
            ExtrapolationMode::Nearest => 2,
        }
    }

    /// Inverse of [`ExtrapolationMode::to_code`].
    pub fn from_code(code: u8) -> Result<Self, InterpolationError> {
        match code {
            0 => Ok(ExtrapolationMode::Extrapolate),
            1 => Ok(ExtrapolationMode::Fail),
            2 => Ok(ExtrapolationMode::Nearest),
            other => Err(InterpolationError::decode(format!(
                "unknown extrapolation mode code {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ExtrapolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExtrapolationMode {
    type Err = InterpolationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "extrapolate" => Ok(ExtrapolationMode::Extrapolate),
            "fail" => Ok(ExtrapolationMode::Fail),
            "nearest" => Ok(ExtrapolationMode::Nearest),
            other => Err(InterpolationError::invalid_argument(format!(
                "unknown extrapolation mode '{}'. Valid values: extrapolate, fail, nearest",
                other
            ))),
        }
    }
}
