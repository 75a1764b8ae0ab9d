//! Nearest-neighbour kernel.

use super::Kernel;
use crate::error::InterpolationError;
use crate::serialization::{ByteReader, ByteWriter};
use crate::value::Scalar;

/// Returns the closer of the two bracketing values.
///
/// At an exact tie (`t == 0.5`) the first value is returned, or the mean of
/// both when `average_halves` is set (legacy behaviour).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nearest {
    /// Average both values at `t == 0.5`
    pub average_halves: bool,
}

impl Nearest {
    /// Kernel with the given tie rule.
    pub fn new(average_halves: bool) -> Self {
        Self { average_halves }
    }
}

impl<T: Scalar> Kernel<T> for Nearest {
    type Value = T;

    const NAME: &'static str = "NearestInterpolator";

    #[inline]
    fn interpolate_pair(&self, t: T, y1: &T, y2: &T) -> T {
        let half = T::from_f64_lossy(0.5);
        if t < half {
            *y1
        } else if t > half {
            *y2
        } else if self.average_halves {
            (*y1 + *y2) * half
        } else {
            *y1
        }
    }

    fn encode_options(&self, w: &mut ByteWriter) {
        w.write_u8(self.average_halves as u8);
    }

    fn decode_options(r: &mut ByteReader<'_>) -> Result<Self, InterpolationError> {
        match r.read_u8()? {
            0 => Ok(Self::new(false)),
            1 => Ok(Self::new(true)),
            other => Err(InterpolationError::decode(format!(
                "invalid nearest tie flag {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_closer_value() {
        let k = Nearest::default();
        assert_eq!(k.interpolate_pair(0.49_f64, &1.0, &2.0), 1.0);
        assert_eq!(k.interpolate_pair(0.51_f64, &1.0, &2.0), 2.0);
    }

    #[test]
    fn test_tie_returns_first_value() {
        assert_eq!(Nearest::default().interpolate_pair(0.5_f64, &1.0, &2.0), 1.0);
    }

    #[test]
    fn test_tie_averages_when_configured() {
        assert_eq!(Nearest::new(true).interpolate_pair(0.5_f64, &1.0, &2.0), 1.5);
    }

    #[test]
    fn test_factor_outside_unit_interval() {
        let k = Nearest::default();
        assert_eq!(k.interpolate_pair(-4.0_f64, &1.0, &2.0), 1.0);
        assert_eq!(k.interpolate_pair(9.0_f64, &1.0, &2.0), 2.0);
    }

    #[test]
    fn test_options_round_trip() {
        let mut w = ByteWriter::new();
        <Nearest as Kernel<f64>>::encode_options(&Nearest::new(true), &mut w);
        let bytes = w.into_bytes();
        let k = <Nearest as Kernel<f64>>::decode_options(&mut ByteReader::new(&bytes)).unwrap();
        assert!(k.average_halves);
    }

    #[test]
    fn test_invalid_option_byte() {
        let bytes = [5u8];
        let err = <Nearest as Kernel<f64>>::decode_options(&mut ByteReader::new(&bytes)).unwrap_err();
        assert!(matches!(err, InterpolationError::Decode(_)));
    }
}
