//! Validated cross-match radius.

use std::fmt;

use crate::constants::DEFAULT_RADIUS_DEG;
use crate::errors::{BandMergeError, BandMergeResult};

/// A strictly positive, finite angular radius in degrees.
///
/// The comparison against it is inclusive: a separation exactly equal to the
/// radius counts as a match.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Radius(f64);

impl Radius {
    pub fn new(degrees: f64) -> BandMergeResult<Self> {
        if !degrees.is_finite() {
            return Err(BandMergeError::configuration(
                "radius",
                &format!("must be finite, got {}", degrees),
            ));
        }
        if degrees <= 0.0 {
            return Err(BandMergeError::configuration(
                "radius",
                &format!("must be strictly positive, got {}", degrees),
            ));
        }
        Ok(Self(degrees))
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Inclusive test of a separation against this radius.
    #[inline]
    pub fn contains(self, distance: f64) -> bool {
        distance <= self.0
    }
}

impl Default for Radius {
    fn default() -> Self {
        Self(DEFAULT_RADIUS_DEG)
    }
}

impl TryFrom<f64> for Radius {
    type Error = BandMergeError;

    fn try_from(degrees: f64) -> Result<Self, Self::Error> {
        Self::new(degrees)
    }
}

impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:e}°", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_and_negative() {
        assert!(Radius::new(0.0).is_err());
        assert!(Radius::new(-1e-4).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(Radius::new(f64::NAN).is_err());
        assert!(Radius::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let r = Radius::new(0.5).unwrap();
        assert!(r.contains(0.5));
        assert!(!r.contains(0.500_000_1));
    }

    #[test]
    fn test_default_is_three_arcsec() {
        let r = Radius::default();
        assert!((r.degrees() - 2.777_777_777_777_777_6e-4).abs() < 1e-15);
    }
}
