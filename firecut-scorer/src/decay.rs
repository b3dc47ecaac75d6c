//! Piecewise-linear distance decay shared by the proximity factors.

use thiserror::Error;

/// Errors returned by [`DecayProfile::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecayError {
    /// A radius was NaN or infinite.
    #[error("decay radii must be finite, got near {near} and far {far}")]
    NonFinite {
        /// Inner radius.
        near: f64,
        /// Outer radius.
        far: f64,
    },
    /// The inner radius was zero or negative.
    #[error("near radius must be positive, got {near}")]
    NonPositiveNear {
        /// Inner radius.
        near: f64,
    },
    /// The outer radius did not exceed the inner one.
    #[error("far radius {far} must exceed near radius {near}")]
    FarNotBeyondNear {
        /// Inner radius.
        near: f64,
        /// Outer radius.
        far: f64,
    },
}

/// Two-band decay of a hazard's influence with distance, in metres.
///
/// A touching feature contributes its full magnitude. Inside `near` the
/// contribution falls linearly from the full magnitude towards zero; between
/// `near` and `far` it falls linearly from half the magnitude to zero. Beyond
/// `far` nothing is contributed.
///
/// # Examples
/// ```
/// use firecut_scorer::DecayProfile;
///
/// let egress = DecayProfile::EGRESS;
/// assert_eq!(egress.contribution(10.0, 25.0, false), 5.0);
/// assert_eq!(egress.contribution(10.0, 100.0, false), 2.5);
/// assert_eq!(egress.contribution(10.0, 150.0, false), 0.0);
/// assert_eq!(egress.contribution(10.0, 0.0, true), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayProfile {
    near: f64,
    far: f64,
}

impl DecayProfile {
    /// Decay used for community features.
    pub const COMMUNITY: Self = Self {
        near: 100.0,
        far: 300.0,
    };

    /// Decay used for egress routes.
    pub const EGRESS: Self = Self {
        near: 50.0,
        far: 150.0,
    };

    /// Decay used for electric utility infrastructure.
    pub const UTILITY: Self = Self {
        near: 30.0,
        far: 100.0,
    };

    /// Validate and construct a profile.
    ///
    /// # Errors
    /// Returns [`DecayError`] when either radius is non-finite, `near` is not
    /// positive, or `far` does not exceed `near`.
    pub fn new(near: f64, far: f64) -> Result<Self, DecayError> {
        if !near.is_finite() || !far.is_finite() {
            return Err(DecayError::NonFinite { near, far });
        }
        if near <= 0.0 {
            return Err(DecayError::NonPositiveNear { near });
        }
        if far <= near {
            return Err(DecayError::FarNotBeyondNear { near, far });
        }
        Ok(Self { near, far })
    }

    /// Inner radius.
    #[must_use]
    pub const fn near(&self) -> f64 {
        self.near
    }

    /// Outer radius; features at or beyond it contribute nothing.
    #[must_use]
    pub const fn far(&self) -> f64 {
        self.far
    }

    /// Contribution of a feature of `magnitude` at `distance` from a cell.
    #[expect(
        clippy::float_arithmetic,
        reason = "decay is a piecewise-linear function of distance"
    )]
    #[must_use]
    pub fn contribution(&self, magnitude: f64, distance: f64, touching: bool) -> f64 {
        if touching || distance <= 0.0 {
            magnitude
        } else if distance < self.near {
            magnitude * (1.0 - distance / self.near)
        } else if distance < self.far {
            magnitude * 0.5 * (1.0 - (distance - self.near) / (self.far - self.near))
        } else {
            0.0
        }
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point scores within a tolerance"
)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-9;

    #[rstest]
    #[case::touching(0.0, true, 10.0)]
    #[case::zero_distance(0.0, false, 10.0)]
    #[case::inner_band(75.0, false, 2.5)]
    #[case::outer_band_start(100.0, false, 5.0)]
    #[case::outer_band(200.0, false, 2.5)]
    #[case::at_far(300.0, false, 0.0)]
    #[case::beyond(1_000.0, false, 0.0)]
    fn community_profile(#[case] distance: f64, #[case] touching: bool, #[case] expected: f64) {
        let contribution = DecayProfile::COMMUNITY.contribution(10.0, distance, touching);
        assert!((contribution - expected).abs() < TOLERANCE, "got {contribution}");
    }

    #[rstest]
    fn utility_profile_scales_by_base_priority() {
        let contribution = DecayProfile::UTILITY.contribution(8.0, 15.0, false);
        assert!((contribution - 4.0).abs() < TOLERANCE);
    }

    #[rstest]
    fn constants_pass_validation() {
        for profile in [
            DecayProfile::COMMUNITY,
            DecayProfile::EGRESS,
            DecayProfile::UTILITY,
        ] {
            assert_eq!(DecayProfile::new(profile.near(), profile.far()), Ok(profile));
        }
    }

    #[rstest]
    #[case(0.0, 10.0)]
    #[case(-5.0, 10.0)]
    fn rejects_non_positive_near(#[case] near: f64, #[case] far: f64) {
        assert!(matches!(
            DecayProfile::new(near, far),
            Err(DecayError::NonPositiveNear { .. })
        ));
    }

    #[rstest]
    #[case(50.0, 50.0)]
    #[case(50.0, 20.0)]
    fn rejects_far_inside_near(#[case] near: f64, #[case] far: f64) {
        assert!(matches!(
            DecayProfile::new(near, far),
            Err(DecayError::FarNotBeyondNear { .. })
        ));
    }

    #[rstest]
    fn rejects_non_finite_radii() {
        assert!(matches!(
            DecayProfile::new(10.0, f64::INFINITY),
            Err(DecayError::NonFinite { .. })
        ));
    }
}
