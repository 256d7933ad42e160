//! Spherical coordinates on the unit sphere.
//!
//! A [`SphereCoordinate`] stores a polar angle θ (colatitude, measured from the
//! "up" axis) and an azimuth φ. The axis convention is fixed throughout the
//! kernel:
//!
//! ```text
//! x = sin θ · sin φ
//! y = cos θ          (polar axis)
//! z = sin θ · cos φ  (φ = 0 points "forward")
//! ```
//!
//! Stored angles are always canonical: θ ∈ [0, π] and φ ∈ [−π, π]. Out-of-range
//! input is folded by a full round trip through [`Vector3`] rather than a
//! modulo, because folding θ past a pole also rotates φ by π.
//!
//! Angle pairs are not a unique key (θ = 0 with any φ is the same pole, and
//! φ = ±π is the same meridian), so equality is defined on the Cartesian form
//! with a tolerance.

#![forbid(unsafe_code)]

use std::f64::consts::PI;
use std::fmt;

use crate::geometry::tolerance::DEFAULT_EQUALITY_TOLERANCE;
use crate::geometry::vector::{Vector3, VectorError};

/// Errors that can occur when creating or validating spherical coordinates.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum CoordinateError {
    /// An angle is NaN or infinite.
    #[error("Non-finite {name} angle: {value}")]
    NonFiniteAngle {
        /// Which angle is invalid (`"polar"` or `"azimuth"`)
        name: &'static str,
        /// The offending value
        value: f64,
    },
    /// The Cartesian input has no direction.
    #[error("Cannot convert vector to a spherical coordinate: {0}")]
    Vector(#[from] VectorError),
}

/// A point on the unit sphere in polar/azimuth form.
///
/// # Examples
///
/// ```
/// use spherical_voronoi::geometry::coordinate::SphereCoordinate;
/// use std::f64::consts::PI;
///
/// // θ = 3π folds back onto the south pole
/// let folded = SphereCoordinate::new(3.0 * PI, 0.0);
/// assert_eq!(folded, SphereCoordinate::new(PI, 0.0));
/// assert!(folded.theta() >= 0.0 && folded.theta() <= PI);
///
/// // θ = 4π is the north pole, whatever φ says
/// assert_eq!(SphereCoordinate::new(4.0 * PI, 0.0), SphereCoordinate::new(0.0, PI));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SphereCoordinate {
    theta: f64,
    phi: f64,
}

impl SphereCoordinate {
    /// Creates a coordinate, canonicalizing angles that fall outside
    /// θ ∈ [0, π], φ ∈ [−π, π].
    ///
    /// Non-finite angles are stored unchanged; use
    /// [`validate`](Self::validate) to reject them.
    #[must_use]
    pub fn new(theta: f64, phi: f64) -> Self {
        let coordinate = Self { theta, phi };
        if Self::is_canonical(theta, phi) || !(theta.is_finite() && phi.is_finite()) {
            return coordinate;
        }
        Self::from_unit_vector(&coordinate.to_vector())
    }

    /// Creates a coordinate from Cartesian components.
    ///
    /// The vector does not need to be unit length; only its direction is used.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::Vector`] if the vector is (near) zero or has
    /// non-finite components.
    pub fn from_vector(vector: &Vector3) -> Result<Self, CoordinateError> {
        let unit = vector.normalize()?;
        Ok(Self::from_unit_vector(&unit))
    }

    /// The polar angle θ in `[0, π]`.
    #[inline]
    #[must_use]
    pub const fn theta(&self) -> f64 {
        self.theta
    }

    /// The azimuth φ in `[−π, π]`.
    #[inline]
    #[must_use]
    pub const fn phi(&self) -> f64 {
        self.phi
    }

    /// Converts to a unit Cartesian vector.
    #[must_use]
    pub fn to_vector(&self) -> Vector3 {
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        Vector3::new(sin_theta * sin_phi, cos_theta, sin_theta * cos_phi)
    }

    /// Dot product with a Cartesian vector.
    #[inline]
    #[must_use]
    pub fn dot_vector(&self, vector: &Vector3) -> f64 {
        self.to_vector().dot(vector)
    }

    /// Dot product of the two points' Cartesian forms (the cosine of the
    /// central angle between them).
    #[inline]
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.to_vector().dot(&other.to_vector())
    }

    /// Central angle between two points, in `[0, π]`.
    #[must_use]
    pub fn angular_distance(&self, other: &Self) -> f64 {
        self.to_vector().angle_between(&other.to_vector())
    }

    /// The antipodal point.
    #[must_use]
    pub fn antipode(&self) -> Self {
        Self::from_unit_vector(&self.to_vector().negate())
    }

    /// Geometric equality with an explicit tolerance on the Cartesian distance.
    #[inline]
    #[must_use]
    pub fn equals_with_tolerance(&self, other: &Self, tolerance: f64) -> bool {
        self.to_vector()
            .equals_with_tolerance(&other.to_vector(), tolerance)
    }

    /// Checks that both angles are finite.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::NonFiniteAngle`] naming the first bad angle.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.theta.is_finite() {
            return Err(CoordinateError::NonFiniteAngle {
                name: "polar",
                value: self.theta,
            });
        }
        if !self.phi.is_finite() {
            return Err(CoordinateError::NonFiniteAngle {
                name: "azimuth",
                value: self.phi,
            });
        }
        Ok(())
    }

    fn is_canonical(theta: f64, phi: f64) -> bool {
        (0.0..=PI).contains(&theta) && (-PI..=PI).contains(&phi)
    }

    /// Angles of a vector already known to be (nearly) unit length.
    ///
    /// θ comes from `atan2` rather than `acos(y)`, which loses precision near
    /// the poles and needs its argument clamped into `[-1, 1]`.
    pub(crate) fn from_unit_vector(unit: &Vector3) -> Self {
        let radial = unit.x().hypot(unit.z());
        let theta = radial.atan2(unit.y());
        let phi = unit.x().atan2(unit.z());
        Self { theta, phi }
    }
}

impl Vector3 {
    /// Cartesian form of a spherical coordinate.
    #[inline]
    #[must_use]
    pub fn from_coordinate(coordinate: &SphereCoordinate) -> Self {
        coordinate.to_vector()
    }

    /// Spherical form of this direction.
    ///
    /// # Errors
    ///
    /// See [`SphereCoordinate::from_vector`].
    pub fn to_coordinate(&self) -> Result<SphereCoordinate, CoordinateError> {
        SphereCoordinate::from_vector(self)
    }
}

// =============================================================================
// STANDARD TRAIT IMPLEMENTATIONS
// =============================================================================

impl PartialEq for SphereCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.equals_with_tolerance(other, DEFAULT_EQUALITY_TOLERANCE)
    }
}

impl From<SphereCoordinate> for Vector3 {
    #[inline]
    fn from(coordinate: SphereCoordinate) -> Self {
        coordinate.to_vector()
    }
}

impl TryFrom<Vector3> for SphereCoordinate {
    type Error = CoordinateError;

    fn try_from(vector: Vector3) -> Result<Self, Self::Error> {
        Self::from_vector(&vector)
    }
}

impl fmt::Display for SphereCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Spherical: {}/{}", self.theta, self.phi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_to_vector_axis_convention() {
        let north = SphereCoordinate::new(0.0, 0.0).to_vector();
        assert_abs_diff_eq!(north.y(), 1.0, epsilon = 1e-15);

        let forward = SphereCoordinate::new(FRAC_PI_2, 0.0).to_vector();
        assert_abs_diff_eq!(forward.x(), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(forward.y(), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(forward.z(), 1.0, epsilon = 1e-15);

        let right = SphereCoordinate::new(FRAC_PI_2, FRAC_PI_2).to_vector();
        assert_abs_diff_eq!(right.x(), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(right.z(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_from_vector() {
        let coordinate = SphereCoordinate::from_vector(&Vector3::new(0.0, 0.0, 2.0)).unwrap();
        assert_relative_eq!(coordinate.theta(), FRAC_PI_2);
        assert_relative_eq!(coordinate.phi(), 0.0);

        let coordinate = SphereCoordinate::from_vector(&Vector3::new(1.0, 1.0, 0.0)).unwrap();
        assert_relative_eq!(coordinate.theta(), FRAC_PI_4, epsilon = 1e-15);
        assert_relative_eq!(coordinate.phi(), FRAC_PI_2);
    }

    #[test]
    fn test_from_zero_vector_fails() {
        let result = SphereCoordinate::from_vector(&Vector3::zero());
        assert!(matches!(
            result,
            Err(CoordinateError::Vector(VectorError::ZeroLength { .. }))
        ));
        assert!(Vector3::zero().to_coordinate().is_err());
    }

    #[test]
    fn test_in_range_angles_are_stored_as_given() {
        let coordinate = SphereCoordinate::new(1.0, -2.0);
        assert_eq!(coordinate.theta(), 1.0);
        assert_eq!(coordinate.phi(), -2.0);
    }

    #[test]
    fn test_handles_greater_theta() {
        let folded_once = SphereCoordinate::new(3.0 * PI, 0.0);
        let folded_twice = SphereCoordinate::new(4.0 * PI, 0.0);

        assert_eq!(folded_once, SphereCoordinate::new(PI, 0.0));
        assert_eq!(folded_twice, SphereCoordinate::new(0.0, PI));
    }

    #[test]
    fn test_handles_smaller_theta() {
        let folded_once = SphereCoordinate::new(-PI, 0.0);
        let folded_twice = SphereCoordinate::new(-2.0 * PI, 0.0);

        assert_eq!(folded_once, SphereCoordinate::new(PI, 0.0));
        assert_eq!(folded_twice, SphereCoordinate::new(0.0, PI));
    }

    #[test]
    fn test_theta_past_pole_shifts_azimuth() {
        // Going 0.25π past the north pole lands on the opposite meridian
        let coordinate = SphereCoordinate::new(-FRAC_PI_4, 0.0);
        assert_relative_eq!(coordinate.theta(), FRAC_PI_4, epsilon = 1e-15);
        assert_relative_eq!(coordinate.phi().abs(), PI, epsilon = 1e-15);
    }

    #[test]
    fn test_azimuth_wraps_into_range() {
        let coordinate = SphereCoordinate::new(FRAC_PI_2, 1.75 * PI);
        assert_relative_eq!(coordinate.theta(), FRAC_PI_2, epsilon = 1e-15);
        assert_relative_eq!(coordinate.phi(), -FRAC_PI_4, epsilon = 1e-15);
    }

    #[test]
    fn test_dot_conveniences() {
        let a = SphereCoordinate::new(FRAC_PI_2, 0.0);
        let b = SphereCoordinate::new(FRAC_PI_2, FRAC_PI_2);
        assert_abs_diff_eq!(a.dot(&b), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(a.dot(&a), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(
            a.dot_vector(&Vector3::new(0.0, 0.0, 1.0)),
            1.0,
            epsilon = 1e-15
        );
        assert_relative_eq!(a.angular_distance(&b), FRAC_PI_2, epsilon = 1e-15);
    }

    #[test]
    fn test_antipode() {
        let point = SphereCoordinate::new(FRAC_PI_4, FRAC_PI_4);
        let antipode = point.antipode();
        assert_relative_eq!(antipode.theta(), 3.0 * FRAC_PI_4, epsilon = 1e-15);
        assert_relative_eq!(point.angular_distance(&antipode), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_validate() {
        assert!(SphereCoordinate::new(0.5, 0.5).validate().is_ok());
        assert!(matches!(
            SphereCoordinate::new(f64::NAN, 0.0).validate(),
            Err(CoordinateError::NonFiniteAngle { name: "polar", .. })
        ));
        assert!(matches!(
            SphereCoordinate::new(0.0, f64::INFINITY).validate(),
            Err(CoordinateError::NonFiniteAngle {
                name: "azimuth",
                ..
            })
        ));
    }

    #[test]
    fn test_conversions_between_types() {
        let coordinate = SphereCoordinate::new(1.2, -0.7);
        let vector: Vector3 = coordinate.into();
        assert_eq!(vector, Vector3::from_coordinate(&coordinate));
        let back = SphereCoordinate::try_from(vector).unwrap();
        assert_eq!(back, coordinate);
        assert_relative_eq!(back.theta(), 1.2, epsilon = 1e-12);
        assert_relative_eq!(back.phi(), -0.7, epsilon = 1e-12);
    }

    #[test]
    fn test_display() {
        let coordinate = SphereCoordinate::new(0.5, 0.25);
        assert_eq!(format!("{coordinate}"), "Spherical: 0.5/0.25");
    }
}
