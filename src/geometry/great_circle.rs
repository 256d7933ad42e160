//! Great circles on the unit sphere.
//!
//! A [`GreatCircle`] is the intersection of the sphere with a plane through the
//! origin. It is identified by the unit normal of that plane, its *definition
//! vector*. The normal also carries an orientation: the circle built from
//! `(a, b)` and the one built from `(b, a)` cover the same points but have
//! opposite normals, and they compare unequal. Use
//! [`GreatCircle::equals_with_tolerance`] together with
//! [`GreatCircle::opposite`] when orientation should be ignored.

#![forbid(unsafe_code)]

use std::fmt;

use crate::geometry::coordinate::SphereCoordinate;
use crate::geometry::segment::GreatCircleSegment;
use crate::geometry::tolerance::ToleranceConfig;
use crate::geometry::vector::{Vector3, VectorError};

/// Errors that can occur when constructing or querying great circles.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum GreatCircleError {
    /// Both defining points are the same point.
    #[error("Coincident points do not define a great circle: {point}")]
    CoincidentPoints {
        /// The repeated point
        point: Vector3,
    },
    /// The defining points are antipodal, so infinitely many circles pass through both.
    #[error("Antipodal points do not define a unique great circle: {start} and {end}")]
    AntipodalPoints {
        /// First defining point
        start: Vector3,
        /// Second defining point
        end: Vector3,
    },
    /// The normal vector could not be normalized.
    #[error("Degenerate great circle normal: {source}")]
    DegenerateNormal {
        /// Underlying normalization failure
        #[source]
        source: VectorError,
    },
    /// A tangent or direction vector could not be normalized.
    #[error("Degenerate tangent direction: {source}")]
    DegenerateDirection {
        /// Underlying normalization failure
        #[source]
        source: VectorError,
    },
}

/// A great circle, identified by the unit normal of its plane.
///
/// # Examples
///
/// ```
/// use spherical_voronoi::geometry::coordinate::SphereCoordinate;
/// use spherical_voronoi::geometry::great_circle::GreatCircle;
/// use std::f64::consts::FRAC_PI_2;
///
/// // The equator, traced from φ = 0 towards φ = π/2
/// let equator = GreatCircle::from_coordinates(
///     &SphereCoordinate::new(FRAC_PI_2, 0.0),
///     &SphereCoordinate::new(FRAC_PI_2, FRAC_PI_2),
/// )
/// .unwrap();
///
/// assert!(equator.is_on_circle(&SphereCoordinate::new(FRAC_PI_2, 2.0)));
/// assert!(!equator.is_on_circle(&SphereCoordinate::new(0.3, 2.0)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GreatCircle {
    definition: Vector3,
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

impl GreatCircle {
    /// Creates the great circle through two points, oriented from `start`
    /// towards `end`.
    ///
    /// # Errors
    ///
    /// Returns [`GreatCircleError::CoincidentPoints`] or
    /// [`GreatCircleError::AntipodalPoints`] when the points do not determine a
    /// unique circle.
    pub fn from_points(start: &Vector3, end: &Vector3) -> Result<Self, GreatCircleError> {
        Self::from_points_with(start, end, &ToleranceConfig::default())
    }

    /// Like [`from_points`](Self::from_points) with explicit tolerances.
    ///
    /// # Errors
    ///
    /// See [`from_points`](Self::from_points).
    pub fn from_points_with(
        start: &Vector3,
        end: &Vector3,
        config: &ToleranceConfig,
    ) -> Result<Self, GreatCircleError> {
        if start.equals_with_tolerance(end, config.equality) {
            return Err(GreatCircleError::CoincidentPoints { point: *start });
        }
        if start.equals_with_tolerance(&end.negate(), config.equality) {
            return Err(GreatCircleError::AntipodalPoints {
                start: *start,
                end: *end,
            });
        }
        let definition = start
            .cross(end)
            .normalize_with(config.degeneracy)
            .map_err(|source| GreatCircleError::DegenerateNormal { source })?;
        Ok(Self { definition })
    }

    /// Creates the great circle through two spherical coordinates.
    ///
    /// # Errors
    ///
    /// See [`from_points`](Self::from_points).
    pub fn from_coordinates(
        start: &SphereCoordinate,
        end: &SphereCoordinate,
    ) -> Result<Self, GreatCircleError> {
        Self::from_points(&start.to_vector(), &end.to_vector())
    }

    /// The great circle that a segment lies on.
    #[inline]
    #[must_use]
    pub const fn from_segment(segment: &GreatCircleSegment) -> Self {
        *segment.circle()
    }

    /// Creates a great circle directly from its plane normal. The normal is
    /// normalized; its length is irrelevant.
    ///
    /// # Errors
    ///
    /// Returns [`GreatCircleError::DegenerateNormal`] for a zero or
    /// non-finite normal.
    pub fn from_normal(normal: &Vector3) -> Result<Self, GreatCircleError> {
        let definition = normal
            .normalize()
            .map_err(|source| GreatCircleError::DegenerateNormal { source })?;
        Ok(Self { definition })
    }

    /// The perpendicular bisector of two sites: every point on it is equally
    /// far from `near` and `far`.
    ///
    /// The normal points towards `near`, so `near` lies on the positive side
    /// (see [`side_of`](Self::side_of)).
    ///
    /// # Errors
    ///
    /// Returns [`GreatCircleError::CoincidentPoints`] if the sites coincide.
    pub fn bisector(
        near: &SphereCoordinate,
        far: &SphereCoordinate,
    ) -> Result<Self, GreatCircleError> {
        let near = near.to_vector();
        let far = far.to_vector();
        if near.approx_eq(&far) {
            return Err(GreatCircleError::CoincidentPoints { point: near });
        }
        Self::from_normal(&near.subtract(&far))
    }
}

// =============================================================================
// QUERIES
// =============================================================================

impl GreatCircle {
    /// The unit normal of the circle's plane.
    #[inline]
    #[must_use]
    pub const fn normal(&self) -> Vector3 {
        self.definition
    }

    /// The same circle traversed in the opposite direction.
    #[inline]
    #[must_use]
    pub fn opposite(&self) -> Self {
        Self {
            definition: self.definition.negate(),
        }
    }

    /// Signed distance-like measure of a point from the circle's plane:
    /// positive on the side the normal points to.
    #[inline]
    #[must_use]
    pub fn side_of(&self, point: &Vector3) -> f64 {
        self.definition.dot(point)
    }

    /// One of the two unit tangents of the circle at `point`; the other is its
    /// negation.
    ///
    /// # Errors
    ///
    /// Returns [`GreatCircleError::DegenerateDirection`] if `point` is a pole
    /// of the circle, where no tangent exists.
    pub fn tangent_at(&self, point: &Vector3) -> Result<Vector3, GreatCircleError> {
        self.definition
            .cross(point)
            .normalize()
            .map_err(|source| GreatCircleError::DegenerateDirection { source })
    }

    /// The tangent at `point` selected by `direction`.
    ///
    /// Of the two tangent candidates, the one whose dot product with the unit
    /// vector from `point` towards `direction` is *smaller* is returned. Corner
    /// angles are measured between two tangents chosen by the same rule, so
    /// the convention cancels out there.
    ///
    /// # Errors
    ///
    /// Returns [`GreatCircleError::DegenerateDirection`] if `point` is a pole
    /// of the circle or if `direction` coincides with `point`.
    pub fn tangent_toward(
        &self,
        point: &Vector3,
        direction: &Vector3,
    ) -> Result<Vector3, GreatCircleError> {
        let tangent = self.tangent_at(point)?;
        let other_tangent = tangent.negate();
        let intended = direction
            .subtract(point)
            .normalize()
            .map_err(|source| GreatCircleError::DegenerateDirection { source })?;

        if tangent.dot(&intended) < other_tangent.dot(&intended) {
            Ok(tangent)
        } else {
            Ok(other_tangent)
        }
    }

    /// One intersection point of two great circles; the other is its antipode.
    ///
    /// Returns `None` when the circles are equal. Circles whose normals are
    /// parallel within tolerance (the same circle, possibly traced the other
    /// way) have no unique intersection and also return `None`.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> Option<Vector3> {
        self.intersects_with(other, &ToleranceConfig::default())
    }

    /// Like [`intersects`](Self::intersects) with explicit tolerances.
    #[must_use]
    pub fn intersects_with(&self, other: &Self, config: &ToleranceConfig) -> Option<Vector3> {
        if self == other {
            return None;
        }
        match self
            .definition
            .cross(&other.definition)
            .normalize_with(config.degeneracy)
        {
            Ok(point) => Some(point),
            Err(err) => {
                tracing::trace!("great circles {self} and {other} share their plane: {err}");
                None
            }
        }
    }

    /// Whether a coordinate lies on the circle (`|normal · point| ≤ ε`).
    #[inline]
    #[must_use]
    pub fn is_on_circle(&self, coordinate: &SphereCoordinate) -> bool {
        self.is_on_circle_with(coordinate, &ToleranceConfig::default())
    }

    /// Like [`is_on_circle`](Self::is_on_circle) with explicit tolerances.
    #[inline]
    #[must_use]
    pub fn is_on_circle_with(
        &self,
        coordinate: &SphereCoordinate,
        config: &ToleranceConfig,
    ) -> bool {
        coordinate.dot_vector(&self.definition).abs() <= config.on_circle
    }

    /// Orientation-sensitive geometric equality of the definition vectors.
    #[inline]
    #[must_use]
    pub fn equals_with_tolerance(&self, other: &Self, tolerance: f64) -> bool {
        self.definition
            .equals_with_tolerance(&other.definition, tolerance)
    }
}

impl fmt::Display for GreatCircle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Great Circle: {}", self.definition)
    }
}
