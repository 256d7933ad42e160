//! Bounded arcs of great circles.
//!
//! A [`GreatCircleSegment`] is the shorter arc between two points that are
//! neither coincident nor antipodal. Arc membership is decided in Cartesian
//! form, so arcs that cross the φ = ±π seam (or pass over a pole) need no
//! special casing: a point `p` on the circle lies on the arc from `a` to `b`
//! exactly when `(a × p) · n ≥ 0`, `(p × b) · n ≥ 0`, and `p` is on the same
//! hemisphere as the arc's midpoint.

#![forbid(unsafe_code)]

use std::fmt;

use crate::geometry::coordinate::SphereCoordinate;
use crate::geometry::great_circle::{GreatCircle, GreatCircleError};
use crate::geometry::tolerance::ToleranceConfig;
use crate::geometry::vector::Vector3;

/// The shorter arc of a great circle between two points.
///
/// # Examples
///
/// ```
/// use spherical_voronoi::geometry::coordinate::SphereCoordinate;
/// use spherical_voronoi::geometry::segment::GreatCircleSegment;
/// use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
///
/// // An equatorial arc crossing φ = 0, and a meridian arc through φ = 0
/// let arc1 = GreatCircleSegment::new(
///     SphereCoordinate::new(FRAC_PI_2, 1.75 * PI),
///     SphereCoordinate::new(FRAC_PI_2, FRAC_PI_4),
/// )
/// .unwrap();
/// let arc2 = GreatCircleSegment::new(
///     SphereCoordinate::new(FRAC_PI_4, 0.0),
///     SphereCoordinate::new(0.75 * PI, 0.0),
/// )
/// .unwrap();
///
/// let crossing = arc1.intersects(&arc2).unwrap();
/// assert_eq!(crossing, SphereCoordinate::new(FRAC_PI_2, 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GreatCircleSegment {
    start: SphereCoordinate,
    end: SphereCoordinate,
    circle: GreatCircle,
}

impl GreatCircleSegment {
    /// Creates the arc from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Returns [`GreatCircleError::CoincidentPoints`] or
    /// [`GreatCircleError::AntipodalPoints`] when the endpoints do not
    /// determine a unique circle.
    pub fn new(start: SphereCoordinate, end: SphereCoordinate) -> Result<Self, GreatCircleError> {
        Self::new_with(start, end, &ToleranceConfig::default())
    }

    /// Like [`new`](Self::new) with explicit tolerances.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn new_with(
        start: SphereCoordinate,
        end: SphereCoordinate,
        config: &ToleranceConfig,
    ) -> Result<Self, GreatCircleError> {
        let circle = GreatCircle::from_points_with(&start.to_vector(), &end.to_vector(), config)?;
        Ok(Self { start, end, circle })
    }

    /// The first endpoint.
    #[inline]
    #[must_use]
    pub const fn start(&self) -> &SphereCoordinate {
        &self.start
    }

    /// The second endpoint.
    #[inline]
    #[must_use]
    pub const fn end(&self) -> &SphereCoordinate {
        &self.end
    }

    /// The great circle the arc lies on, oriented from start to end.
    #[inline]
    #[must_use]
    pub const fn circle(&self) -> &GreatCircle {
        &self.circle
    }

    /// The same arc traversed from end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            circle: self.circle.opposite(),
        }
    }

    /// Arc length (central angle) in radians, in `(0, π)`.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.angular_distance(&self.end)
    }

    /// Unit tangent at the start point, pointing along the arc towards the end.
    #[must_use]
    pub fn tangent_at_start(&self) -> Vector3 {
        self.circle.normal().cross(&self.start.to_vector())
    }

    /// The point on the arc equally far from both endpoints.
    #[must_use]
    pub fn midpoint(&self) -> SphereCoordinate {
        SphereCoordinate::from_unit_vector(&self.midpoint_vector())
    }

    fn midpoint_vector(&self) -> Vector3 {
        let (sin_half, cos_half) = (self.length() / 2.0).sin_cos();
        self.start
            .to_vector()
            .scale(cos_half)
            .plus(&self.tangent_at_start().scale(sin_half))
    }

    /// Whether a point lies on the arc, endpoints included.
    #[must_use]
    pub fn contains(&self, point: &SphereCoordinate) -> bool {
        self.contains_with(point, &ToleranceConfig::default())
    }

    /// Like [`contains`](Self::contains) with explicit tolerances.
    #[must_use]
    pub fn contains_with(&self, point: &SphereCoordinate, config: &ToleranceConfig) -> bool {
        self.circle.is_on_circle_with(point, config)
            && self.within_bounds(&point.to_vector(), config)
    }

    /// Arc-bound test for a point already known to be on the circle.
    fn within_bounds(&self, point: &Vector3, config: &ToleranceConfig) -> bool {
        let normal = self.circle.normal();
        let start = self.start.to_vector();
        let end = self.end.to_vector();

        let past_start = start.cross(point).dot(&normal) >= -config.on_circle;
        let before_end = point.cross(&end).dot(&normal) >= -config.on_circle;
        let same_side = point.dot(&self.midpoint_vector()) > 0.0;

        past_start && before_end && same_side
    }

    /// The point where two arcs cross, if they do.
    ///
    /// The underlying circles meet in two antipodal points; each is checked
    /// against the bounds of both arcs. Arcs on the same circle never report
    /// an intersection.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> Option<SphereCoordinate> {
        self.intersects_with(other, &ToleranceConfig::default())
    }

    /// Like [`intersects`](Self::intersects) with explicit tolerances.
    #[must_use]
    pub fn intersects_with(
        &self,
        other: &Self,
        config: &ToleranceConfig,
    ) -> Option<SphereCoordinate> {
        let candidate = self.circle.intersects_with(&other.circle, config)?;
        let hit = [candidate, candidate.negate()].into_iter().find(|point| {
            self.within_bounds(point, config) && other.within_bounds(point, config)
        });
        tracing::trace!(
            segment = %self,
            other = %other,
            hit = hit.is_some(),
            "segment intersection test"
        );
        hit.map(|point| SphereCoordinate::from_unit_vector(&point))
    }

    /// The point where this arc crosses a full great circle, if it does.
    #[must_use]
    pub fn intersects_circle(&self, circle: &GreatCircle) -> Option<SphereCoordinate> {
        self.intersects_circle_with(circle, &ToleranceConfig::default())
    }

    /// Like [`intersects_circle`](Self::intersects_circle) with explicit tolerances.
    #[must_use]
    pub fn intersects_circle_with(
        &self,
        circle: &GreatCircle,
        config: &ToleranceConfig,
    ) -> Option<SphereCoordinate> {
        let candidate = self.circle.intersects_with(circle, config)?;
        [candidate, candidate.negate()]
            .into_iter()
            .find(|point| self.within_bounds(point, config))
            .map(|point| SphereCoordinate::from_unit_vector(&point))
    }
}

impl fmt::Display for GreatCircleSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Segment: [{}] -> [{}]", self.start, self.end)
    }
}
