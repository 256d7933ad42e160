//! Voronoi cells on the unit sphere.
//!
//! A cell is owned by its center (the Voronoi site) and is bounded either by a
//! single great circle, the "first part" produced by bisecting the center
//! against one neighbor, or by a closed ring of corners once the cell has been
//! finalized.
//!
//! Membership follows one rule for both forms: a point is inside when the arc
//! from the center to the point does not cross the boundary. Points on the
//! boundary are reported separately by [`VoronoiCell::classify`].

#![forbid(unsafe_code)]

use std::f64::consts::PI;
use std::fmt;

use crate::core::polygon::{PolygonError, SpherePolygon};
use crate::geometry::coordinate::SphereCoordinate;
use crate::geometry::great_circle::{GreatCircle, GreatCircleError};
use crate::geometry::segment::GreatCircleSegment;
use crate::geometry::tolerance::ToleranceConfig;
use crate::geometry::vector::Vector3;

/// Fewest corners a finalized cell can have.
pub const MIN_CELL_CORNERS: usize = 3;

/// Errors that can occur when building or querying a cell.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum CellError {
    /// The operation needs a closed ring but the cell only has its first part.
    #[error("Cell is bounded by a single great circle and has no closed ring")]
    Unbounded,
    /// Too few corners for a finalized cell.
    #[error("Cell needs at least {minimum} corners, got {actual}")]
    InsufficientCorners {
        /// Number of corners supplied
        actual: usize,
        /// Required minimum
        minimum: usize,
    },
    /// The center lies on the boundary ring.
    #[error("Cell center {center} lies on its boundary")]
    CenterOnBoundary {
        /// The offending center
        center: SphereCoordinate,
    },
    /// The boundary ring does not wind around the center.
    #[error("Cell center {center} is not enclosed by its boundary (winding angle {winding})")]
    CenterNotInside {
        /// The offending center
        center: SphereCoordinate,
        /// Total signed angle the ring sweeps around the center
        winding: f64,
    },
    /// The center lies on the defining great circle.
    #[error("Cell center {center} lies on its defining great circle")]
    CenterOnCircle {
        /// The offending center
        center: SphereCoordinate,
    },
    /// The boundary ring could not be built.
    #[error("Invalid cell boundary: {0}")]
    Polygon(#[from] PolygonError),
    /// The center-to-point arc of a containment query is undefined.
    #[error("Containment query is degenerate: {0}")]
    DegenerateQuery(#[from] GreatCircleError),
}

/// Position of a point relative to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Containment {
    /// Strictly inside the cell
    Inside,
    /// On the boundary, within tolerance
    Boundary,
    /// Strictly outside the cell
    Outside,
}

impl fmt::Display for Containment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inside => write!(f, "INSIDE"),
            Self::Boundary => write!(f, "BOUNDARY"),
            Self::Outside => write!(f, "OUTSIDE"),
        }
    }
}

/// The boundary of a cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellBoundary {
    /// A single great circle; the cell is the hemisphere holding the center.
    Unbounded(GreatCircle),
    /// A finalized ring of corners.
    Closed(SpherePolygon),
}

/// A Voronoi cell: a center and the boundary enclosing it.
///
/// # Examples
///
/// ```
/// use spherical_voronoi::core::cell::{Containment, VoronoiCell};
/// use spherical_voronoi::geometry::coordinate::SphereCoordinate;
/// use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
///
/// let cell = VoronoiCell::from_corners(
///     SphereCoordinate::new(1.0, FRAC_PI_4),
///     &[
///         SphereCoordinate::new(0.0, 0.0),
///         SphereCoordinate::new(FRAC_PI_2, 0.0),
///         SphereCoordinate::new(FRAC_PI_2, FRAC_PI_2),
///     ],
/// )
/// .unwrap();
///
/// assert!((cell.area().unwrap() - FRAC_PI_2).abs() < 1e-12);
/// assert_eq!(
///     cell.classify(&SphereCoordinate::new(FRAC_PI_2, 0.0)).unwrap(),
///     Containment::Boundary
/// );
/// assert!(!cell.is_inside(&SphereCoordinate::new(2.0, 1.0)).unwrap());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiCell {
    center: SphereCoordinate,
    boundary: CellBoundary,
    config: ToleranceConfig,
}

impl VoronoiCell {
    /// Creates an unbounded cell from its first defining great circle.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::CenterOnCircle`] if the center lies on the circle,
    /// since neither side would then hold it.
    pub fn new(center: SphereCoordinate, first_part: GreatCircle) -> Result<Self, CellError> {
        Self::new_with(center, first_part, ToleranceConfig::default())
    }

    /// Like [`new`](Self::new) with explicit tolerances, kept for later queries.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn new_with(
        center: SphereCoordinate,
        first_part: GreatCircle,
        config: ToleranceConfig,
    ) -> Result<Self, CellError> {
        if first_part.is_on_circle_with(&center, &config) {
            return Err(CellError::CenterOnCircle { center });
        }
        tracing::debug!(%center, circle = %first_part, "created unbounded cell");
        Ok(Self {
            center,
            boundary: CellBoundary::Unbounded(first_part),
            config,
        })
    }

    /// Creates a finalized cell from its ordered boundary corners.
    ///
    /// # Errors
    ///
    /// - [`CellError::InsufficientCorners`] for fewer than
    ///   [`MIN_CELL_CORNERS`] corners
    /// - [`CellError::Polygon`] if consecutive corners coincide or are
    ///   antipodal
    /// - [`CellError::CenterOnBoundary`] if the center lies on an edge
    /// - [`CellError::CenterNotInside`] if the ring does not enclose the center
    pub fn from_corners(
        center: SphereCoordinate,
        corners: &[SphereCoordinate],
    ) -> Result<Self, CellError> {
        Self::from_corners_with(center, corners, ToleranceConfig::default())
    }

    /// Like [`from_corners`](Self::from_corners) with explicit tolerances,
    /// kept for later queries.
    ///
    /// # Errors
    ///
    /// See [`from_corners`](Self::from_corners).
    pub fn from_corners_with(
        center: SphereCoordinate,
        corners: &[SphereCoordinate],
        config: ToleranceConfig,
    ) -> Result<Self, CellError> {
        if corners.len() < MIN_CELL_CORNERS {
            return Err(CellError::InsufficientCorners {
                actual: corners.len(),
                minimum: MIN_CELL_CORNERS,
            });
        }

        let polygon = SpherePolygon::new_with(corners, &config)?;
        if polygon.on_boundary_with(&center, &config) {
            return Err(CellError::CenterOnBoundary { center });
        }

        let winding = winding_angle(&center, &polygon);
        // Enclosed centers sweep ±2π, others 0; π splits the two cleanly.
        if winding.abs() < PI {
            tracing::debug!(%center, winding, "rejecting cell whose ring misses its center");
            return Err(CellError::CenterNotInside { center, winding });
        }

        tracing::debug!(%center, corners = polygon.len(), "finalized cell");
        Ok(Self {
            center,
            boundary: CellBoundary::Closed(polygon),
            config,
        })
    }
}

impl VoronoiCell {
    /// The site that owns this cell.
    #[inline]
    #[must_use]
    pub const fn center(&self) -> &SphereCoordinate {
        &self.center
    }

    /// The cell's boundary in whichever form it currently has.
    #[inline]
    #[must_use]
    pub const fn boundary(&self) -> &CellBoundary {
        &self.boundary
    }

    /// The defining great circle of an unbounded cell.
    #[must_use]
    pub const fn first_part(&self) -> Option<&GreatCircle> {
        match &self.boundary {
            CellBoundary::Unbounded(circle) => Some(circle),
            CellBoundary::Closed(_) => None,
        }
    }

    /// The corner ring of a finalized cell.
    #[must_use]
    pub const fn polygon(&self) -> Option<&SpherePolygon> {
        match &self.boundary {
            CellBoundary::Unbounded(_) => None,
            CellBoundary::Closed(polygon) => Some(polygon),
        }
    }

    /// Whether the cell has a closed ring.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        matches!(self.boundary, CellBoundary::Closed(_))
    }

    /// The tolerances used by this cell's queries.
    #[must_use]
    pub const fn config(&self) -> &ToleranceConfig {
        &self.config
    }

    /// Enclosed area in steradians.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::Unbounded`] for a cell without a closed ring.
    pub fn area(&self) -> Result<f64, CellError> {
        self.polygon()
            .map(SpherePolygon::area)
            .ok_or(CellError::Unbounded)
    }

    /// Whether `point` lies strictly inside the cell.
    ///
    /// # Errors
    ///
    /// See [`classify`](Self::classify).
    pub fn is_inside(&self, point: &SphereCoordinate) -> Result<bool, CellError> {
        Ok(self.classify(point)? == Containment::Inside)
    }

    /// Locates `point` relative to the cell.
    ///
    /// Boundary points (including every corner) are reported as
    /// [`Containment::Boundary`]. Otherwise the point is inside when the arc
    /// from the center to it crosses no boundary edge, or, for an unbounded
    /// cell, does not cross the first part.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::DegenerateQuery`] for a finalized cell when
    /// `point` is the antipode of the center, since no unique arc joins them.
    pub fn classify(&self, point: &SphereCoordinate) -> Result<Containment, CellError> {
        let containment = match &self.boundary {
            CellBoundary::Unbounded(circle) => self.classify_against_circle(circle, point),
            CellBoundary::Closed(polygon) => self.classify_against_ring(polygon, point)?,
        };
        tracing::trace!(%point, %containment, "classified point against cell");
        Ok(containment)
    }

    fn classify_against_circle(
        &self,
        circle: &GreatCircle,
        point: &SphereCoordinate,
    ) -> Containment {
        if circle.is_on_circle_with(point, &self.config) {
            return Containment::Boundary;
        }
        if point.equals_with_tolerance(&self.center, self.config.equality) {
            return Containment::Inside;
        }
        let crosses = match GreatCircleSegment::new_with(self.center, *point, &self.config) {
            Ok(arc) => arc.intersects_circle_with(circle, &self.config).is_some(),
            // No unique arc to the antipode; it lies across the plane from the center.
            Err(_) => {
                let center_side = circle.side_of(&self.center.to_vector());
                let point_side = circle.side_of(&point.to_vector());
                (center_side > 0.0) != (point_side > 0.0)
            }
        };
        if crosses {
            Containment::Outside
        } else {
            Containment::Inside
        }
    }

    fn classify_against_ring(
        &self,
        polygon: &SpherePolygon,
        point: &SphereCoordinate,
    ) -> Result<Containment, CellError> {
        if polygon.on_boundary_with(point, &self.config) {
            return Ok(Containment::Boundary);
        }
        if point.equals_with_tolerance(&self.center, self.config.equality) {
            return Ok(Containment::Inside);
        }
        let probe = GreatCircleSegment::new_with(self.center, *point, &self.config)?;
        if polygon.crossed_by_with(&probe, &self.config) {
            Ok(Containment::Outside)
        } else {
            Ok(Containment::Inside)
        }
    }
}

impl fmt::Display for VoronoiCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.boundary {
            CellBoundary::Unbounded(circle) => {
                write!(f, "Cell at [{}] bounded by {circle}", self.center)
            }
            CellBoundary::Closed(polygon) => {
                write!(f, "Cell at [{}] with {} corners", self.center, polygon.len())
            }
        }
    }
}

/// Total signed angle swept around `center` while walking the ring.
///
/// Each edge contributes the angle between its endpoints as seen from the
/// center, projected onto the tangent plane there. The sum is ±2π when the
/// ring winds once around the center and 0 when it does not.
fn winding_angle(center: &SphereCoordinate, polygon: &SpherePolygon) -> f64 {
    let center = center.to_vector();
    polygon
        .edges()
        .iter()
        .map(|edge| {
            let a = edge.start().to_vector();
            let b = edge.end().to_vector();
            subtended_angle(&center, &a, &b)
        })
        .sum()
}

fn subtended_angle(center: &Vector3, a: &Vector3, b: &Vector3) -> f64 {
    let sine = center.dot(&a.cross(b));
    let cosine = a.dot(b) - a.dot(center) * b.dot(center);
    sine.atan2(cosine)
}
