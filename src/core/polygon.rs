//! Closed rings of corners on the unit sphere.
//!
//! A [`SpherePolygon`] stores its corners in an index-addressed arena: each
//! node knows the indices of its successor and predecessor, and the edge
//! leaving each corner is built once at construction. Corners are handed out
//! as lightweight [`Corner`] views borrowing the ring, so neighbor queries
//! never need shared ownership.
//!
//! Interior angles are measured between the tangents of the two edges meeting
//! at a corner, and the area follows from the spherical excess:
//!
//! ```text
//! area = Σ interior_angle − (n − 2)·π
//! ```
//!
//! The ring is taken in the order given; whether it is simple is up to the
//! caller.

#![forbid(unsafe_code)]

use std::f64::consts::PI;
use std::fmt;
use std::iter::FusedIterator;

use crate::core::collections::CornerBuffer;
use crate::geometry::coordinate::SphereCoordinate;
use crate::geometry::great_circle::GreatCircleError;
use crate::geometry::segment::GreatCircleSegment;
use crate::geometry::tolerance::ToleranceConfig;

/// Fewest corners a ring can have. Two corners make a degenerate "lune" of
/// zero area.
pub const MIN_POLYGON_CORNERS: usize = 2;

/// Errors that can occur while building a polygon ring.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum PolygonError {
    /// Too few corners to close a ring.
    #[error("Polygon needs at least {minimum} corners, got {actual}")]
    InsufficientCorners {
        /// Number of corners supplied
        actual: usize,
        /// Required minimum
        minimum: usize,
    },
    /// Two consecutive corners do not determine an edge.
    #[error("Edge {index} of the polygon is degenerate: {source}")]
    DegenerateEdge {
        /// Index of the corner the edge leaves from
        index: usize,
        /// Why the edge could not be built
        #[source]
        source: GreatCircleError,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct CornerNode {
    point: SphereCoordinate,
    next: usize,
    prev: usize,
}

/// A closed ring of corners joined by great-circle arcs.
///
/// # Examples
///
/// ```
/// use spherical_voronoi::core::polygon::SpherePolygon;
/// use spherical_voronoi::geometry::coordinate::SphereCoordinate;
/// use std::f64::consts::{FRAC_PI_2, PI};
///
/// // One octant of the sphere
/// let octant = SpherePolygon::new(&[
///     SphereCoordinate::new(0.0, 0.0),
///     SphereCoordinate::new(FRAC_PI_2, 0.0),
///     SphereCoordinate::new(FRAC_PI_2, FRAC_PI_2),
/// ])
/// .unwrap();
///
/// assert_eq!(octant.len(), 3);
/// assert!((octant.area() - PI / 2.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SpherePolygon {
    nodes: CornerBuffer<CornerNode>,
    /// `edges[i]` runs from corner `i` to its successor.
    edges: CornerBuffer<GreatCircleSegment>,
}

// Rings always hold at least MIN_POLYGON_CORNERS corners.
#[allow(clippy::len_without_is_empty)]
impl SpherePolygon {
    /// Builds a ring through `points` in the given order, closing it from the
    /// last point back to the first.
    ///
    /// # Errors
    ///
    /// Returns [`PolygonError::InsufficientCorners`] for fewer than
    /// [`MIN_POLYGON_CORNERS`] points and [`PolygonError::DegenerateEdge`]
    /// when two consecutive points coincide or are antipodal.
    pub fn new(points: &[SphereCoordinate]) -> Result<Self, PolygonError> {
        Self::new_with(points, &ToleranceConfig::default())
    }

    /// Like [`new`](Self::new) with explicit tolerances.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn new_with(
        points: &[SphereCoordinate],
        config: &ToleranceConfig,
    ) -> Result<Self, PolygonError> {
        let count = points.len();
        if count < MIN_POLYGON_CORNERS {
            return Err(PolygonError::InsufficientCorners {
                actual: count,
                minimum: MIN_POLYGON_CORNERS,
            });
        }

        let nodes: CornerBuffer<CornerNode> = points
            .iter()
            .enumerate()
            .map(|(index, &point)| CornerNode {
                point,
                next: (index + 1) % count,
                prev: (index + count - 1) % count,
            })
            .collect();

        let edges = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                GreatCircleSegment::new_with(node.point, nodes[node.next].point, config)
                    .map_err(|source| PolygonError::DegenerateEdge { index, source })
            })
            .collect::<Result<CornerBuffer<_>, _>>()?;

        tracing::debug!(corners = count, "built spherical polygon ring");
        Ok(Self { nodes, edges })
    }

    /// Number of corners.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the ring has too few corners to enclose any area.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.len() < 3
    }

    /// The corner at `index`, in construction order.
    #[must_use]
    pub fn corner(&self, index: usize) -> Option<Corner<'_>> {
        (index < self.len()).then_some(Corner {
            polygon: self,
            index,
        })
    }

    /// Walks the ring once along the `next` links, starting at corner 0.
    ///
    /// The iterator is `Clone`, so a traversal can be restarted or forked.
    #[must_use]
    pub fn corners(&self) -> Corners<'_> {
        Corners {
            polygon: self,
            current: 0,
            remaining: self.len(),
        }
    }

    /// The boundary arcs; edge `i` leaves corner `i`.
    #[must_use]
    pub fn edges(&self) -> &[GreatCircleSegment] {
        &self.edges
    }

    /// Interior angle at every corner, in traversal order.
    pub fn interior_angles(&self) -> impl Iterator<Item = f64> + '_ {
        self.corners().map(|corner| corner.interior_angle())
    }

    /// Enclosed area on the unit sphere (spherical excess), in steradians.
    #[must_use]
    pub fn area(&self) -> f64 {
        let angle_sum: f64 = self.interior_angles().sum();
        #[allow(clippy::cast_precision_loss)]
        let flat_sum = (self.len() as f64 - 2.0) * PI;
        angle_sum - flat_sum
    }

    /// Total length of the boundary arcs, in radians.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.edges.iter().map(GreatCircleSegment::length).sum()
    }

    /// Whether `point` lies on one of the boundary arcs.
    #[must_use]
    pub fn on_boundary_with(&self, point: &SphereCoordinate, config: &ToleranceConfig) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.contains_with(point, config))
    }

    /// Whether any boundary arc crosses or touches `segment`.
    #[must_use]
    pub fn crossed_by_with(
        &self,
        segment: &GreatCircleSegment,
        config: &ToleranceConfig,
    ) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.intersects_with(segment, config).is_some())
    }
}

impl fmt::Display for SpherePolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon [")?;
        for (position, corner) in self.corners().enumerate() {
            if position > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", corner.point())?;
        }
        write!(f, "]")
    }
}

// =============================================================================
// CORNER VIEWS
// =============================================================================

/// A borrowed view of one corner in a [`SpherePolygon`].
#[derive(Clone, Copy, Debug)]
pub struct Corner<'a> {
    polygon: &'a SpherePolygon,
    index: usize,
}

impl<'a> Corner<'a> {
    fn node(&self) -> &'a CornerNode {
        &self.polygon.nodes[self.index]
    }

    /// Position of the corner in construction order.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The corner's location.
    #[must_use]
    pub fn point(&self) -> &'a SphereCoordinate {
        &self.node().point
    }

    /// The following corner.
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            polygon: self.polygon,
            index: self.node().next,
        }
    }

    /// The preceding corner.
    #[must_use]
    pub fn previous(&self) -> Self {
        Self {
            polygon: self.polygon,
            index: self.node().prev,
        }
    }

    /// The edge from this corner to the next one.
    #[must_use]
    pub fn to_next(&self) -> &'a GreatCircleSegment {
        &self.polygon.edges[self.index]
    }

    /// The edge from this corner to the previous one.
    #[must_use]
    pub fn to_previous(&self) -> GreatCircleSegment {
        self.polygon.edges[self.node().prev].reversed()
    }

    /// Angle between the two edges meeting here, in `[0, π]`.
    ///
    /// Measured between the edge tangents at this corner, each pointing along
    /// its edge towards the neighbor. Flipping both tangents, as
    /// [`GreatCircle::tangent_toward`] does, leaves the angle unchanged.
    ///
    /// [`GreatCircle::tangent_toward`]: crate::geometry::great_circle::GreatCircle::tangent_toward
    #[must_use]
    pub fn interior_angle(&self) -> f64 {
        let toward_next = self.to_next().tangent_at_start();
        let toward_previous = self.to_previous().tangent_at_start();
        toward_previous.angle_between(&toward_next)
    }
}

impl fmt::Display for Corner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Corner {}: {}", self.index, self.point())
    }
}

/// Iterator over the corners of a ring, following `next` links.
#[derive(Clone, Debug)]
pub struct Corners<'a> {
    polygon: &'a SpherePolygon,
    current: usize,
    remaining: usize,
}

impl<'a> Iterator for Corners<'a> {
    type Item = Corner<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let corner = Corner {
            polygon: self.polygon,
            index: self.current,
        };
        self.current = corner.node().next;
        self.remaining -= 1;
        Some(corner)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Corners<'_> {}

impl FusedIterator for Corners<'_> {}
