//! # spherical-voronoi
//!
//! Geometry kernel for Voronoi cells on the surface of the unit sphere.
//!
//! The crate provides the primitives a spherical Voronoi builder needs for a
//! single cell:
//!
//! - Cartesian [`Vector3`](geometry::vector::Vector3) and polar/azimuth
//!   [`SphereCoordinate`](geometry::coordinate::SphereCoordinate) forms of a
//!   point, with canonicalization of out-of-range angles
//! - [`GreatCircle`](geometry::great_circle::GreatCircle) construction,
//!   tangents, bisectors and intersection
//! - Bounded arcs ([`GreatCircleSegment`](geometry::segment::GreatCircleSegment))
//!   with midpoints and bounded intersection tests that work across the
//!   φ = ±π seam
//! - Closed corner rings ([`SpherePolygon`](core::polygon::SpherePolygon)) with
//!   interior angles, perimeter and spherical-excess area
//! - [`VoronoiCell`](core::cell::VoronoiCell), bounded either by one great
//!   circle or by a finalized ring, answering area and containment queries
//!
//! Building the full diagram for a set of sites (event ordering, incremental
//! cell construction) is left to callers.
//!
//! # Basic Usage
//!
//! ```rust
//! use spherical_voronoi::prelude::*;
//! use std::f64::consts::{FRAC_PI_2, PI};
//!
//! // A quarter of the sphere: north pole down to three equator points
//! let corners = [
//!     SphereCoordinate::new(0.0, 0.0),
//!     SphereCoordinate::new(FRAC_PI_2, 0.0),
//!     SphereCoordinate::new(FRAC_PI_2, FRAC_PI_2),
//!     SphereCoordinate::new(FRAC_PI_2, PI),
//! ];
//! let cell = VoronoiCell::from_corners(SphereCoordinate::new(1.0, FRAC_PI_2), &corners).unwrap();
//!
//! assert!((cell.area().unwrap() - PI).abs() < 1e-12);
//! assert_eq!(cell.classify(&corners[2]).unwrap(), Containment::Boundary);
//! assert!(cell.is_inside(&SphereCoordinate::new(0.5, 1.0)).unwrap());
//! ```
//!
//! # Coordinate convention
//!
//! θ is measured from the +y axis and φ around it starting at +z:
//! `x = sin θ sin φ`, `y = cos θ`, `z = sin θ cos φ`.
//!
//! # Tolerances
//!
//! Every comparison that needs an epsilon takes it from a
//! [`ToleranceConfig`](geometry::tolerance::ToleranceConfig). Plain methods use
//! the default preset; `*_with` variants accept a custom one.

// Forbid unsafe code throughout the entire crate
#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// Polygon rings and Voronoi cells built from the geometry primitives.
pub mod core {
    pub mod cell;
    pub mod collections;
    pub mod polygon;
    // Re-export the `core` modules.
    pub use cell::*;
    pub use polygon::*;
    // Note: collections module not re-exported here to avoid namespace pollution
}

/// Points, great circles and arcs on the unit sphere.
pub mod geometry {
    pub mod coordinate;
    pub mod great_circle;
    pub mod segment;
    pub mod tolerance;
    pub mod vector;
    pub use coordinate::*;
    pub use great_circle::*;
    pub use segment::*;
    pub use tolerance::*;
    pub use vector::*;
}

/// A prelude module that re-exports commonly used types.
pub mod prelude {
    pub use crate::core::{cell::*, polygon::*};
    pub use crate::geometry::{
        coordinate::*, great_circle::*, segment::*, tolerance::*, vector::*,
    };
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{
        core::{
            cell::{CellError, Containment, VoronoiCell},
            polygon::{PolygonError, SpherePolygon},
        },
        geometry::{
            coordinate::{CoordinateError, SphereCoordinate},
            great_circle::{GreatCircle, GreatCircleError},
            segment::GreatCircleSegment,
            tolerance::ToleranceConfig,
            vector::{Vector3, VectorError},
        },
        is_normal,
    };

    // =============================================================================
    // TYPE SAFETY TESTS
    // =============================================================================

    #[test]
    fn normal_types() {
        assert!(is_normal::<Vector3>());
        assert!(is_normal::<SphereCoordinate>());
        assert!(is_normal::<GreatCircle>());
        assert!(is_normal::<GreatCircleSegment>());
        assert!(is_normal::<SpherePolygon>());
        assert!(is_normal::<VoronoiCell>());
        assert!(is_normal::<Containment>());
        assert!(is_normal::<ToleranceConfig>());
    }

    #[test]
    fn normal_error_types() {
        assert!(is_normal::<VectorError>());
        assert!(is_normal::<CoordinateError>());
        assert!(is_normal::<GreatCircleError>());
        assert!(is_normal::<PolygonError>());
        assert!(is_normal::<CellError>());
    }

    // =============================================================================
    // PRELUDE TESTS
    // =============================================================================

    #[test]
    fn test_prelude_exports() {
        use crate::prelude::*;

        let start = SphereCoordinate::new(1.0, 0.0);
        let end = SphereCoordinate::new(1.0, 1.0);
        let segment = GreatCircleSegment::new(start, end).unwrap();
        let circle: &GreatCircle = segment.circle();
        assert!(circle.is_on_circle(&start));

        let config = config_presets::lenient();
        assert!(config.equality > ToleranceConfig::default().equality);
        assert_eq!(MIN_CELL_CORNERS, 3);
        assert_eq!(MIN_POLYGON_CORNERS, 2);
    }
}
