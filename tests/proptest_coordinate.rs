//! Property-based tests for vectors and spherical coordinates.
//!
//! This module uses proptest to verify:
//! - Vector/coordinate round trips over the canonical ranges
//! - Canonicalization idempotence and range guarantees
//! - Equality of angles differing by full turns
//! - Hash consistency of equal vectors
//! - Normalization idempotence

use approx::assert_relative_eq;
use proptest::prelude::*;
use rustc_hash::FxHasher;
use spherical_voronoi::geometry::coordinate::SphereCoordinate;
use spherical_voronoi::geometry::vector::Vector3;
use std::f64::consts::{PI, TAU};
use std::hash::{Hash, Hasher};

// =============================================================================
// TEST CONFIGURATION
// =============================================================================

/// Strategy for canonical polar angles
fn polar() -> impl Strategy<Value = f64> {
    0.0..=PI
}

/// Strategy for canonical azimuths
fn azimuth() -> impl Strategy<Value = f64> {
    -PI..=PI
}

/// Strategy for arbitrary finite angles, well outside the canonical ranges
fn wide_angle() -> impl Strategy<Value = f64> {
    -20.0..20.0
}

/// Strategy for vectors that are safely away from zero length
fn nonzero_vector() -> impl Strategy<Value = Vector3> {
    prop::array::uniform3(-100.0..100.0)
        .prop_map(Vector3::from)
        .prop_filter("must not be near zero", |v: &Vector3| v.magnitude() > 1e-3)
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

// =============================================================================
// ROUND TRIP TESTS
// =============================================================================

proptest! {
    /// Property: converting to Cartesian form and back recovers the coordinate.
    #[test]
    fn prop_vector_round_trip(theta in polar(), phi in azimuth()) {
        let coordinate = SphereCoordinate::new(theta, phi);
        let back = SphereCoordinate::from_vector(&coordinate.to_vector()).unwrap();

        prop_assert_eq!(back, coordinate);
        prop_assert!((back.theta() - theta).abs() < 1e-7);
        // Azimuth is meaningless at the poles and ±π name the same meridian
        if theta.sin() > 1e-6 && phi.abs() < PI - 1e-9 {
            prop_assert!((back.phi() - phi).abs() < 1e-7);
        }
    }

    /// Property: scaling a vector does not change the coordinate it maps to.
    #[test]
    fn prop_from_vector_ignores_magnitude(vector in nonzero_vector(), factor in 0.01..100.0f64) {
        let direct = SphereCoordinate::from_vector(&vector).unwrap();
        let scaled = SphereCoordinate::from_vector(&vector.scale(factor)).unwrap();
        prop_assert_eq!(direct, scaled);
    }

    /// Property: the Cartesian form of any coordinate is a unit vector.
    #[test]
    fn prop_to_vector_is_unit(theta in wide_angle(), phi in wide_angle()) {
        let vector = SphereCoordinate::new(theta, phi).to_vector();
        assert_relative_eq!(vector.magnitude(), 1.0, epsilon = 1e-12);
    }
}

// =============================================================================
// CANONICALIZATION TESTS
// =============================================================================

proptest! {
    /// Property: stored angles always lie in the canonical ranges.
    #[test]
    fn prop_canonical_ranges(theta in wide_angle(), phi in wide_angle()) {
        let coordinate = SphereCoordinate::new(theta, phi);
        prop_assert!((0.0..=PI).contains(&coordinate.theta()));
        prop_assert!((-PI..=PI).contains(&coordinate.phi()));
    }

    /// Property: canonicalizing an already canonical coordinate is the identity.
    #[test]
    fn prop_canonicalization_idempotent(theta in wide_angle(), phi in wide_angle()) {
        let once = SphereCoordinate::new(theta, phi);
        let twice = SphereCoordinate::new(once.theta(), once.phi());
        prop_assert_eq!(twice.theta(), once.theta());
        prop_assert_eq!(twice.phi(), once.phi());
    }

    /// Property: canonicalization preserves the point on the sphere.
    #[test]
    fn prop_canonicalization_preserves_point(theta in wide_angle(), phi in wide_angle()) {
        let raw_point = {
            let (sin_theta, cos_theta) = theta.sin_cos();
            let (sin_phi, cos_phi) = phi.sin_cos();
            Vector3::new(sin_theta * sin_phi, cos_theta, sin_theta * cos_phi)
        };
        let canonical = SphereCoordinate::new(theta, phi).to_vector();
        prop_assert!(canonical.equals_with_tolerance(&raw_point, 1e-12));
    }

    /// Property: whole turns of either angle leave the point unchanged.
    #[test]
    fn prop_full_turns_are_equal(
        theta in polar(),
        phi in azimuth(),
        polar_turns in -3i32..=3,
        azimuth_turns in -3i32..=3,
    ) {
        let base = SphereCoordinate::new(theta, phi);
        let turned = SphereCoordinate::new(
            theta + f64::from(polar_turns) * TAU,
            phi + f64::from(azimuth_turns) * TAU,
        );
        prop_assert_eq!(turned, base);
    }

    /// Property: antipodes are π apart and involutive.
    #[test]
    fn prop_antipode(theta in polar(), phi in azimuth()) {
        let coordinate = SphereCoordinate::new(theta, phi);
        let antipode = coordinate.antipode();
        assert_relative_eq!(coordinate.angular_distance(&antipode), PI, epsilon = 1e-9);
        prop_assert_eq!(antipode.antipode(), coordinate);
    }
}

// =============================================================================
// VECTOR PROPERTIES
// =============================================================================

proptest! {
    /// Property: equal vectors must have equal hashes.
    #[test]
    fn prop_equal_vectors_equal_hashes(components in prop::array::uniform3(-1000.0..1000.0f64)) {
        let first = Vector3::from(components);
        let second = Vector3::new(components[0], components[1], components[2]);
        prop_assert_eq!(first, second);
        prop_assert_eq!(hash_of(&first), hash_of(&second));
    }

    /// Property: normalization is idempotent.
    #[test]
    fn prop_normalize_idempotent(vector in nonzero_vector()) {
        let unit = vector.normalize().unwrap();
        prop_assert!(unit.is_unit(1e-12));
        prop_assert_eq!(unit.normalize().unwrap(), unit);
    }

    /// Property: the cross product is perpendicular to both factors.
    #[test]
    fn prop_cross_is_perpendicular(a in nonzero_vector(), b in nonzero_vector()) {
        let a = a.normalize().unwrap();
        let b = b.normalize().unwrap();
        let normal = a.cross(&b);
        prop_assert!(normal.dot(&a).abs() < 1e-12);
        prop_assert!(normal.dot(&b).abs() < 1e-12);
    }
}
