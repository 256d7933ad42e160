//! Cartesian vectors on and around the unit sphere.
//!
//! [`Vector3`] is the leaf algebraic primitive of the kernel. Points on the
//! sphere, great-circle normals, and tangent directions are all represented as
//! `Vector3` values; the unit-length invariant is established explicitly with
//! [`Vector3::normalize`], never by the raw constructor.
//!
//! # Equality Semantics
//!
//! `==` is exact, component-wise comparison using `OrderedFloat`, so vectors can
//! be hashed and used as map keys (NaN compares equal to itself). Geometric
//! equality goes through the explicitly named
//! [`Vector3::equals_with_tolerance`], which keeps the tolerance policy visible
//! at every call site.

#![forbid(unsafe_code)]

use nalgebra as na;
use ordered_float::OrderedFloat;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::geometry::tolerance::{DEFAULT_DEGENERACY_TOLERANCE, DEFAULT_EQUALITY_TOLERANCE};

/// Errors that can occur during vector validation and normalization.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum VectorError {
    /// The vector is too short to define a direction.
    #[error("Cannot normalize a vector of magnitude {magnitude:e}: zero-length direction")]
    ZeroLength {
        /// Magnitude of the offending vector
        magnitude: f64,
    },
    /// A component is NaN or infinite.
    #[error("Non-finite vector component at index {component_index}: {value}")]
    NonFinite {
        /// Index of the non-finite component (0 = x, 1 = y, 2 = z)
        component_index: usize,
        /// The offending value
        value: f64,
    },
}

/// A three-dimensional Cartesian vector.
///
/// # Examples
///
/// ```
/// use spherical_voronoi::geometry::vector::Vector3;
///
/// let x = Vector3::new(1.0, 0.0, 0.0);
/// let y = Vector3::new(0.0, 1.0, 0.0);
///
/// assert_eq!(x.dot(&y), 0.0);
/// assert_eq!(x.cross(&y), Vector3::new(0.0, 0.0, 1.0));
///
/// let unit = Vector3::new(3.0, 4.0, 0.0).normalize().unwrap();
/// assert!((unit.magnitude() - 1.0).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Vector3 {
    inner: na::Vector3<f64>,
}

// =============================================================================
// CONSTRUCTION AND ACCESS
// =============================================================================

impl Vector3 {
    /// Creates a vector from its components. No normalization is applied.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            inner: na::Vector3::new(x, y, z),
        }
    }

    /// The zero vector.
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// The x component.
    #[inline]
    #[must_use]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    /// The y component. This is the polar ("up") axis of the sphere.
    #[inline]
    #[must_use]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    /// The z component.
    #[inline]
    #[must_use]
    pub fn z(&self) -> f64 {
        self.inner.z
    }

    /// Returns the components as an array `[x, y, z]`.
    #[inline]
    #[must_use]
    pub fn to_array(&self) -> [f64; 3] {
        [self.inner.x, self.inner.y, self.inner.z]
    }

    /// Checks that every component is finite.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::NonFinite`] for the first NaN or infinite component.
    pub fn validate(&self) -> Result<(), VectorError> {
        for (component_index, value) in self.to_array().into_iter().enumerate() {
            if !value.is_finite() {
                return Err(VectorError::NonFinite {
                    component_index,
                    value,
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// ALGEBRA
// =============================================================================

impl Vector3 {
    /// Dot product.
    #[inline]
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.inner.dot(&other.inner)
    }

    /// Cross product `self × other` (right-handed).
    #[inline]
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            inner: self.inner.cross(&other.inner),
        }
    }

    /// The vector pointing the opposite way. For a point on the sphere this is
    /// its antipode.
    #[inline]
    #[must_use]
    pub fn negate(&self) -> Self {
        Self { inner: -self.inner }
    }

    /// Component-wise difference `self - other`.
    #[inline]
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        Self {
            inner: self.inner - other.inner,
        }
    }

    /// Component-wise sum `self + other`.
    #[inline]
    #[must_use]
    pub fn plus(&self, other: &Self) -> Self {
        Self {
            inner: self.inner + other.inner,
        }
    }

    /// Multiplies every component by `factor`.
    #[inline]
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            inner: self.inner * factor,
        }
    }

    /// Euclidean length.
    #[inline]
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.inner.norm()
    }

    /// Euclidean distance between the tips of two vectors.
    #[inline]
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.inner - other.inner).norm()
    }

    /// Angle between two directions in `[0, π]`.
    ///
    /// Computed as `atan2(|a × b|, a · b)`, which stays accurate for nearly
    /// parallel and nearly antiparallel vectors where `acos` loses precision.
    #[must_use]
    pub fn angle_between(&self, other: &Self) -> f64 {
        self.cross(other).magnitude().atan2(self.dot(other))
    }

    /// Returns the unit vector pointing in the same direction.
    ///
    /// Already-unit vectors are returned unchanged, so normalization is
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::ZeroLength`] if the magnitude is below
    /// [`DEFAULT_DEGENERACY_TOLERANCE`] and [`VectorError::NonFinite`] for
    /// NaN or infinite components.
    pub fn normalize(&self) -> Result<Self, VectorError> {
        self.normalize_with(DEFAULT_DEGENERACY_TOLERANCE)
    }

    /// Like [`normalize`](Self::normalize) with an explicit zero-length threshold.
    ///
    /// # Errors
    ///
    /// See [`normalize`](Self::normalize).
    pub fn normalize_with(&self, min_magnitude: f64) -> Result<Self, VectorError> {
        self.validate()?;
        let magnitude = self.magnitude();
        if magnitude <= min_magnitude {
            return Err(VectorError::ZeroLength { magnitude });
        }
        if (magnitude - 1.0).abs() <= f64::EPSILON {
            return Ok(*self);
        }
        Ok(self.scale(magnitude.recip()))
    }

    /// Whether the magnitude is 1 within `tolerance`.
    #[inline]
    #[must_use]
    pub fn is_unit(&self, tolerance: f64) -> bool {
        (self.magnitude() - 1.0).abs() <= tolerance
    }

    /// Geometric equality: the Euclidean distance between the vectors is
    /// strictly below `tolerance`.
    #[inline]
    #[must_use]
    pub fn equals_with_tolerance(&self, other: &Self, tolerance: f64) -> bool {
        self.distance(other) < tolerance
    }

    /// [`equals_with_tolerance`](Self::equals_with_tolerance) using
    /// [`DEFAULT_EQUALITY_TOLERANCE`].
    #[inline]
    #[must_use]
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.equals_with_tolerance(other, DEFAULT_EQUALITY_TOLERANCE)
    }
}

// =============================================================================
// STANDARD TRAIT IMPLEMENTATIONS
// =============================================================================

impl PartialEq for Vector3 {
    fn eq(&self, other: &Self) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .all(|(a, b)| OrderedFloat(*a) == OrderedFloat(*b))
    }
}

impl Eq for Vector3 {}

impl Hash for Vector3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for component in self.to_array() {
            OrderedFloat(component).hash(state);
        }
    }
}

impl From<[f64; 3]> for Vector3 {
    #[inline]
    fn from(components: [f64; 3]) -> Self {
        Self::new(components[0], components[1], components[2])
    }
}

impl From<Vector3> for [f64; 3] {
    #[inline]
    fn from(vector: Vector3) -> Self {
        vector.to_array()
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x(), self.y(), self.z())
    }
}
