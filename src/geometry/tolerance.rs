//! Numerical tolerance configuration for spherical predicates.
//!
//! Every equality, on-circle, and degeneracy decision in the kernel is made
//! against an explicit epsilon rather than exact floating-point comparison.
//! Values inside the epsilon are treated as equal; this is a policy, not an
//! error condition. The epsilons are collected in [`ToleranceConfig`] so the
//! policy stays visible wherever it is applied.

#![forbid(unsafe_code)]

/// Default epsilon for vector equality (Euclidean distance between two vectors).
pub const DEFAULT_EQUALITY_TOLERANCE: f64 = 1e-10;

/// Default epsilon for on-circle and arc-bound tests (absolute dot product).
pub const DEFAULT_ON_CIRCLE_TOLERANCE: f64 = 1e-10;

/// Default minimum magnitude below which a vector is considered zero.
pub const DEFAULT_DEGENERACY_TOLERANCE: f64 = 1e-12;

/// Tolerance configuration for spherical geometry predicates.
///
/// # Examples
///
/// ```
/// use spherical_voronoi::geometry::tolerance::{ToleranceConfig, ToleranceConfigBuilder};
///
/// let config = ToleranceConfigBuilder::default()
///     .equality(1e-8)
///     .build()
///     .unwrap();
/// assert_eq!(config.equality, 1e-8);
/// assert_eq!(config.on_circle, ToleranceConfig::default().on_circle);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct ToleranceConfig {
    /// Maximum Euclidean distance at which two vectors are considered equal
    pub equality: f64,
    /// Maximum absolute dot product at which a point is considered on a circle
    pub on_circle: f64,
    /// Magnitude below which a vector is treated as the zero vector
    pub degeneracy: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        config_presets::standard()
    }
}

impl ToleranceConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        let fields = [
            ("equality", self.equality),
            ("on_circle", self.on_circle),
            ("degeneracy", self.degeneracy),
        ];
        for (name, value) in fields {
            if let Some(value) = value
                && !(value.is_finite() && value >= 0.0)
            {
                return Err(format!(
                    "{name} tolerance must be finite and non-negative, got {value}"
                ));
            }
        }
        Ok(())
    }
}

/// Preset tolerance configurations.
pub mod config_presets {
    use super::{
        DEFAULT_DEGENERACY_TOLERANCE, DEFAULT_EQUALITY_TOLERANCE, DEFAULT_ON_CIRCLE_TOLERANCE,
        ToleranceConfig,
    };

    /// Configuration used by every operation that does not take an explicit one.
    #[must_use]
    pub const fn standard() -> ToleranceConfig {
        ToleranceConfig {
            equality: DEFAULT_EQUALITY_TOLERANCE,
            on_circle: DEFAULT_ON_CIRCLE_TOLERANCE,
            degeneracy: DEFAULT_DEGENERACY_TOLERANCE,
        }
    }

    /// Stricter tolerances for well-separated input.
    #[must_use]
    pub const fn high_precision() -> ToleranceConfig {
        ToleranceConfig {
            equality: DEFAULT_EQUALITY_TOLERANCE / 100.0,
            on_circle: DEFAULT_ON_CIRCLE_TOLERANCE / 100.0,
            degeneracy: DEFAULT_DEGENERACY_TOLERANCE / 100.0,
        }
    }

    /// Looser tolerances for input that has been through lossy conversions
    /// (e.g. degrees printed with a handful of decimals).
    #[must_use]
    pub const fn lenient() -> ToleranceConfig {
        ToleranceConfig {
            equality: 1e-7,
            on_circle: 1e-7,
            degeneracy: 1e-9,
        }
    }
}
