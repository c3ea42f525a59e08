// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel tolerances and budgets

use crate::collision::gjk::DEFAULT_MAX_ITER;
use crate::collision::ray::{MIN_T, PARALLEL_EPSILON};
use crate::curve::bezier::DEFAULT_MAX_SUBDIVISIONS;
use crate::curve::bspline::KNOT_EPSILON;
use crate::curve::nurbs::WEIGHT_EPSILON;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Numeric tolerances and work budgets shared by every kernel operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Signed-distance band treated as "on plane" during BSP classification
    pub plane_epsilon: f64,
    /// Knot intervals shorter than this are degenerate
    pub knot_epsilon: f64,
    /// Rational weights with magnitude below this are rejected
    pub weight_epsilon: f64,
    /// Maximum BSP depth before polygons are stored unsplit.
    ///
    /// A convex solid chains one node per face plane, so this must exceed the
    /// face count of any mesh that should combine exactly.
    pub bsp_max_depth: usize,
    /// Bounding-box size at which Bezier subdivision reports a hit
    pub bezier_tolerance: f64,
    /// Maximum Bezier subdivision depth per branch
    pub bezier_max_iter: usize,
    /// Total Bezier box pairs examined per query
    pub bezier_max_subdivisions: usize,
    /// GJK iteration cap
    pub gjk_max_iter: usize,
    /// Determinant threshold for ray/triangle parallelism
    pub ray_parallel_epsilon: f64,
    /// Hits at or below this ray parameter are ignored
    pub ray_min_t: f64,
    /// Decimal places used when welding reconstructed vertices
    pub weld_decimals: u32,
    /// Turn degraded results (depth cap, open edges) into errors
    pub fail_on_degraded: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            plane_epsilon: 1e-6,
            knot_epsilon: KNOT_EPSILON,
            weight_epsilon: WEIGHT_EPSILON,
            bsp_max_depth: 100_000,
            bezier_tolerance: 1e-6,
            bezier_max_iter: 50,
            bezier_max_subdivisions: DEFAULT_MAX_SUBDIVISIONS,
            gjk_max_iter: DEFAULT_MAX_ITER,
            ray_parallel_epsilon: PARALLEL_EPSILON,
            ray_min_t: MIN_T,
            weld_decimals: 6,
            fail_on_degraded: false,
        }
    }
}

impl KernelConfig {
    /// Parse configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: KernelConfig =
            toml::from_str(content).context("Failed to parse kernel config")?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize kernel config")
    }

    /// Check that every tolerance is positive and every budget non-zero
    pub fn validate(&self) -> Result<()> {
        let tolerances = [
            ("plane_epsilon", self.plane_epsilon),
            ("knot_epsilon", self.knot_epsilon),
            ("weight_epsilon", self.weight_epsilon),
            ("bezier_tolerance", self.bezier_tolerance),
            ("ray_parallel_epsilon", self.ray_parallel_epsilon),
            ("ray_min_t", self.ray_min_t),
        ];
        for (name, value) in tolerances {
            if !(value.is_finite() && value > 0.0) {
                bail!("{} must be a positive finite number, got {}", name, value);
            }
        }

        let budgets = [
            ("bsp_max_depth", self.bsp_max_depth),
            ("bezier_max_iter", self.bezier_max_iter),
            ("bezier_max_subdivisions", self.bezier_max_subdivisions),
            ("gjk_max_iter", self.gjk_max_iter),
        ];
        for (name, value) in budgets {
            if value == 0 {
                bail!("{} must be greater than zero", name);
            }
        }

        if self.weld_decimals > 12 {
            bail!("weld_decimals must be at most 12, got {}", self.weld_decimals);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = KernelConfig::from_toml_str("gjk_max_iter = 100\nfail_on_degraded = true").unwrap();
        assert_eq!(config.gjk_max_iter, 100);
        assert!(config.fail_on_degraded);
        assert_eq!(config.plane_epsilon, 1e-6);
        assert_eq!(config.bsp_max_depth, 100_000);
    }

    #[test]
    fn test_defaults_match_free_functions() {
        use crate::collision::ray_triangle;
        use crate::curve::{evaluate_nurbs_curve, WeightedPoint};
        use crate::Kernel;
        use nalgebra::{Point3, Vector3};

        let kernel = Kernel::new();
        let v0 = Point3::new(0.0, 0.0, 0.0);
        let v1 = Point3::new(1.0, 0.0, 0.0);
        let v2 = Point3::new(0.0, 1.0, 0.0);
        // Ray starting a hair in front of the triangle plane, inside MIN_T
        let origin = Point3::new(0.2, 0.2, 0.5e-9);
        let direction = -Vector3::z();
        assert!(ray_triangle(&origin, &direction, &v0, &v1, &v2).is_none());
        assert_eq!(
            kernel.ray_triangle(&origin, &direction, &v0, &v1, &v2),
            ray_triangle(&origin, &direction, &v0, &v1, &v2)
        );

        let config = KernelConfig::default();
        let tiny = config.weight_epsilon / 2.0;
        let control = [
            WeightedPoint::new(Point3::new(0.0, 0.0, 0.0), tiny),
            WeightedPoint::unweighted(Point3::new(1.0, 0.0, 0.0)),
        ];
        let knots = [0.0, 0.0, 1.0, 1.0];
        assert!(evaluate_nurbs_curve(0.5, 1, &control, &knots).is_err());
    }

    #[test]
    fn test_rejects_non_positive_tolerance() {
        let err = KernelConfig::from_toml_str("plane_epsilon = 0.0").unwrap_err();
        assert!(err.to_string().contains("plane_epsilon"));
    }

    #[test]
    fn test_rejects_zero_budget() {
        assert!(KernelConfig::from_toml_str("bsp_max_depth = 0").is_err());
    }

    #[test]
    fn test_toml_text_roundtrip() {
        let config = KernelConfig {
            bezier_tolerance: 1e-4,
            ..KernelConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(KernelConfig::from_toml_str(&text).unwrap(), config);
    }
}
