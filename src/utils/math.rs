// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point2, Point3, Vector3};

/// Check if two floats are approximately equal
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Linear interpolation between two points
pub fn lerp_point(a: &Point3<f64>, b: &Point3<f64>, t: f64) -> Point3<f64> {
    a + (b - a) * t
}

/// Z component of (b - a) x (c - a). Positive for a counter-clockwise turn.
pub fn cross_2d(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Neumaier-compensated sum of three terms
pub fn compensated_sum3(terms: [f64; 3]) -> f64 {
    let mut sum = 0.0;
    let mut c = 0.0;
    for term in terms {
        let t = sum + term;
        if sum.abs() >= term.abs() {
            c += (sum - t) + term;
        } else {
            c += (term - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Dot product evaluated with compensated summation
pub fn compensated_dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    compensated_sum3([a.x * b.x, a.y * b.y, a.z * b.z])
}

/// Round to a fixed number of decimals and return the scaled integer key
pub fn quantize(value: f64, decimals: u32) -> i64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0001, 0.001));
        assert!(!approx_eq(1.0, 1.1, 0.001));
    }

    #[test]
    fn test_cross_2d_orientation() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        assert!(cross_2d(&a, &b, &Point2::new(1.0, 1.0)) > 0.0);
        assert!(cross_2d(&a, &b, &Point2::new(1.0, -1.0)) < 0.0);
        assert_eq!(cross_2d(&a, &b, &Point2::new(2.0, 0.0)), 0.0);
    }

    #[test]
    fn test_compensated_sum_recovers_cancellation() {
        let sum = compensated_sum3([1e16, 1.0, -1e16]);
        assert_eq!(sum, 1.0);
    }

    #[test]
    fn test_quantize() {
        assert_eq!(quantize(0.1234564, 6), 123456);
        assert_eq!(quantize(0.1234566, 6), 123457);
        assert_eq!(quantize(-0.0000004, 6), 0);
    }
}
