// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Möller–Trumbore ray/triangle intersection

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Determinant magnitude below which the ray is parallel to the triangle
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// Hits at or below this ray parameter are ignored
pub const MIN_T: f64 = 1e-9;

/// Ray hit with barycentric weights: `point = w·v0 + u·v1 + v·v2`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub point: Point3<f64>,
    pub t: f64,
    pub u: f64,
    pub v: f64,
    pub w: f64,
}

/// Intersect a ray with a triangle using the default tolerances
pub fn ray_triangle(
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    v0: &Point3<f64>,
    v1: &Point3<f64>,
    v2: &Point3<f64>,
) -> Option<RayHit> {
    ray_triangle_with_tolerance(origin, direction, v0, v1, v2, PARALLEL_EPSILON, MIN_T)
}

/// Möller–Trumbore test. Returns `None` when `|det| < parallel_epsilon`,
/// the hit falls outside the triangle, or `t <= min_t`.
pub fn ray_triangle_with_tolerance(
    origin: &Point3<f64>,
    direction: &Vector3<f64>,
    v0: &Point3<f64>,
    v1: &Point3<f64>,
    v2: &Point3<f64>,
    parallel_epsilon: f64,
    min_t: f64,
) -> Option<RayHit> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = direction.cross(&edge2);
    let det = edge1.dot(&h);
    if !(det.abs() >= parallel_epsilon) {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - v0;
    let u = inv_det * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = inv_det * direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * edge2.dot(&q);
    if !(t > min_t) {
        return None;
    }

    Some(RayHit {
        point: origin + direction * t,
        t,
        u,
        v,
        w: 1.0 - u - v,
    })
}
