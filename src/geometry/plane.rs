// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Oriented plane and signed-distance classification
//!
//! The single point/plane predicate used by both the BSP engine and the
//! GJK simplex reduction.

use crate::utils::math::compensated_dot;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Distances below this are recomputed with compensated summation
const REFINE_BAND: f64 = 1e-9;

/// Plane `normal . x = offset` with unit normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vector3<f64>,
    pub offset: f64,
}

/// Side of a plane a point lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    Front,
    Back,
    OnPlane,
}

/// Classification of a vertex set against a plane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonClass {
    Coplanar,
    Front,
    Back,
    Spanning,
}

impl Plane {
    /// Normalizes `normal`; `None` for a zero-length normal.
    pub fn new(normal: Vector3<f64>, offset: f64) -> Option<Self> {
        let len = normal.norm();
        if !(len.is_finite() && len > f64::EPSILON) {
            return None;
        }
        Some(Self {
            normal: normal / len,
            offset: offset / len,
        })
    }

    /// Plane through three points, counter-clockwise winding faces the normal.
    /// `None` if the points are collinear.
    pub fn from_points(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Option<Self> {
        let normal = (b - a).cross(&(c - a));
        let len = normal.norm();
        if !(len.is_finite() && len > f64::EPSILON) {
            return None;
        }
        let normal = normal / len;
        Some(Self {
            normal,
            offset: normal.dot(&a.coords),
        })
    }

    /// Best-fit plane of a polygon using Newell's method
    pub fn from_polygon(vertices: &[Point3<f64>]) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let mut normal = Vector3::<f64>::zeros();
        let mut centroid = Vector3::<f64>::zeros();
        for (i, current) in vertices.iter().enumerate() {
            let next = &vertices[(i + 1) % vertices.len()];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
            centroid += current.coords;
        }
        centroid /= vertices.len() as f64;
        let len = normal.norm();
        if !(len.is_finite() && len > f64::EPSILON) {
            return None;
        }
        let normal = normal / len;
        Some(Self {
            normal,
            offset: normal.dot(&centroid),
        })
    }

    /// Signed distance `normal . p - offset`; positive on the front side
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        let distance = self.normal.dot(&point.coords) - self.offset;
        if distance.abs() < REFINE_BAND {
            compensated_dot(&self.normal, &point.coords) - self.offset
        } else {
            distance
        }
    }

    pub fn classify_point(&self, point: &Point3<f64>, epsilon: f64) -> PlaneSide {
        let distance = self.signed_distance(point);
        if distance > epsilon {
            PlaneSide::Front
        } else if distance < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::OnPlane
        }
    }

    /// Classify a vertex set, returning the per-vertex sides alongside
    pub fn classify_points(
        &self,
        points: &[Point3<f64>],
        epsilon: f64,
    ) -> (PolygonClass, Vec<PlaneSide>) {
        let sides: Vec<PlaneSide> = points
            .iter()
            .map(|p| self.classify_point(p, epsilon))
            .collect();
        let any_front = sides.contains(&PlaneSide::Front);
        let any_back = sides.contains(&PlaneSide::Back);
        let class = match (any_front, any_back) {
            (false, false) => PolygonClass::Coplanar,
            (true, false) => PolygonClass::Front,
            (false, true) => PolygonClass::Back,
            (true, true) => PolygonClass::Spanning,
        };
        (class, sides)
    }

    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.offset = -self.offset;
    }

    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            offset: -self.offset,
        }
    }
}
