// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Convex planar polygons carried through the BSP tree

use super::plane::{Plane, PlaneSide, PolygonClass};
use crate::utils::math::lerp_point;
use nalgebra::Point3;

/// Ordered vertex loop plus its supporting plane
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub vertices: Vec<Point3<f64>>,
    pub plane: Plane,
}

/// Output buckets of splitting a polygon by a plane
#[derive(Debug, Default)]
pub struct SplitResult {
    pub coplanar_front: Vec<Polygon>,
    pub coplanar_back: Vec<Polygon>,
    pub front: Vec<Polygon>,
    pub back: Vec<Polygon>,
}

impl Polygon {
    /// `None` for fewer than 3 vertices or a degenerate loop
    pub fn new(vertices: Vec<Point3<f64>>) -> Option<Self> {
        let plane = Plane::from_polygon(&vertices)?;
        Some(Self { vertices, plane })
    }

    /// Reverse winding and plane orientation
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    /// Split against `plane`, appending the pieces to `out`.
    ///
    /// Crossing points are computed once and shared by both halves. Pieces
    /// with fewer than 3 vertices are dropped.
    pub fn split_into(self, plane: &Plane, epsilon: f64, out: &mut SplitResult) {
        let (class, sides) = plane.classify_points(&self.vertices, epsilon);

        match class {
            PolygonClass::Coplanar => {
                if plane.normal.dot(&self.plane.normal) > 0.0 {
                    out.coplanar_front.push(self);
                } else {
                    out.coplanar_back.push(self);
                }
            }
            PolygonClass::Front => out.front.push(self),
            PolygonClass::Back => out.back.push(self),
            PolygonClass::Spanning => {
                let n = self.vertices.len();
                let mut front = Vec::with_capacity(n + 1);
                let mut back = Vec::with_capacity(n + 1);

                for i in 0..n {
                    let j = (i + 1) % n;
                    let (vi, vj) = (&self.vertices[i], &self.vertices[j]);
                    let (si, sj) = (sides[i], sides[j]);

                    if si != PlaneSide::Back {
                        front.push(*vi);
                    }
                    if si != PlaneSide::Front {
                        back.push(*vi);
                    }

                    let crosses = matches!(
                        (si, sj),
                        (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
                    );
                    if crosses {
                        let di = plane.signed_distance(vi);
                        let dj = plane.signed_distance(vj);
                        let t = di / (di - dj);
                        let crossing = lerp_point(vi, vj, t);
                        front.push(crossing);
                        back.push(crossing);
                    }
                }

                if front.len() >= 3 {
                    out.front.push(Polygon {
                        vertices: front,
                        plane: self.plane,
                    });
                } else {
                    tracing::debug!(vertices = front.len(), "dropped degenerate front fragment");
                }
                if back.len() >= 3 {
                    out.back.push(Polygon {
                        vertices: back,
                        plane: self.plane,
                    });
                } else {
                    tracing::debug!(vertices = back.len(), "dropped degenerate back fragment");
                }
            }
        }
    }

    /// Convenience wrapper around [`Polygon::split_into`]
    pub fn split(&self, plane: &Plane, epsilon: f64) -> SplitResult {
        let mut out = SplitResult::default();
        self.clone().split_into(plane, epsilon, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_degenerate_polygon_rejected() {
        assert!(Polygon::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]).is_none());
        let collinear = vec![
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        assert!(Polygon::new(collinear).is_none());
    }

    #[test]
    fn test_split_spanning_square() {
        let plane = Plane::new(Vector3::x(), 0.25).unwrap();
        let result = unit_square().split(&plane, 1e-6);

        assert_eq!(result.front.len(), 1);
        assert_eq!(result.back.len(), 1);
        let front = &result.front[0];
        let back = &result.back[0];
        assert_eq!(front.vertices.len(), 4);
        assert_eq!(back.vertices.len(), 4);

        // The crossing points are shared by both halves
        let crossing_a = Point3::new(0.25, 0.0, 0.0);
        let crossing_b = Point3::new(0.25, 1.0, 0.0);
        for half in [front, back] {
            assert!(half.vertices.iter().any(|v| (v - crossing_a).norm() < 1e-12));
            assert!(half.vertices.iter().any(|v| (v - crossing_b).norm() < 1e-12));
        }
        assert!(front.vertices.iter().all(|v| v.x >= 0.25 - 1e-12));
        assert!(back.vertices.iter().all(|v| v.x <= 0.25 + 1e-12));
    }

    #[test]
    fn test_split_through_vertex() {
        // Diagonal plane passes through two corners: triangles on each side
        let plane = Plane::new(Vector3::new(1.0, -1.0, 0.0), 0.0).unwrap();
        let result = unit_square().split(&plane, 1e-6);
        assert_eq!(result.front.len(), 1);
        assert_eq!(result.back.len(), 1);
        assert_eq!(result.front[0].vertices.len(), 3);
        assert_eq!(result.back[0].vertices.len(), 3);
    }

    #[test]
    fn test_coplanar_orientation() {
        let square = unit_square();
        let same = Plane::new(Vector3::z(), 0.0).unwrap();
        let opposite = Plane::new(-Vector3::z(), 0.0).unwrap();

        assert_eq!(square.split(&same, 1e-6).coplanar_front.len(), 1);
        assert_eq!(square.split(&opposite, 1e-6).coplanar_back.len(), 1);
    }

    #[test]
    fn test_flip_reverses_plane() {
        let mut square = unit_square();
        square.flip();
        assert!((square.plane.normal + Vector3::z()).norm() < 1e-12);
        assert_eq!(square.vertices[0], Point3::new(0.0, 1.0, 0.0));
    }
}
