// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Support mappings for convex shapes

use crate::geometry::Mesh;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Farthest point of a convex shape along a direction.
///
/// `direction` need not be normalized. A zero direction may return any point
/// of the shape.
pub trait Support {
    fn support(&self, direction: &Vector3<f64>) -> Point3<f64>;
}

/// Convex shapes understood by the collision queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConvexShape {
    /// Convex hull of a point set
    Polyhedron { vertices: Vec<Point3<f64>> },
    Sphere { center: Point3<f64>, radius: f64 },
    /// Segment `a`-`b` swept by a sphere
    Capsule { a: Point3<f64>, b: Point3<f64>, radius: f64 },
    /// Convex hull of the union of the children
    Compound(Vec<ConvexShape>),
}

impl ConvexShape {
    pub fn polyhedron(vertices: Vec<Point3<f64>>) -> Self {
        Self::Polyhedron { vertices }
    }

    pub fn sphere(center: Point3<f64>, radius: f64) -> Self {
        Self::Sphere { center, radius: radius.abs() }
    }

    pub fn capsule(a: Point3<f64>, b: Point3<f64>, radius: f64) -> Self {
        Self::Capsule { a, b, radius: radius.abs() }
    }

    /// Polyhedron over the vertices of a mesh
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self::Polyhedron { vertices: mesh.vertices.clone() }
    }
}

/// Vertex with the largest projection on `direction`; origin when empty
fn farthest_vertex(vertices: &[Point3<f64>], direction: &Vector3<f64>) -> Point3<f64> {
    vertices
        .iter()
        .max_by(|a, b| a.coords.dot(direction).total_cmp(&b.coords.dot(direction)))
        .copied()
        .unwrap_or_else(Point3::origin)
}

fn sphere_offset(direction: &Vector3<f64>, radius: f64) -> Vector3<f64> {
    direction
        .try_normalize(f64::EPSILON)
        .map_or_else(Vector3::zeros, |unit| unit * radius)
}

impl Support for ConvexShape {
    fn support(&self, direction: &Vector3<f64>) -> Point3<f64> {
        match self {
            ConvexShape::Polyhedron { vertices } => farthest_vertex(vertices, direction),
            ConvexShape::Sphere { center, radius } => center + sphere_offset(direction, *radius),
            ConvexShape::Capsule { a, b, radius } => {
                let end = if a.coords.dot(direction) >= b.coords.dot(direction) { a } else { b };
                end + sphere_offset(direction, *radius)
            }
            ConvexShape::Compound(children) => children
                .iter()
                .map(|child| child.support(direction))
                .max_by(|p, q| p.coords.dot(direction).total_cmp(&q.coords.dot(direction)))
                .unwrap_or_else(Point3::origin),
        }
    }
}

impl Support for Mesh {
    fn support(&self, direction: &Vector3<f64>) -> Point3<f64> {
        farthest_vertex(&self.vertices, direction)
    }
}

impl<T: Support + ?Sized> Support for &T {
    fn support(&self, direction: &Vector3<f64>) -> Point3<f64> {
        (**self).support(direction)
    }
}

impl<T: Support + ?Sized> Support for Box<T> {
    fn support(&self, direction: &Vector3<f64>) -> Point3<f64> {
        (**self).support(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_support() {
        let sphere = ConvexShape::sphere(Point3::new(1.0, 0.0, 0.0), 2.0);
        let p = sphere.support(&Vector3::new(0.0, 3.0, 0.0));
        assert_relative_eq!(p, Point3::new(1.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_capsule_picks_far_end() {
        let capsule = ConvexShape::capsule(Point3::origin(), Point3::new(0.0, 0.0, 4.0), 1.0);
        assert_relative_eq!(
            capsule.support(&Vector3::z()),
            Point3::new(0.0, 0.0, 5.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            capsule.support(&-Vector3::z()),
            Point3::new(0.0, 0.0, -1.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_compound_uses_farthest_child() {
        let compound = ConvexShape::Compound(vec![
            ConvexShape::sphere(Point3::origin(), 1.0),
            ConvexShape::sphere(Point3::new(5.0, 0.0, 0.0), 1.0),
        ]);
        assert_relative_eq!(compound.support(&Vector3::x()), Point3::new(6.0, 0.0, 0.0));
        assert_relative_eq!(compound.support(&-Vector3::x()), Point3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_mesh_support() {
        let cube = Primitive::unit_cube().to_mesh();
        let p = cube.support(&Vector3::new(1.0, 1.0, -1.0));
        assert_eq!(p, Point3::new(1.0, 1.0, 0.0));
        assert_eq!(Mesh::empty().support(&Vector3::x()), Point3::origin());
    }
}
