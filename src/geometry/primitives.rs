// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Closed solid generators

use super::{Face, Mesh};
use nalgebra::Point3;
use std::f64::consts::PI;

/// Closed, outward-wound solids
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Cuboid { min: Point3<f64>, max: Point3<f64> },
    Sphere { center: Point3<f64>, radius: f64, segments: u32 },
}

impl Primitive {
    pub fn cuboid(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self::Cuboid {
            min: min.inf(&max),
            max: min.sup(&max),
        }
    }

    /// Axis-aligned cube [0, 1]^3
    pub fn unit_cube() -> Self {
        Self::cuboid(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
    }

    /// Axis-aligned cube of edge `size` centered at `center`
    pub fn cube_centered(center: Point3<f64>, size: f64) -> Self {
        let half = nalgebra::Vector3::repeat(size / 2.0);
        Self::cuboid(center - half, center + half)
    }

    pub fn sphere(center: Point3<f64>, radius: f64, segments: u32) -> Self {
        let segments = if segments >= 3 { segments } else { 16 };
        Self::Sphere {
            center,
            radius,
            segments,
        }
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Cuboid { min, max } => generate_cuboid_mesh(min, max),
            Self::Sphere {
                center,
                radius,
                segments,
            } => generate_sphere_mesh(center, *radius, *segments),
        }
    }
}

fn generate_cuboid_mesh(min: &Point3<f64>, max: &Point3<f64>) -> Mesh {
    let mut mesh = Mesh::with_capacity(8, 12);

    // 8 shared corners
    for position in [
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
    ] {
        mesh.add_vertex(position);
    }

    let triangles = [
        // z+
        [4, 5, 6],
        [4, 6, 7],
        // z-
        [1, 0, 3],
        [1, 3, 2],
        // x+
        [5, 1, 2],
        [5, 2, 6],
        // x-
        [0, 4, 7],
        [0, 7, 3],
        // y+
        [7, 6, 2],
        [7, 2, 3],
        // y-
        [0, 1, 5],
        [0, 5, 4],
    ];

    for indices in triangles {
        mesh.add_face(Face::triangle(indices));
    }

    mesh
}

fn generate_sphere_mesh(center: &Point3<f64>, radius: f64, segments: u32) -> Mesh {
    let stacks = segments as usize;
    let slices = segments as usize;
    let mut mesh = Mesh::with_capacity(2 + (stacks - 1) * slices, 2 * stacks * slices);

    let north = mesh.add_vertex(center + nalgebra::Vector3::new(0.0, 0.0, radius));

    // Rings between the poles, no seam duplicates
    for i in 1..stacks {
        let phi = PI * i as f64 / stacks as f64;
        let z = radius * phi.cos();
        let r = radius * phi.sin();
        for j in 0..slices {
            let theta = 2.0 * PI * j as f64 / slices as f64;
            mesh.add_vertex(center + nalgebra::Vector3::new(r * theta.cos(), r * theta.sin(), z));
        }
    }

    let south = mesh.add_vertex(center + nalgebra::Vector3::new(0.0, 0.0, -radius));
    let ring = |i: usize, j: usize| 1 + i * slices + (j % slices);

    for j in 0..slices {
        mesh.add_face(Face::triangle([north, ring(0, j), ring(0, j + 1)]));
    }

    for i in 0..stacks - 2 {
        for j in 0..slices {
            let a = ring(i, j);
            let b = ring(i + 1, j);
            let c = ring(i + 1, j + 1);
            let d = ring(i, j + 1);
            mesh.add_face(Face::triangle([a, b, c]));
            mesh.add_face(Face::triangle([a, c, d]));
        }
    }

    let last = stacks - 2;
    for j in 0..slices {
        mesh.add_face(Face::triangle([south, ring(last, j + 1), ring(last, j)]));
    }

    mesh
}
