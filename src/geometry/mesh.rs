// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation and utilities

use super::BoundingBox;
use crate::error::{KernelError, Result};
use ahash::AHashMap;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Polygonal face defined by vertex indices, counter-clockwise seen from outside
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub indices: Vec<usize>,
}

impl Face {
    pub fn new(indices: Vec<usize>) -> Self {
        Self { indices }
    }

    pub fn triangle(indices: [usize; 3]) -> Self {
        Self {
            indices: indices.to_vec(),
        }
    }

    /// Fan triangulation from the first vertex
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let first = self.indices.first().copied().unwrap_or_default();
        self.indices
            .windows(2)
            .skip(1)
            .map(move |pair| [first, pair[0], pair[1]])
    }
}

/// Polygonal mesh: shared vertex array plus index faces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new()
    }

    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Build from raw vertex/face arrays and validate
    pub fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<Vec<usize>>) -> Result<Self> {
        let mesh = Self {
            vertices,
            faces: faces.into_iter().map(Face::new).collect(),
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, vertex: Point3<f64>) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Check face arity and index bounds
    pub fn validate(&self) -> Result<()> {
        for (face_index, face) in self.faces.iter().enumerate() {
            if face.indices.len() < 3 {
                return Err(KernelError::invalid(format!(
                    "face {} has {} vertices, at least 3 required",
                    face_index,
                    face.indices.len()
                )));
            }
            if let Some(&bad) = face.indices.iter().find(|&&i| i >= self.vertices.len()) {
                return Err(KernelError::invalid(format!(
                    "face {} references vertex {} but mesh has {} vertices",
                    face_index,
                    bad,
                    self.vertices.len()
                )));
            }
        }
        if self.vertices.iter().any(|v| !v.coords.iter().all(|c| c.is_finite())) {
            return Err(KernelError::invalid("mesh contains non-finite vertex coordinates"));
        }
        Ok(())
    }

    /// Compute bounding box
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }

    /// Enclosed volume via the divergence theorem; positive for outward winding
    pub fn signed_volume(&self) -> f64 {
        self.faces
            .iter()
            .flat_map(|face| face.triangles())
            .map(|[a, b, c]| {
                let (a, b, c) = (&self.vertices[a], &self.vertices[b], &self.vertices[c]);
                a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
            })
            .sum()
    }

    /// Number of undirected edges not shared by exactly two faces
    pub fn open_edge_count(&self) -> usize {
        let mut edge_counts: AHashMap<(usize, usize), usize> = AHashMap::new();
        for face in &self.faces {
            let n = face.indices.len();
            for i in 0..n {
                let a = face.indices[i];
                let b = face.indices[(i + 1) % n];
                *edge_counts.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        edge_counts.values().filter(|&&count| count != 2).count()
    }

    /// Append another mesh without any boolean processing
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);

        for face in &other.faces {
            self.faces.push(Face::new(
                face.indices.iter().map(|i| i + offset).collect(),
            ));
        }
    }

    /// Translate every vertex
    pub fn translate(&mut self, offset: nalgebra::Vector3<f64>) {
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
    }

    /// Face vertex positions in winding order
    pub fn face_positions(&self, face: &Face) -> Vec<Point3<f64>> {
        face.indices.iter().map(|&i| self.vertices[i]).collect()
    }
}
