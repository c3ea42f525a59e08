// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polygon soup to indexed mesh
//! Handles vertex welding, fan triangulation and open-edge detection

use super::{polygon::Polygon, Face, Mesh};
use crate::error::{KernelError, Result};
use crate::utils::math::quantize;
use ahash::AHashMap;
use nalgebra::Point3;

/// Outcome of rebuilding a mesh from BSP polygons
#[derive(Debug, Clone)]
pub struct Reconstruction {
    pub mesh: Mesh,
    /// Edges not shared by exactly two triangles
    pub open_edges: usize,
}

/// Weld vertices on a rounded grid and fan-triangulate every polygon
pub fn reconstruct_mesh(polygons: &[Polygon], decimals: u32) -> Reconstruction {
    let mut mesh = Mesh::new();
    let mut welded: AHashMap<(i64, i64, i64), usize> = AHashMap::new();

    let mut index_of = |mesh: &mut Mesh, point: &Point3<f64>| -> usize {
        let key = (
            quantize(point.x, decimals),
            quantize(point.y, decimals),
            quantize(point.z, decimals),
        );
        *welded.entry(key).or_insert_with(|| mesh.add_vertex(*point))
    };

    for polygon in polygons {
        let indices: Vec<usize> = polygon
            .vertices
            .iter()
            .map(|v| index_of(&mut mesh, v))
            .collect();

        for i in 1..indices.len().saturating_sub(1) {
            let (a, b, c) = (indices[0], indices[i], indices[i + 1]);
            // Collapsed by welding
            if a == b || b == c || c == a {
                continue;
            }
            mesh.add_face(Face::triangle([a, b, c]));
        }
    }

    let open_edges = mesh.open_edge_count();
    Reconstruction { mesh, open_edges }
}

/// Apply the manifold policy to a reconstruction
pub fn finish_reconstruction(reconstruction: Reconstruction, fail_on_degraded: bool) -> Result<Mesh> {
    if reconstruction.open_edges > 0 {
        if fail_on_degraded {
            return Err(KernelError::NonManifoldInput {
                open_edges: reconstruction.open_edges,
            });
        }
        tracing::warn!(
            open_edges = reconstruction.open_edges,
            triangles = reconstruction.mesh.face_count(),
            "boolean result is not a closed manifold"
        );
    }
    Ok(reconstruction.mesh)
}
