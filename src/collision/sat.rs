// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Separating axis test for convex polygons in the plane

use crate::error::{KernelError, Result};
use nalgebra::{Point2, Vector2};

fn check_polygon(name: &str, polygon: &[Point2<f64>]) -> Result<()> {
    if polygon.len() < 3 {
        return Err(KernelError::invalid(format!(
            "polygon {} needs at least 3 vertices, got {}",
            name,
            polygon.len()
        )));
    }
    if polygon.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(KernelError::invalid(format!("polygon {} has non-finite vertices", name)));
    }
    Ok(())
}

/// Edge normals of a closed polygon (not normalized)
fn edge_axes(polygon: &[Point2<f64>]) -> impl Iterator<Item = Vector2<f64>> + '_ {
    polygon.iter().enumerate().map(move |(i, p)| {
        let q = polygon[(i + 1) % polygon.len()];
        let edge = q - p;
        Vector2::new(-edge.y, edge.x)
    })
}

fn project(polygon: &[Point2<f64>], axis: &Vector2<f64>) -> (f64, f64) {
    polygon.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), p| {
        let d = p.coords.dot(axis);
        (min.min(d), max.max(d))
    })
}

/// `true` if two convex polygons overlap. Touching counts as overlap.
///
/// Vertex order may be either winding. Zero-length edges contribute no axis.
pub fn sat_intersects_2d(poly_a: &[Point2<f64>], poly_b: &[Point2<f64>]) -> Result<bool> {
    check_polygon("a", poly_a)?;
    check_polygon("b", poly_b)?;

    for axis in edge_axes(poly_a).chain(edge_axes(poly_b)) {
        if axis.norm_squared() == 0.0 {
            continue;
        }
        let (min_a, max_a) = project(poly_a, &axis);
        let (min_b, max_b) = project(poly_b, &axis);
        if max_a < min_b || max_b < min_a {
            return Ok(false);
        }
    }
    Ok(true)
}
