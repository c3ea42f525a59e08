// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CSG (Constructive Solid Geometry) operations using BSP trees
//!
//! Union is the primitive; intersection and subtraction are derived from it
//! through inversion:
//!
//! * `A ∩ B = ¬(¬A ∪ ¬B)`
//! * `A − B = ¬(¬A ∪ B)`

use super::bsp::BspTree;
use super::mesh_reconstruction::{finish_reconstruction, reconstruct_mesh};
use super::polygon::Polygon;
use super::Mesh;
use crate::config::KernelConfig;
use crate::error::{KernelError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooleanOp {
    Union,
    Intersection,
    Subtraction,
}

/// Convert mesh faces to BSP polygons, skipping degenerate faces
fn mesh_to_polygons(mesh: &Mesh) -> Vec<Polygon> {
    mesh.faces
        .iter()
        .enumerate()
        .filter_map(|(index, face)| {
            let polygon = Polygon::new(mesh.face_positions(face));
            if polygon.is_none() {
                tracing::debug!(face = index, "skipping degenerate face");
            }
            polygon
        })
        .collect()
}

fn build_tree(mesh: &Mesh, config: &KernelConfig) -> BspTree {
    BspTree::new(mesh_to_polygons(mesh), config.plane_epsilon, config.bsp_max_depth)
}

/// Union of two trees; the result is left in `a`
fn union_trees(a: &mut BspTree, mut b: BspTree) {
    a.clip_to(&b);
    b.clip_to(a);
    b.invert();
    b.clip_to(a);
    b.invert();
    a.build(b.into_polygons());
}

fn tree_to_mesh(tree: &BspTree, config: &KernelConfig) -> Result<Mesh> {
    if tree.is_truncated() && config.fail_on_degraded {
        return Err(KernelError::RecursionLimitExceeded {
            limit: config.bsp_max_depth,
        });
    }
    let reconstruction = reconstruct_mesh(&tree.all_polygons(), config.weld_decimals);
    finish_reconstruction(reconstruction, config.fail_on_degraded)
}

/// Dispatch a boolean operation with explicit configuration
pub fn boolean_with_config(a: &Mesh, b: &Mesh, op: BooleanOp, config: &KernelConfig) -> Result<Mesh> {
    a.validate()?;
    b.validate()?;

    match (op, a.is_empty(), b.is_empty()) {
        (BooleanOp::Union, true, _) => return Ok(b.clone()),
        (BooleanOp::Union, _, true) => return Ok(a.clone()),
        (BooleanOp::Intersection, true, _) | (BooleanOp::Intersection, _, true) => {
            return Ok(Mesh::empty())
        }
        (BooleanOp::Subtraction, true, _) => return Ok(Mesh::empty()),
        (BooleanOp::Subtraction, _, true) => return Ok(a.clone()),
        _ => {}
    }

    let mut tree_a = build_tree(a, config);
    let mut tree_b = build_tree(b, config);

    match op {
        BooleanOp::Union => {
            union_trees(&mut tree_a, tree_b);
        }
        BooleanOp::Intersection => {
            tree_a.invert();
            tree_b.invert();
            union_trees(&mut tree_a, tree_b);
            tree_a.invert();
        }
        BooleanOp::Subtraction => {
            tree_a.invert();
            union_trees(&mut tree_a, tree_b);
            tree_a.invert();
        }
    }

    tree_to_mesh(&tree_a, config)
}

/// Perform CSG union using BSP trees
pub fn csg_union(a: &Mesh, b: &Mesh) -> Result<Mesh> {
    boolean_with_config(a, b, BooleanOp::Union, &KernelConfig::default())
}

/// Perform CSG intersection using BSP trees
pub fn csg_intersection(a: &Mesh, b: &Mesh) -> Result<Mesh> {
    boolean_with_config(a, b, BooleanOp::Intersection, &KernelConfig::default())
}

/// Perform CSG subtraction (`a` minus `b`) using BSP trees
pub fn csg_subtraction(a: &Mesh, b: &Mesh) -> Result<Mesh> {
    boolean_with_config(a, b, BooleanOp::Subtraction, &KernelConfig::default())
}

/// Complement of a solid: same surface, reversed orientation
pub fn csg_invert(mesh: &Mesh) -> Result<Mesh> {
    csg_invert_with_config(mesh, &KernelConfig::default())
}

pub fn csg_invert_with_config(mesh: &Mesh, config: &KernelConfig) -> Result<Mesh> {
    mesh.validate()?;
    let mut tree = build_tree(mesh, config);
    tree.invert();
    tree_to_mesh(&tree, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Primitive;
    use nalgebra::Point3;

    fn cube(min: f64, max: f64) -> Mesh {
        Primitive::cuboid(Point3::new(min, min, min), Point3::new(max, max, max)).to_mesh()
    }

    #[test]
    fn test_union_of_overlapping_cubes() {
        let result = csg_union(&cube(0.0, 1.0), &cube(0.5, 1.5)).unwrap();
        let expected = 2.0 - 0.125;
        assert!((result.signed_volume() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_intersection_of_overlapping_cubes() {
        let result = csg_intersection(&cube(0.0, 1.0), &cube(0.5, 1.5)).unwrap();
        assert!((result.signed_volume() - 0.125).abs() < 1e-6);
        let bbox = result.bounding_box();
        assert!(bbox.approx_eq(
            &crate::geometry::BoundingBox::new(Point3::new(0.5, 0.5, 0.5), Point3::new(1.0, 1.0, 1.0)),
            1e-9
        ));
    }

    #[test]
    fn test_subtraction_of_overlapping_cubes() {
        let result = csg_subtraction(&cube(0.0, 1.0), &cube(0.5, 1.5)).unwrap();
        assert!((result.signed_volume() - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_disjoint_union_keeps_both() {
        let result = csg_union(&cube(0.0, 1.0), &cube(2.0, 3.0)).unwrap();
        assert_eq!(result.face_count(), 24);
        assert_eq!(result.vertex_count(), 16);
        assert!((result.signed_volume() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_operands() {
        let a = cube(0.0, 1.0);
        let empty = Mesh::empty();

        assert_eq!(csg_union(&a, &empty).unwrap(), a);
        assert_eq!(csg_union(&empty, &a).unwrap(), a);
        assert!(csg_intersection(&a, &empty).unwrap().is_empty());
        assert_eq!(csg_subtraction(&a, &empty).unwrap(), a);
        assert!(csg_subtraction(&empty, &a).unwrap().is_empty());
    }

    #[test]
    fn test_invert_flips_volume_sign() {
        let inverted = csg_invert(&cube(0.0, 1.0)).unwrap();
        assert!((inverted.signed_volume() + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_input_rejected() {
        let mut bad = cube(0.0, 1.0);
        bad.faces[0].indices[0] = 99;
        let result = csg_union(&bad, &cube(0.5, 1.5));
        assert!(matches!(result, Err(KernelError::InputValidation(_))));
    }

    #[test]
    fn test_depth_budget_is_reported_when_strict() {
        let config = KernelConfig {
            bsp_max_depth: 2,
            fail_on_degraded: true,
            ..KernelConfig::default()
        };
        let result = boolean_with_config(&cube(0.0, 1.0), &cube(0.5, 1.5), BooleanOp::Union, &config);
        assert_eq!(result, Err(KernelError::RecursionLimitExceeded { limit: 2 }));
    }
}
