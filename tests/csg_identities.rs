// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Boolean identities over BSP-based CSG

use anyhow::Result;
use geokernel::geometry::{union_all, BoundingBox};
use geokernel::{
    csg_intersection, csg_invert, csg_subtraction, csg_union, KernelConfig, Mesh, Primitive,
};
use nalgebra::Point3;

fn cube(min: [f64; 3], max: [f64; 3]) -> Mesh {
    Primitive::cuboid(Point3::from(min), Point3::from(max)).to_mesh()
}

fn unit_cube() -> Mesh {
    Primitive::unit_cube().to_mesh()
}

fn offset_cube() -> Mesh {
    cube([0.5, 0.5, 0.5], [1.5, 1.5, 1.5])
}

#[test]
fn test_union_with_self_is_identity() -> Result<()> {
    let a = unit_cube();
    let result = csg_union(&a, &a)?;

    assert!((result.signed_volume() - 1.0).abs() < 1e-9);
    assert_eq!(result.vertex_count(), 8);
    assert!(result.bounding_box().approx_eq(&a.bounding_box(), 1e-9));
    assert_eq!(result.open_edge_count(), 0);
    Ok(())
}

#[test]
fn test_subtraction_with_self_is_empty() -> Result<()> {
    let a = unit_cube();
    let result = csg_subtraction(&a, &a)?;
    assert!(result.is_empty());
    assert!(result.signed_volume().abs() < 1e-9);
    Ok(())
}

#[test]
fn test_union_then_subtraction_is_bounded() -> Result<()> {
    let a = unit_cube();
    let b = offset_cube();
    let union = csg_union(&a, &b)?;
    let remainder = csg_subtraction(&union, &b)?;

    assert!(remainder.signed_volume() <= a.signed_volume() + 1e-6);
    assert!((remainder.signed_volume() - 0.875).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_de_morgan_intersection() -> Result<()> {
    let a = unit_cube();
    let b = offset_cube();

    let direct = csg_intersection(&a, &b)?;
    let via_complement = csg_invert(&csg_union(&csg_invert(&a)?, &csg_invert(&b)?)?)?;

    assert!((direct.signed_volume() - 0.125).abs() < 1e-6);
    assert!((via_complement.signed_volume() - direct.signed_volume()).abs() < 1e-6);

    let expected = BoundingBox::new(Point3::new(0.5, 0.5, 0.5), Point3::new(1.0, 1.0, 1.0));
    assert!(direct.bounding_box().approx_eq(&expected, 1e-9));
    assert!(via_complement.bounding_box().approx_eq(&expected, 1e-9));
    Ok(())
}

#[test]
fn test_union_is_order_independent() -> Result<()> {
    let a = unit_cube();
    let b = offset_cube();
    let ab = csg_union(&a, &b)?;
    let ba = csg_union(&b, &a)?;
    assert!((ab.signed_volume() - ba.signed_volume()).abs() < 1e-6);
    assert!(ab.bounding_box().approx_eq(&ba.bounding_box(), 1e-9));
    Ok(())
}

#[test]
fn test_parallel_union_matches_sequential() -> Result<()> {
    let meshes = vec![
        cube([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
        cube([0.5, 0.25, 0.25], [1.5, 0.75, 0.75]),
        cube([3.0, 0.0, 0.0], [4.0, 1.0, 1.0]),
        cube([3.5, 0.5, -0.5], [4.5, 1.5, 0.5]),
    ];

    let mut sequential = Mesh::empty();
    for mesh in &meshes {
        sequential = csg_union(&sequential, mesh)?;
    }
    let parallel = union_all(meshes, &KernelConfig::default())?;

    // 1 + 0.125 + 1 + 0.875
    assert!((sequential.signed_volume() - 3.0).abs() < 1e-6);
    assert!((parallel.signed_volume() - sequential.signed_volume()).abs() < 1e-6);
    Ok(())
}

#[test]
fn test_sphere_minus_cube() -> Result<()> {
    let sphere = Primitive::sphere(Point3::origin(), 1.0, 12).to_mesh();
    let cutter = cube([0.0, -2.0, -2.0], [2.0, 2.0, 2.0]);
    let half = csg_subtraction(&sphere, &cutter)?;

    let bbox = half.bounding_box();
    assert!(bbox.max.x <= 1e-6);
    assert!((half.signed_volume() - sphere.signed_volume() / 2.0).abs() < 1e-3);
    Ok(())
}

fn dense_sphere() -> Mesh {
    // 1984 faces, well past any shallow depth budget
    Primitive::sphere(Point3::origin(), 1.0, 32).to_mesh()
}

#[test]
fn test_dense_sphere_with_disjoint_box() -> Result<()> {
    let sphere = dense_sphere();
    assert!(sphere.face_count() > 1900);
    let far_box = cube([-0.5, -0.5, -3.0], [0.5, 0.5, -2.0]);

    let union = csg_union(&sphere, &far_box)?;
    assert!((union.signed_volume() - (sphere.signed_volume() + 1.0)).abs() < 1e-4);

    let remainder = csg_subtraction(&sphere, &far_box)?;
    assert!((remainder.signed_volume() - sphere.signed_volume()).abs() < 1e-4);
    Ok(())
}

#[test]
fn test_dense_sphere_split_by_overlapping_box() -> Result<()> {
    let sphere = dense_sphere();
    let cap_box = cube([-0.5, -0.5, -1.5], [0.5, 0.5, -0.7]);

    let remainder = csg_subtraction(&sphere, &cap_box)?;
    let cap = csg_intersection(&sphere, &cap_box)?;

    assert!(cap.signed_volume() > 0.0);
    assert!(remainder.signed_volume() < sphere.signed_volume());
    assert!((remainder.signed_volume() + cap.signed_volume() - sphere.signed_volume()).abs() < 1e-4);

    let bbox = cap.bounding_box();
    assert!(bbox.min.z >= -1.0 - 1e-6 && bbox.max.z <= -0.7 + 1e-6);
    assert!(bbox.min.x >= -0.5 - 1e-6 && bbox.max.x <= 0.5 + 1e-6);
    Ok(())
}
