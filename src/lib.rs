// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geokernel
//!
//! Geometry kernel for toolpath planning: NURBS/Bezier evaluation, BSP-based
//! solid booleans and convex collision queries. Every operation is a pure
//! function of its inputs; [`Kernel`] carries one [`KernelConfig`] through
//! all of them.

pub mod collision;
pub mod config;
pub mod curve;
pub mod error;
pub mod geometry;
pub mod kernel;
pub mod utils;

pub use collision::{
    closest_point_on_segment, gjk_intersects, gjk_query, point_in_polygon, ray_triangle,
    sat_intersects_2d, ConvexShape, GjkResult, RayHit, Support,
};
pub use config::KernelConfig;
pub use curve::{
    convex_hull_2d, evaluate_bezier, evaluate_bspline, evaluate_nurbs_surface, insert_knot,
    intersect_beziers, CurveIntersection, WeightedPoint,
};
pub use error::{KernelError, Result};
pub use geometry::{
    csg_intersection, csg_invert, csg_subtraction, csg_union, BooleanOp, Mesh, Primitive,
};
pub use kernel::Kernel;
