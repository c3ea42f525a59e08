// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Curve and surface evaluation

pub mod bezier;
pub mod bspline;
pub mod hull;
pub mod nurbs;

pub use bezier::{
    bezier_bounding_box, evaluate_bezier, intersect_beziers, intersect_beziers_detailed,
    split_bezier, CurveIntersection, IntersectionReport,
};
pub use bspline::{basis_function, evaluate_bspline, find_span, insert_knot, validate_knots};
pub use hull::convex_hull_2d;
pub use nurbs::{
    evaluate_nurbs_curve, evaluate_nurbs_surface, ControlNet, WeightedPoint,
};
