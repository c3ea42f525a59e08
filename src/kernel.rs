// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel facade carrying one configuration through every operation

use crate::collision::{self, GjkResult, RayHit, Support};
use crate::config::KernelConfig;
use crate::curve::{self, CurveIntersection, IntersectionReport, WeightedPoint};
use crate::error::Result;
use crate::geometry::{self, BooleanOp, Mesh};
use nalgebra::{Point2, Point3, Vector3};

/// Stateless geometry kernel.
///
/// Holds only tolerances and budgets; every method is a pure function of its
/// arguments, so one kernel can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Kernel {
    config: KernelConfig,
}

impl Kernel {
    /// Kernel with default tolerances
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: KernelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    // Curves and surfaces

    pub fn evaluate_bspline(
        &self,
        t: f64,
        degree: usize,
        control_points: &[Point3<f64>],
        knots: &[f64],
    ) -> Result<Point3<f64>> {
        curve::bspline::evaluate_bspline_with_epsilon(
            t,
            degree,
            control_points,
            knots,
            self.config.knot_epsilon,
        )
    }

    pub fn evaluate_bezier(&self, t: f64, control_points: &[Point3<f64>]) -> Result<Point3<f64>> {
        curve::evaluate_bezier(t, control_points)
    }

    pub fn insert_knot(
        &self,
        u: f64,
        control_points: &[Point3<f64>],
        knots: &[f64],
        degree: usize,
    ) -> Result<(Vec<Point3<f64>>, Vec<f64>)> {
        curve::insert_knot(u, control_points, knots, degree)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn evaluate_nurbs_surface(
        &self,
        u: f64,
        v: f64,
        control_net: &[Vec<WeightedPoint>],
        knots_u: &[f64],
        knots_v: &[f64],
        degree_u: usize,
        degree_v: usize,
    ) -> Result<Point3<f64>> {
        curve::nurbs::evaluate_nurbs_surface_with_epsilon(
            u,
            v,
            control_net,
            knots_u,
            knots_v,
            degree_u,
            degree_v,
            self.config.knot_epsilon,
            self.config.weight_epsilon,
        )
    }

    pub fn convex_hull_2d(&self, points: &[Point2<f64>]) -> Result<Vec<Point2<f64>>> {
        curve::convex_hull_2d(points)
    }

    /// Curve intersection with the configured tolerance and budgets
    pub fn intersect_beziers(
        &self,
        curve_a: &[Point3<f64>],
        curve_b: &[Point3<f64>],
    ) -> Result<Vec<CurveIntersection>> {
        self.intersect_beziers_detailed(curve_a, curve_b)
            .map(|report| report.intersections)
    }

    pub fn intersect_beziers_detailed(
        &self,
        curve_a: &[Point3<f64>],
        curve_b: &[Point3<f64>],
    ) -> Result<IntersectionReport> {
        curve::intersect_beziers_detailed(
            curve_a,
            curve_b,
            self.config.bezier_tolerance,
            self.config.bezier_max_iter,
            self.config.bezier_max_subdivisions,
        )
    }

    // Solids

    pub fn boolean(&self, a: &Mesh, b: &Mesh, op: BooleanOp) -> Result<Mesh> {
        geometry::boolean_with_config(a, b, op, &self.config)
    }

    pub fn csg_union(&self, a: &Mesh, b: &Mesh) -> Result<Mesh> {
        self.boolean(a, b, BooleanOp::Union)
    }

    pub fn csg_intersection(&self, a: &Mesh, b: &Mesh) -> Result<Mesh> {
        self.boolean(a, b, BooleanOp::Intersection)
    }

    pub fn csg_subtraction(&self, a: &Mesh, b: &Mesh) -> Result<Mesh> {
        self.boolean(a, b, BooleanOp::Subtraction)
    }

    pub fn csg_invert(&self, mesh: &Mesh) -> Result<Mesh> {
        geometry::csg::csg_invert_with_config(mesh, &self.config)
    }

    pub fn union_all(&self, meshes: Vec<Mesh>) -> Result<Mesh> {
        geometry::union_all(meshes, &self.config)
    }

    pub fn subtract_all(&self, meshes: Vec<Mesh>) -> Result<Mesh> {
        geometry::subtract_all(meshes, &self.config)
    }

    // Collision and proximity

    pub fn gjk_query<A, B>(&self, a: &A, b: &B) -> GjkResult
    where
        A: Support + ?Sized,
        B: Support + ?Sized,
    {
        collision::gjk_query(a, b, self.config.gjk_max_iter)
    }

    pub fn gjk_intersects<A, B>(&self, a: &A, b: &B) -> bool
    where
        A: Support + ?Sized,
        B: Support + ?Sized,
    {
        collision::gjk_intersects(a, b, self.config.gjk_max_iter)
    }

    pub fn gjk_query_batch<A, B>(&self, pairs: &[(A, B)]) -> Vec<GjkResult>
    where
        A: Support + Sync,
        B: Support + Sync,
    {
        collision::gjk_query_batch(pairs, self.config.gjk_max_iter)
    }

    pub fn sat_intersects_2d(&self, poly_a: &[Point2<f64>], poly_b: &[Point2<f64>]) -> Result<bool> {
        collision::sat_intersects_2d(poly_a, poly_b)
    }

    pub fn ray_triangle(
        &self,
        origin: &Point3<f64>,
        direction: &Vector3<f64>,
        v0: &Point3<f64>,
        v1: &Point3<f64>,
        v2: &Point3<f64>,
    ) -> Option<RayHit> {
        collision::ray::ray_triangle_with_tolerance(
            origin,
            direction,
            v0,
            v1,
            v2,
            self.config.ray_parallel_epsilon,
            self.config.ray_min_t,
        )
    }

    pub fn point_in_polygon(&self, point: &Point2<f64>, polygon: &[Point2<f64>]) -> bool {
        collision::point_in_polygon(point, polygon)
    }

    pub fn closest_point_on_segment(
        &self,
        point: &Point3<f64>,
        start: &Point3<f64>,
        end: &Point3<f64>,
    ) -> Point3<f64> {
        collision::closest_point_on_segment(point, start, end)
    }
}
