// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Rational (NURBS) curve and tensor-product surface evaluation
//!
//! Control points are lifted to homogeneous coordinates `(x·w, y·w, z·w, w)`,
//! blended with the non-rational de Boor scheme, then projected back.

use super::bspline::{de_boor, find_span, validate_knots, KNOT_EPSILON};
use crate::error::{KernelError, Result};
use nalgebra::{Point3, Vector4};
use serde::{Deserialize, Serialize};

/// Weights with magnitude below this are rejected
pub const WEIGHT_EPSILON: f64 = 1e-12;

/// Control point with rational weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedPoint {
    pub point: Point3<f64>,
    pub weight: f64,
}

impl WeightedPoint {
    pub fn new(point: Point3<f64>, weight: f64) -> Self {
        Self { point, weight }
    }

    pub fn unweighted(point: Point3<f64>) -> Self {
        Self { point, weight: 1.0 }
    }

    fn homogeneous(&self) -> Vector4<f64> {
        let p = self.point.coords * self.weight;
        Vector4::new(p.x, p.y, p.z, self.weight)
    }
}

/// Rows along U, columns along V
pub type ControlNet = Vec<Vec<WeightedPoint>>;

fn check_weight(weight: f64, epsilon: f64) -> Result<()> {
    if !(weight.is_finite() && weight.abs() >= epsilon) {
        return Err(KernelError::InvalidWeight { weight });
    }
    Ok(())
}

fn check_parameter(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(KernelError::invalid(format!("parameter {} = {} is not finite", name, value)));
    }
    Ok(())
}

fn project(h: Vector4<f64>, epsilon: f64) -> Result<Point3<f64>> {
    check_weight(h.w, epsilon)?;
    Ok(Point3::new(h.x / h.w, h.y / h.w, h.z / h.w))
}

/// Blend homogeneous control values along one parametric direction
fn blend(
    t: f64,
    degree: usize,
    knots: &[f64],
    control: &[Vector4<f64>],
    knot_epsilon: f64,
) -> Result<Vector4<f64>> {
    let span = find_span(t, degree, control.len() - 1, knots);
    de_boor(t, degree, knots, span, control, knot_epsilon)
}

/// Evaluate a rational B-spline curve
pub fn evaluate_nurbs_curve(
    t: f64,
    degree: usize,
    control_points: &[WeightedPoint],
    knots: &[f64],
) -> Result<Point3<f64>> {
    check_parameter("t", t)?;
    validate_knots(degree, control_points.len(), knots)?;
    for cp in control_points {
        check_weight(cp.weight, WEIGHT_EPSILON)?;
    }

    let homogeneous: Vec<Vector4<f64>> = control_points.iter().map(|cp| cp.homogeneous()).collect();
    let h = blend(t, degree, knots, &homogeneous, KNOT_EPSILON)?;
    project(h, WEIGHT_EPSILON)
}

/// Evaluate a NURBS surface at `(u, v)`.
///
/// `control_net[i][j]` is the control point at row `i` along U and column
/// `j` along V. Each of the V columns is evaluated as a curve in U, the
/// resulting homogeneous points are blended along V, then divided by `w`.
pub fn evaluate_nurbs_surface(
    u: f64,
    v: f64,
    control_net: &[Vec<WeightedPoint>],
    knots_u: &[f64],
    knots_v: &[f64],
    degree_u: usize,
    degree_v: usize,
) -> Result<Point3<f64>> {
    evaluate_nurbs_surface_with_epsilon(
        u,
        v,
        control_net,
        knots_u,
        knots_v,
        degree_u,
        degree_v,
        KNOT_EPSILON,
        WEIGHT_EPSILON,
    )
}

/// [`evaluate_nurbs_surface`] with explicit knot-span and weight tolerances
#[allow(clippy::too_many_arguments)]
pub fn evaluate_nurbs_surface_with_epsilon(
    u: f64,
    v: f64,
    control_net: &[Vec<WeightedPoint>],
    knots_u: &[f64],
    knots_v: &[f64],
    degree_u: usize,
    degree_v: usize,
    knot_epsilon: f64,
    weight_epsilon: f64,
) -> Result<Point3<f64>> {
    check_parameter("u", u)?;
    check_parameter("v", v)?;

    let rows = control_net.len();
    let columns = control_net.first().map_or(0, Vec::len);
    if let Some(row) = control_net.iter().position(|row| row.len() != columns) {
        return Err(KernelError::invalid(format!(
            "control net row {} has {} points, expected {}",
            row,
            control_net[row].len(),
            columns
        )));
    }
    validate_knots(degree_u, rows, knots_u)?;
    validate_knots(degree_v, columns, knots_v)?;

    for row in control_net {
        for cp in row {
            check_weight(cp.weight, weight_epsilon)?;
        }
    }

    let mut along_v = Vec::with_capacity(columns);
    let mut column = Vec::with_capacity(rows);
    for j in 0..columns {
        column.clear();
        column.extend(control_net.iter().map(|row| row[j].homogeneous()));
        along_v.push(blend(u, degree_u, knots_u, &column, knot_epsilon)?);
    }

    let h = blend(v, degree_v, knots_v, &along_v, knot_epsilon)?;
    project(h, weight_epsilon)
}
