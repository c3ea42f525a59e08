// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Non-rational B-spline evaluation and knot insertion

use crate::error::{KernelError, Result};
use crate::utils::math::lerp_point;
use nalgebra::Point3;
use std::ops::{Add, Mul};

/// Knot intervals shorter than this are treated as zero length
pub const KNOT_EPSILON: f64 = 1e-12;

/// Check degree, control-point count, knot count and knot monotonicity
pub fn validate_knots(degree: usize, control_count: usize, knots: &[f64]) -> Result<()> {
    if degree == 0 {
        return Err(KernelError::invalid("degree must be at least 1"));
    }
    if control_count <= degree {
        return Err(KernelError::invalid(format!(
            "degree {} needs at least {} control points, got {}",
            degree,
            degree + 1,
            control_count
        )));
    }
    let expected = control_count + degree + 1;
    if knots.len() != expected {
        return Err(KernelError::invalid(format!(
            "knot vector length must be {}, got {}",
            expected,
            knots.len()
        )));
    }
    if knots.iter().any(|k| !k.is_finite()) {
        return Err(KernelError::invalid("knot vector contains non-finite values"));
    }
    if knots.windows(2).any(|pair| pair[1] < pair[0]) {
        return Err(KernelError::invalid("knot vector must be non-decreasing"));
    }
    Ok(())
}

/// Parametric domain `[knots[p], knots[n + 1]]`
pub fn domain(degree: usize, control_count: usize, knots: &[f64]) -> (f64, f64) {
    (knots[degree], knots[control_count])
}

/// Knot span index `k` with `knots[k] <= t < knots[k + 1]`, clamped to the domain.
///
/// `last` is the index of the final control point.
pub fn find_span(t: f64, degree: usize, last: usize, knots: &[f64]) -> usize {
    if t >= knots[last + 1] {
        return last;
    }
    if t <= knots[degree] {
        return degree;
    }

    let mut low = degree;
    let mut high = last + 1;
    let mut mid = (low + high) / 2;
    while t < knots[mid] || t >= knots[mid + 1] {
        if t < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
        mid = (low + high) / 2;
    }
    mid
}

/// Cox–de Boor basis function `N_{i,p}(t)`; zero outside its support.
///
/// At the right end of the domain the last non-empty span is closed so the
/// basis still sums to one there.
pub fn basis_function(i: usize, degree: usize, knots: &[f64], t: f64) -> f64 {
    if i + degree + 1 >= knots.len() {
        return 0.0;
    }

    if degree == 0 {
        let end = knots[knots.len() - 1];
        let inside = knots[i] <= t && t < knots[i + 1];
        let closes_domain = t == end && knots[i] < knots[i + 1] && knots[i + 1] == end;
        return if inside || closes_domain { 1.0 } else { 0.0 };
    }

    let mut value = 0.0;
    let left_span = knots[i + degree] - knots[i];
    if left_span > 0.0 {
        value += (t - knots[i]) / left_span * basis_function(i, degree - 1, knots, t);
    }
    let right_span = knots[i + degree + 1] - knots[i + 1];
    if right_span > 0.0 {
        value += (knots[i + degree + 1] - t) / right_span
            * basis_function(i + 1, degree - 1, knots, t);
    }
    value
}

/// De Boor blending over the `degree + 1` control values of `span`.
///
/// Generic so the rational evaluators can run it in homogeneous space.
pub(crate) fn de_boor<V>(
    t: f64,
    degree: usize,
    knots: &[f64],
    span: usize,
    control: &[V],
    epsilon: f64,
) -> Result<V>
where
    V: Copy + Add<Output = V> + Mul<f64, Output = V>,
{
    let p = degree;
    let mut d: Vec<V> = (0..=p).map(|j| control[j + span - p]).collect();

    for r in 1..=p {
        for j in (r..=p).rev() {
            let left = knots[j + span - p];
            let right = knots[j + 1 + span - r];
            let denom = right - left;
            if !(denom.abs() >= epsilon) {
                return Err(KernelError::DegenerateKnotSpan { span });
            }
            let alpha = (t - left) / denom;
            d[j] = d[j - 1] * (1.0 - alpha) + d[j] * alpha;
        }
    }

    Ok(d[p])
}

/// Evaluate a B-spline curve at `t`, clamped to the parametric domain
pub fn evaluate_bspline(
    t: f64,
    degree: usize,
    control_points: &[Point3<f64>],
    knots: &[f64],
) -> Result<Point3<f64>> {
    evaluate_bspline_with_epsilon(t, degree, control_points, knots, KNOT_EPSILON)
}

/// [`evaluate_bspline`] with an explicit knot-span tolerance; spans shorter
/// than `epsilon` fail with `DegenerateKnotSpan`
pub fn evaluate_bspline_with_epsilon(
    t: f64,
    degree: usize,
    control_points: &[Point3<f64>],
    knots: &[f64],
    epsilon: f64,
) -> Result<Point3<f64>> {
    if !t.is_finite() {
        return Err(KernelError::invalid(format!("parameter {} is not finite", t)));
    }
    validate_knots(degree, control_points.len(), knots)?;

    let last = control_points.len() - 1;
    let span = find_span(t, degree, last, knots);
    let coords: Vec<_> = control_points.iter().map(|p| p.coords).collect();
    let value = de_boor(t, degree, knots, span, &coords, epsilon)?;
    Ok(Point3::from(value))
}

/// Insert knot `u` once (Boehm), returning the refined control polygon and knots.
///
/// The curve shape is unchanged. `u` must lie strictly inside the domain and
/// its multiplicity must stay at or below the degree.
pub fn insert_knot(
    u: f64,
    control_points: &[Point3<f64>],
    knots: &[f64],
    degree: usize,
) -> Result<(Vec<Point3<f64>>, Vec<f64>)> {
    validate_knots(degree, control_points.len(), knots)?;
    let p = degree;
    let last = control_points.len() - 1;
    let (start, end) = domain(p, control_points.len(), knots);
    if !(u > start && u < end) {
        return Err(KernelError::invalid(format!(
            "knot {} must lie strictly inside the domain [{}, {}]",
            u, start, end
        )));
    }

    let k = find_span(u, p, last, knots);
    let multiplicity = knots.iter().filter(|&&knot| knot == u).count();
    if multiplicity >= p {
        return Err(KernelError::invalid(format!(
            "knot {} already has multiplicity {}, degree is {}",
            u, multiplicity, p
        )));
    }

    let mut points = Vec::with_capacity(control_points.len() + 1);
    for i in 0..=last + 1 {
        if i <= k - p {
            points.push(control_points[i]);
        } else if i > k - multiplicity {
            points.push(control_points[i - 1]);
        } else {
            let alpha = (u - knots[i]) / (knots[i + p] - knots[i]);
            points.push(lerp_point(&control_points[i - 1], &control_points[i], alpha));
        }
    }

    let mut refined = Vec::with_capacity(knots.len() + 1);
    refined.extend_from_slice(&knots[..=k]);
    refined.push(u);
    refined.extend_from_slice(&knots[k + 1..]);

    Ok((points, refined))
}
