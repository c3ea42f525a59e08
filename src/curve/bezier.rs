// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bezier evaluation, subdivision and curve/curve intersection

use crate::error::{KernelError, Result};
use crate::geometry::BoundingBox;
use crate::utils::math::lerp_point;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Hits closer than this many tolerances are merged
const DEDUP_FACTOR: f64 = 8.0;

/// Default work budget for [`intersect_beziers`]
pub const DEFAULT_MAX_SUBDIVISIONS: usize = 100_000;

/// One curve/curve intersection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveIntersection {
    pub t_a: f64,
    pub t_b: f64,
    pub point: Point3<f64>,
}

/// Intersections plus the caveats of a bounded search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntersectionReport {
    pub intersections: Vec<CurveIntersection>,
    /// Branches abandoned at the depth cap; their hits are omitted
    pub truncated_branches: usize,
    /// The total subdivision budget ran out before the search finished
    pub budget_exhausted: bool,
}

fn check_parameter(t: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&t) {
        return Err(KernelError::invalid(format!("Bezier parameter {} outside [0, 1]", t)));
    }
    Ok(())
}

/// Evaluate a Bezier curve with de Casteljau's algorithm
pub fn evaluate_bezier(t: f64, control_points: &[Point3<f64>]) -> Result<Point3<f64>> {
    if control_points.is_empty() {
        return Err(KernelError::invalid("Bezier curve needs at least one control point"));
    }
    check_parameter(t)?;

    let mut points = control_points.to_vec();
    for level in (1..points.len()).rev() {
        for i in 0..level {
            points[i] = lerp_point(&points[i], &points[i + 1], t);
        }
    }
    Ok(points[0])
}

/// Split a Bezier curve at `t` into two curves of the same degree
pub fn split_bezier(
    control_points: &[Point3<f64>],
    t: f64,
) -> Result<(Vec<Point3<f64>>, Vec<Point3<f64>>)> {
    if control_points.is_empty() {
        return Err(KernelError::invalid("Bezier curve needs at least one control point"));
    }
    check_parameter(t)?;
    Ok(split_unchecked(control_points, t))
}

fn split_unchecked(control_points: &[Point3<f64>], t: f64) -> (Vec<Point3<f64>>, Vec<Point3<f64>>) {
    let n = control_points.len();
    let mut left = Vec::with_capacity(n);
    let mut right = Vec::with_capacity(n);
    let mut points = control_points.to_vec();

    left.push(points[0]);
    right.push(points[n - 1]);
    for level in (1..n).rev() {
        for i in 0..level {
            points[i] = lerp_point(&points[i], &points[i + 1], t);
        }
        left.push(points[0]);
        right.push(points[level - 1]);
    }
    right.reverse();
    (left, right)
}

/// Bounding box of the control polygon, which encloses the curve
pub fn bezier_bounding_box(control_points: &[Point3<f64>]) -> BoundingBox {
    BoundingBox::from_points(control_points)
}

#[derive(Debug, Clone)]
struct Piece {
    points: Vec<Point3<f64>>,
    t0: f64,
    t1: f64,
    bbox: BoundingBox,
}

impl Piece {
    fn new(points: Vec<Point3<f64>>, t0: f64, t1: f64) -> Self {
        let bbox = bezier_bounding_box(&points);
        Self { points, t0, t1, bbox }
    }

    fn halves(&self) -> (Piece, Piece) {
        let mid = 0.5 * (self.t0 + self.t1);
        let (left, right) = split_unchecked(&self.points, 0.5);
        (Piece::new(left, self.t0, mid), Piece::new(right, mid, self.t1))
    }

    fn mid_parameter(&self) -> f64 {
        0.5 * (self.t0 + self.t1)
    }
}

/// Intersect two Bezier curves by recursive bounding-box subdivision.
///
/// Branches that reach `max_iter` subdivisions without both boxes shrinking
/// below `tolerance` are dropped, so tangential or overlapping curves may be
/// under-reported.
pub fn intersect_beziers(
    curve_a: &[Point3<f64>],
    curve_b: &[Point3<f64>],
    tolerance: f64,
    max_iter: usize,
) -> Result<Vec<CurveIntersection>> {
    intersect_beziers_detailed(curve_a, curve_b, tolerance, max_iter, DEFAULT_MAX_SUBDIVISIONS)
        .map(|report| report.intersections)
}

/// [`intersect_beziers`] with an explicit work budget and caveat report
pub fn intersect_beziers_detailed(
    curve_a: &[Point3<f64>],
    curve_b: &[Point3<f64>],
    tolerance: f64,
    max_iter: usize,
    max_subdivisions: usize,
) -> Result<IntersectionReport> {
    if curve_a.is_empty() || curve_b.is_empty() {
        return Err(KernelError::invalid("Bezier curves need at least one control point"));
    }
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(KernelError::invalid(format!("tolerance {} must be positive", tolerance)));
    }

    let mut report = IntersectionReport::default();
    let mut visited = 0usize;
    let mut stack = vec![(
        Piece::new(curve_a.to_vec(), 0.0, 1.0),
        Piece::new(curve_b.to_vec(), 0.0, 1.0),
        0usize,
    )];

    while let Some((a, b, depth)) = stack.pop() {
        visited += 1;
        if visited > max_subdivisions {
            tracing::warn!(max_subdivisions, "Bezier intersection budget exhausted");
            report.budget_exhausted = true;
            break;
        }

        if !a.bbox.intersects(&b.bbox, tolerance) {
            continue;
        }

        let extent_a = a.bbox.max_extent();
        let extent_b = b.bbox.max_extent();
        if extent_a < tolerance && extent_b < tolerance {
            let t_a = a.mid_parameter();
            let t_b = b.mid_parameter();
            let point = evaluate_bezier(t_a, curve_a)?;
            let duplicate = report
                .intersections
                .iter()
                .any(|hit| (hit.point - point).norm() < DEDUP_FACTOR * tolerance);
            if !duplicate {
                report.intersections.push(CurveIntersection { t_a, t_b, point });
            }
            continue;
        }

        if depth >= max_iter {
            report.truncated_branches += 1;
            continue;
        }

        if extent_a >= extent_b {
            let (left, right) = a.halves();
            stack.push((left, b.clone(), depth + 1));
            stack.push((right, b, depth + 1));
        } else {
            let (left, right) = b.halves();
            stack.push((a.clone(), left, depth + 1));
            stack.push((a, right, depth + 1));
        }
    }

    if report.truncated_branches > 0 {
        tracing::debug!(
            branches = report.truncated_branches,
            max_iter,
            "Bezier intersection branches truncated at depth cap"
        );
    }

    report
        .intersections
        .sort_by(|x, y| x.t_a.total_cmp(&y.t_a));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_degree_one_is_lerp() {
        let p0 = Point3::new(1.0, -2.0, 0.5);
        let p1 = Point3::new(4.0, 2.0, -1.5);
        for step in 0..=8 {
            let t = step as f64 / 8.0;
            let point = evaluate_bezier(t, &[p0, p1]).unwrap();
            assert_relative_eq!(point, p0 + (p1 - p0) * t, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_point_curve() {
        let p = Point3::new(3.0, 2.0, 1.0);
        assert_eq!(evaluate_bezier(0.7, &[p]).unwrap(), p);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(evaluate_bezier(0.5, &[]).is_err());
        assert!(evaluate_bezier(1.5, &[Point3::origin()]).is_err());
        assert!(evaluate_bezier(f64::NAN, &[Point3::origin()]).is_err());
    }

    #[test]
    fn test_split_halves_trace_curve() {
        let curve = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 3.0, 0.0),
            Point3::new(3.0, -1.0, 1.0),
            Point3::new(4.0, 2.0, 0.0),
        ];
        let (left, right) = split_bezier(&curve, 0.4).unwrap();
        for step in 0..=10 {
            let s = step as f64 / 10.0;
            let on_left = evaluate_bezier(s, &left).unwrap();
            let on_right = evaluate_bezier(s, &right).unwrap();
            assert_relative_eq!(on_left, evaluate_bezier(0.4 * s, &curve).unwrap(), epsilon = 1e-12);
            assert_relative_eq!(
                on_right,
                evaluate_bezier(0.4 + 0.6 * s, &curve).unwrap(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_crossing_lines() {
        let a = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 0.0)];
        let b = [Point3::new(0.0, 2.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        let hits = intersect_beziers(&a, &b, 1e-6, 50).unwrap();
        assert_eq!(hits.len(), 1);
        assert!((hits[0].t_a - 0.5).abs() < 1e-5);
        assert!((hits[0].t_b - 0.5).abs() < 1e-5);
        assert!((hits[0].point - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_parabola_and_line() {
        let parabola = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ];
        let line = [Point3::new(0.0, 0.5, 0.0), Point3::new(2.0, 0.5, 0.0)];
        let hits = intersect_beziers(&parabola, &line, 1e-6, 50).unwrap();

        assert_eq!(hits.len(), 2);
        let root = 0.5_f64.sqrt() / 2.0;
        assert!((hits[0].t_a - (0.5 - root)).abs() < 1e-5);
        assert!((hits[1].t_a - (0.5 + root)).abs() < 1e-5);
        for hit in &hits {
            assert!((hit.point.y - 0.5).abs() < 1e-5);
            assert!((hit.t_b - hit.point.x / 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_disjoint_curves() {
        let a = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)];
        let b = [Point3::new(0.0, 1.0, 0.0), Point3::new(1.0, 1.0, 0.0)];
        assert!(intersect_beziers(&a, &b, 1e-6, 50).unwrap().is_empty());
    }

    #[test]
    fn test_overlapping_curves_stay_bounded() {
        let a = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        let b = [Point3::new(1.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0)];
        let report = intersect_beziers_detailed(&a, &b, 1e-6, 50, 1_000).unwrap();
        assert!(report.budget_exhausted);
    }

    #[test]
    fn test_depth_cap_drops_branch() {
        let a = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 0.0)];
        let b = [Point3::new(0.0, 2.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
        let report = intersect_beziers_detailed(&a, &b, 1e-7, 4, DEFAULT_MAX_SUBDIVISIONS).unwrap();
        assert!(report.intersections.is_empty());
        assert!(report.truncated_branches > 0);
    }
}
