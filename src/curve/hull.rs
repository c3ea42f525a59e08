// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! 2D convex hull (Graham scan)

use crate::error::{KernelError, Result};
use crate::utils::math::cross_2d;
use nalgebra::Point2;
use std::cmp::Ordering;

/// Counter-clockwise convex hull starting at the lowest point (ties: lowest x).
///
/// Collinear boundary points are dropped. Input whose points are all
/// collinear yields the two extreme points; a single distinct point yields
/// itself.
pub fn convex_hull_2d(points: &[Point2<f64>]) -> Result<Vec<Point2<f64>>> {
    if points.is_empty() {
        return Err(KernelError::invalid("convex hull needs at least one point"));
    }
    if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(KernelError::invalid("convex hull input contains non-finite coordinates"));
    }

    let pivot_index = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let pivot = points[pivot_index];

    // Orientation tests multiply coordinate differences; keep them finite
    let extent = points
        .iter()
        .map(|p| (p.x - pivot.x).abs().max((p.y - pivot.y).abs()))
        .fold(0.0_f64, f64::max);
    if !(8.0 * extent * extent).is_finite() {
        return Err(KernelError::invalid(format!(
            "convex hull coordinate extent {} overflows orientation tests",
            extent
        )));
    }

    let mut rest: Vec<Point2<f64>> = points
        .iter()
        .enumerate()
        .filter(|&(i, p)| i != pivot_index && *p != pivot)
        .map(|(_, p)| *p)
        .collect();

    // Polar order around the pivot; collinear points nearest first
    rest.sort_by(|a, b| {
        let turn = cross_2d(&pivot, a, b);
        if turn > 0.0 {
            Ordering::Less
        } else if turn < 0.0 {
            Ordering::Greater
        } else {
            (a - pivot).norm_squared().total_cmp(&(b - pivot).norm_squared())
        }
    });

    let mut hull: Vec<Point2<f64>> = Vec::with_capacity(rest.len() + 1);
    hull.push(pivot);
    for point in rest {
        while hull.len() >= 2 && cross_2d(&hull[hull.len() - 2], &hull[hull.len() - 1], &point) <= 0.0 {
            hull.pop();
        }
        hull.push(point);
    }

    Ok(hull)
}
