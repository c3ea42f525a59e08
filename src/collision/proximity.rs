// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point containment and nearest-point queries

use nalgebra::{Point2, Point3};

/// Segments shorter than this collapse to their start point
const DEGENERATE_SEGMENT: f64 = 1e-12;

/// Even-odd ray casting test. Polygons with fewer than 3 vertices contain nothing.
///
/// Points exactly on the boundary may land on either side.
pub fn point_in_polygon(point: &Point2<f64>, polygon: &[Point2<f64>]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = pi.x + (point.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Closest point to `point` on the segment `start`-`end`
pub fn closest_point_on_segment(
    point: &Point3<f64>,
    start: &Point3<f64>,
    end: &Point3<f64>,
) -> Point3<f64> {
    let segment = end - start;
    let length_sq = segment.norm_squared();
    if length_sq < DEGENERATE_SEGMENT {
        return *start;
    }
    let t = ((point - start).dot(&segment) / length_sq).clamp(0.0, 1.0);
    start + segment * t
}
