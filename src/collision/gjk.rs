// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Gilbert–Johnson–Keerthi intersection test
//!
//! The simplex lives in Minkowski-difference space `A - B`; the shapes
//! intersect exactly when that set contains the origin.

use super::support::Support;
use crate::geometry::Plane;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Default iteration cap
pub const DEFAULT_MAX_ITER: usize = 50;

/// Squared length below which a search direction is treated as zero
const DEGENERATE_EPSILON: f64 = 1e-12;

/// Outcome of a GJK query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GjkResult {
    /// The Minkowski difference contains the origin (touching included)
    Intersecting,
    /// A separating direction was found
    Separated,
    /// The iteration cap was reached first
    Inconclusive,
}

impl GjkResult {
    pub fn is_intersecting(self) -> bool {
        self == GjkResult::Intersecting
    }
}

fn minkowski_support<A, B>(a: &A, b: &B, direction: &Vector3<f64>) -> Vector3<f64>
where
    A: Support + ?Sized,
    B: Support + ?Sized,
{
    a.support(direction) - b.support(&-direction)
}

/// Run GJK for at most `max_iter` support evaluations after the first.
pub fn gjk_query<A, B>(a: &A, b: &B, max_iter: usize) -> GjkResult
where
    A: Support + ?Sized,
    B: Support + ?Sized,
{
    let mut direction = Vector3::x();
    let first = minkowski_support(a, b, &direction);
    if first.norm_squared() < DEGENERATE_EPSILON {
        return GjkResult::Intersecting;
    }

    let mut simplex: Vec<Vector3<f64>> = Vec::with_capacity(4);
    simplex.push(first);
    direction = -first;

    for _ in 0..max_iter {
        let point = minkowski_support(a, b, &direction);
        if point.dot(&direction) < 0.0 {
            return GjkResult::Separated;
        }
        simplex.push(point);
        if do_simplex(&mut simplex, &mut direction) {
            return GjkResult::Intersecting;
        }
        if direction.norm_squared() < DEGENERATE_EPSILON {
            return GjkResult::Intersecting;
        }
    }

    tracing::warn!(max_iter, "GJK did not converge; result is inconclusive");
    GjkResult::Inconclusive
}

/// Boolean form of [`gjk_query`]; an inconclusive run reports no intersection.
pub fn gjk_intersects<A, B>(a: &A, b: &B, max_iter: usize) -> bool
where
    A: Support + ?Sized,
    B: Support + ?Sized,
{
    gjk_query(a, b, max_iter).is_intersecting()
}

/// Evaluate many independent pairs in parallel
pub fn gjk_query_batch<A, B>(pairs: &[(A, B)], max_iter: usize) -> Vec<GjkResult>
where
    A: Support + Sync,
    B: Support + Sync,
{
    pairs
        .par_iter()
        .map(|(a, b)| gjk_query(a, b, max_iter))
        .collect()
}

/// Reduce the simplex to the feature nearest the origin and update the
/// search direction. Returns `true` once the origin is enclosed.
///
/// The newest point is always last.
fn do_simplex(simplex: &mut Vec<Vector3<f64>>, direction: &mut Vector3<f64>) -> bool {
    match simplex.len() {
        2 => line_case(simplex, direction),
        3 => triangle_case(simplex, direction),
        4 => tetrahedron_case(simplex, direction),
        _ => false,
    }
}

fn line_case(simplex: &mut Vec<Vector3<f64>>, direction: &mut Vector3<f64>) -> bool {
    let a = simplex[1];
    let b = simplex[0];
    let ab = b - a;
    let ao = -a;

    if ab.dot(&ao) > 0.0 {
        *direction = ab.cross(&ao).cross(&ab);
        // Zero perpendicular: the origin lies on the segment
        direction.norm_squared() < DEGENERATE_EPSILON
    } else {
        *simplex = vec![a];
        *direction = ao;
        false
    }
}

fn triangle_case(simplex: &mut Vec<Vector3<f64>>, direction: &mut Vector3<f64>) -> bool {
    let a = simplex[2];
    let b = simplex[1];
    let c = simplex[0];
    let ab = b - a;
    let ac = c - a;
    let ao = -a;
    let abc = ab.cross(&ac);

    if abc.norm_squared() < DEGENERATE_EPSILON {
        *simplex = vec![b, a];
        return line_case(simplex, direction);
    }

    if abc.cross(&ac).dot(&ao) > 0.0 {
        if ac.dot(&ao) > 0.0 {
            *simplex = vec![c, a];
            *direction = ac.cross(&ao).cross(&ac);
            return direction.norm_squared() < DEGENERATE_EPSILON;
        }
        *simplex = vec![b, a];
        return line_case(simplex, direction);
    }

    if ab.cross(&abc).dot(&ao) > 0.0 {
        *simplex = vec![b, a];
        return line_case(simplex, direction);
    }

    let side = abc.dot(&ao);
    if side > 0.0 {
        *direction = abc;
    } else if side < 0.0 {
        *simplex = vec![b, c, a];
        *direction = -abc;
    } else {
        return true;
    }
    false
}

fn tetrahedron_case(simplex: &mut Vec<Vector3<f64>>, direction: &mut Vector3<f64>) -> bool {
    let a = simplex[3];
    let b = simplex[2];
    let c = simplex[1];
    let d = simplex[0];

    let volume = (b - a).cross(&(c - a)).dot(&(d - a));
    if volume.abs() < DEGENERATE_EPSILON {
        // Flat: drop the oldest point
        *simplex = vec![c, b, a];
        return triangle_case(simplex, direction);
    }

    let origin = Point3::origin();
    let apex = Point3::from(a);
    for (p, q, opposite) in [(b, c, d), (c, d, b), (d, b, c)] {
        let Some(mut face) = Plane::from_points(&apex, &Point3::from(p), &Point3::from(q)) else {
            continue;
        };
        if face.signed_distance(&Point3::from(opposite)) > 0.0 {
            face.flip();
        }
        if face.signed_distance(&origin) > 0.0 {
            *simplex = vec![q, p, a];
            return triangle_case(simplex, direction);
        }
    }

    true
}
