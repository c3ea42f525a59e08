// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Collision and proximity queries

pub mod gjk;
pub mod proximity;
pub mod ray;
pub mod sat;
pub mod support;

pub use gjk::{gjk_intersects, gjk_query, gjk_query_batch, GjkResult};
pub use proximity::{closest_point_on_segment, point_in_polygon};
pub use ray::{ray_triangle, RayHit};
pub use sat::sat_intersects_2d;
pub use support::{ConvexShape, Support};
