// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation and solid booleans

mod bbox;
pub mod bsp;
pub mod csg;
mod mesh;
pub mod mesh_reconstruction;
pub mod parallel_boolean;
pub mod plane;
pub mod polygon;
mod primitives;

pub use bbox::BoundingBox;
pub use bsp::BspTree;
pub use csg::{
    boolean_with_config, csg_intersection, csg_invert, csg_subtraction, csg_union, BooleanOp,
};
pub use mesh::{Face, Mesh};
pub use parallel_boolean::{subtract_all, union_all};
pub use plane::{Plane, PlaneSide, PolygonClass};
pub use polygon::Polygon;
pub use primitives::Primitive;
