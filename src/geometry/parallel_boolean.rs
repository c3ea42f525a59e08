// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parallel boolean reduction using rayon

use super::csg::{boolean_with_config, BooleanOp};
use super::Mesh;
use crate::config::KernelConfig;
use crate::error::{KernelError, Result};
use rayon::prelude::*;

/// Union of many solids as a parallel tree reduction
pub fn union_all(meshes: Vec<Mesh>, config: &KernelConfig) -> Result<Mesh> {
    meshes
        .into_par_iter()
        .map(Ok::<Mesh, KernelError>)
        .try_reduce(Mesh::empty, |acc, mesh| {
            boolean_with_config(&acc, &mesh, BooleanOp::Union, config)
        })
}

/// First mesh minus every other mesh.
///
/// The subtrahends are unioned in parallel first, then removed in one pass.
pub fn subtract_all(meshes: Vec<Mesh>, config: &KernelConfig) -> Result<Mesh> {
    let mut iter = meshes.into_iter();
    let Some(base) = iter.next() else {
        return Ok(Mesh::empty());
    };
    let tools = union_all(iter.collect(), config)?;
    boolean_with_config(&base, &tools, BooleanOp::Subtraction, config)
}
