// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel error taxonomy

use thiserror::Error;

/// Result type for kernel operations
pub type Result<T> = std::result::Result<T, KernelError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// Malformed input rejected at the API boundary
    #[error("Invalid input: {0}")]
    InputValidation(String),

    /// Zero-length knot interval met while blending control points
    #[error("Degenerate knot span at index {span}")]
    DegenerateKnotSpan { span: usize },

    /// Zero or near-zero rational weight
    #[error("Invalid NURBS weight: {weight}")]
    InvalidWeight { weight: f64 },

    /// Depth or work budget exhausted
    #[error("Recursion limit of {limit} exceeded")]
    RecursionLimitExceeded { limit: usize },

    /// Boolean output is not a closed 2-manifold
    #[error("Non-manifold geometry: {open_edges} open edges")]
    NonManifoldInput { open_edges: usize },
}

impl KernelError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InputValidation(message.into())
    }
}
