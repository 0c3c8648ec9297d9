// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for adjacency construction and proximity queries

use thiserror::Error;

/// Result alias used across the library
pub type ProximityResult<T> = Result<T, ProximityError>;

/// Why a mesh was rejected as degenerate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Degeneracy {
    #[error("mesh has no vertices")]
    NoVertices,

    #[error("mesh has no faces")]
    NoFaces,

    /// Two corners of the face share a vertex index.
    #[error("face {face} repeats a vertex index")]
    RepeatedVertex { face: usize },

    /// The face spans (nearly) zero area, so its normal is undefined.
    #[error("face {face} has near-zero area")]
    ZeroArea { face: usize },
}

/// Errors raised by the proximity engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProximityError {
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(#[from] Degeneracy),

    #[error("face {face} references vertex {vertex} but the mesh has {vertex_count} vertices")]
    VertexOutOfRange {
        face: usize,
        vertex: usize,
        vertex_count: usize,
    },

    /// The index was built for a different mesh than the one being queried.
    #[error(
        "adjacency index was built for {expected_vertices} vertices / {expected_faces} faces, \
         queried with {vertices} / {faces}; rebuild the index"
    )]
    StaleIndex {
        expected_vertices: usize,
        expected_faces: usize,
        vertices: usize,
        faces: usize,
    },

    #[error("query point ({x}, {y}, {z}) is not finite")]
    NonFinitePoint { x: f64, y: f64, z: f64 },

    /// Minimization produced no candidate. Indicates a bug, not bad input.
    #[error("proximity query produced an empty tie set")]
    EmptyTieSet,
}
