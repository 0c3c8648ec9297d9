// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh statistics reported by the CLI

use super::{AdjacencyIndex, Mesh};
use serde::{Deserialize, Serialize};

/// Geometry and topology summary of an indexed mesh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub face_count: usize,
    pub edge_count: usize,
    pub boundary_edges: usize,
    pub non_manifold_edges: usize,
    /// Every edge shared by exactly two faces
    pub is_closed: bool,
    /// Signed volume; negative means the faces are wound inward
    pub volume: f64,
    pub surface_area: f64,
    /// [min_x, min_y, min_z, max_x, max_y, max_z]
    pub bbox: [f64; 6],
    /// Euler characteristic V - E + F (2 for a closed genus-0 surface)
    pub euler_characteristic: i64,
}

/// Analyze a mesh using its already-built adjacency index
pub fn analyze(mesh: &Mesh, index: &AdjacencyIndex) -> MeshStats {
    let bbox = mesh.bounding_box();
    let vertex_count = mesh.vertex_count();
    let face_count = mesh.face_count();
    let edge_count = index.edge_count();

    MeshStats {
        vertex_count,
        face_count,
        edge_count,
        boundary_edges: index.boundary_edges().count(),
        non_manifold_edges: index.non_manifold_edges().len(),
        is_closed: index.is_closed(),
        volume: mesh.signed_volume(),
        surface_area: mesh.surface_area(),
        bbox: [
            bbox.min.x, bbox.min.y, bbox.min.z, bbox.max.x, bbox.max.y, bbox.max.z,
        ],
        euler_characteristic: vertex_count as i64 - edge_count as i64 + face_count as i64,
    }
}
