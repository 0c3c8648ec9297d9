// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Nearest-feature queries against a triangle mesh.
//!
//! Both queries evaluate every candidate feature exactly; there is no spatial
//! acceleration. They are low-level primitives: a point lying on a face
//! interior still reports its distance to the nearest vertex or edge, not zero.
//!
//! Signs come from local normals only. A vertex is signed by the mean normal of
//! its faces, an edge by the sum of the normals of its faces. Points on the
//! tangent plane count as outside.

mod edge;
mod result;
mod sign;
mod vertex;

pub use edge::nearest_edge_with_tolerance;
pub use result::{EdgeHit, EdgeProximityResult, Proximity, VertexHit, VertexProximityResult};
pub use sign::{classify, Side};
pub use vertex::nearest_vertex_with_tolerance;

use crate::config::{ProximityConfig, Tolerance};
use crate::error::{ProximityError, ProximityResult};
use crate::geometry::{AdjacencyIndex, Face};
use nalgebra::Point3;

/// Build the adjacency index with the default degenerate-face tolerance
pub fn build_adjacency(vertices: &[Point3<f64>], faces: &[Face]) -> ProximityResult<AdjacencyIndex> {
    AdjacencyIndex::build(
        vertices,
        faces,
        ProximityConfig::default().degenerate_tolerance,
    )
}

/// Nearest vertex (or tied vertices) with the default tie tolerance
pub fn nearest_vertex(
    point: &Point3<f64>,
    vertices: &[Point3<f64>],
    faces: &[Face],
    adjacency: &AdjacencyIndex,
) -> ProximityResult<VertexProximityResult> {
    nearest_vertex_with_tolerance(point, vertices, faces, adjacency, Tolerance::default())
}

/// Nearest edge (or tied edges) with the default tie tolerance
pub fn nearest_edge(
    point: &Point3<f64>,
    vertices: &[Point3<f64>],
    faces: &[Face],
    adjacency: &AdjacencyIndex,
) -> ProximityResult<EdgeProximityResult> {
    nearest_edge_with_tolerance(point, vertices, faces, adjacency, Tolerance::default())
}

fn check_point(point: &Point3<f64>) -> ProximityResult<()> {
    if point.coords.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(ProximityError::NonFinitePoint {
            x: point.x,
            y: point.y,
            z: point.z,
        })
    }
}
