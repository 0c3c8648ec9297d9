// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Nearest-vertex query

use super::{check_point, classify, Proximity, VertexHit, VertexProximityResult};
use crate::config::Tolerance;
use crate::geometry::{AdjacencyIndex, Face};
use crate::ProximityResult;
use nalgebra::Point3;

/// Find the vertex (or tied vertices) closest to `point`.
///
/// Every vertex is a candidate. Each hit is signed by the mean normal of the
/// faces around its vertex, so tied hits may carry different signs.
pub fn nearest_vertex_with_tolerance(
    point: &Point3<f64>,
    vertices: &[Point3<f64>],
    faces: &[Face],
    adjacency: &AdjacencyIndex,
    tolerance: Tolerance,
) -> ProximityResult<VertexProximityResult> {
    check_point(point)?;
    adjacency.check_mesh(vertices, faces)?;

    let distances: Vec<f64> = vertices
        .iter()
        .map(|vertex| nalgebra::distance(point, vertex))
        .collect();

    let minimum = distances.iter().copied().fold(f64::INFINITY, f64::min);

    let hits = distances
        .iter()
        .enumerate()
        .filter(|(_, distance)| tolerance.ties(**distance, minimum))
        .map(|(vertex, &distance)| {
            let position = vertices[vertex];
            let side = classify(point, &position, &adjacency.vertex_normal(vertex));
            VertexHit {
                vertex,
                distance: side.signum() * distance,
                point: position,
                side,
                faces: adjacency.vertex_faces(vertex).to_vec(),
            }
        })
        .collect();

    Proximity::from_hits(hits)
}
