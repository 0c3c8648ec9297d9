// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Nearest-edge query

use super::{check_point, classify, EdgeHit, EdgeProximityResult, Proximity};
use crate::config::Tolerance;
use crate::geometry::{AdjacencyIndex, Face};
use crate::utils::math::closest_point_on_segment;
use crate::ProximityResult;
use nalgebra::{Point3, Vector3};
use tracing::trace;

/// Alignment scores closer than this are treated as equal
const ALIGNMENT_TOLERANCE: f64 = 1e-9;

struct Candidate {
    edge: usize,
    parameter: f64,
    point: Point3<f64>,
    distance: f64,
}

/// Find the edge (or tied edges) closest to `point`.
///
/// Each edge is scored by point-to-segment distance. Edges tied at distinct
/// closest points are all reported. When several tied edges reach the same
/// closest point (they meet at a shared vertex), only the edges whose normal
/// best faces the query point are kept. Zero-length edges are skipped.
pub fn nearest_edge_with_tolerance(
    point: &Point3<f64>,
    vertices: &[Point3<f64>],
    faces: &[Face],
    adjacency: &AdjacencyIndex,
    tolerance: Tolerance,
) -> ProximityResult<EdgeProximityResult> {
    check_point(point)?;
    adjacency.check_mesh(vertices, faces)?;

    let candidates: Vec<Candidate> = adjacency
        .edges()
        .iter()
        .enumerate()
        .filter_map(|(edge, key)| {
            let a = &vertices[key.low];
            let b = &vertices[key.high];
            match closest_point_on_segment(point, a, b) {
                Some((parameter, closest)) => Some(Candidate {
                    edge,
                    parameter,
                    point: closest,
                    distance: nalgebra::distance(point, &closest),
                }),
                None => {
                    trace!(edge = %key, "skipping zero-length edge");
                    None
                }
            }
        })
        .collect();

    let minimum = candidates
        .iter()
        .map(|c| c.distance)
        .fold(f64::INFINITY, f64::min);

    let tied: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| tolerance.ties(c.distance, minimum))
        .collect();

    let keep = resolve_coincident(point, &tied, adjacency, tolerance.band(minimum));

    let hits = tied
        .into_iter()
        .zip(keep)
        .filter(|(_, keep)| *keep)
        .map(|(candidate, _)| {
            let side = classify(point, &candidate.point, &adjacency.edge_normal(candidate.edge));
            EdgeHit {
                edge: candidate.edge,
                vertices: adjacency.edge_vertices(candidate.edge).vertices(),
                faces: adjacency.edge_faces(candidate.edge).to_vec(),
                parameter: candidate.parameter,
                distance: side.signum() * candidate.distance,
                point: candidate.point,
                side,
            }
        })
        .collect();

    Proximity::from_hits(hits)
}

/// Mark which tied candidates survive coincident-point refinement.
///
/// Candidates are grouped by closest point (within `band`). A group of one is
/// kept. In a larger group every member shares the same point, so the members
/// are ranked by how well their normal aligns with the offset to the query
/// point and only the best are kept. If the query point sits on that shared
/// point the offset has no direction and the whole group is kept.
fn resolve_coincident(
    point: &Point3<f64>,
    tied: &[Candidate],
    adjacency: &AdjacencyIndex,
    band: f64,
) -> Vec<bool> {
    let mut keep = vec![true; tied.len()];
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for (i, candidate) in tied.iter().enumerate() {
        match groups
            .iter_mut()
            .find(|group| nalgebra::distance(&tied[group[0]].point, &candidate.point) <= band)
        {
            Some(group) => group.push(i),
            None => groups.push(vec![i]),
        }
    }

    for group in groups.into_iter().filter(|group| group.len() > 1) {
        let offset = point - tied[group[0]].point;
        let length = offset.norm();
        if length <= band {
            continue;
        }
        let direction = offset / length;

        let scores: Vec<f64> = group
            .iter()
            .map(|&i| alignment(&direction, &adjacency.edge_normal(tied[i].edge)))
            .collect();
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        for (&i, score) in group.iter().zip(scores) {
            keep[i] = score >= best - ALIGNMENT_TOLERANCE;
        }
    }

    keep
}

/// Cosine between a unit direction and an edge normal; 0 for a vanishing normal
fn alignment(direction: &Vector3<f64>, normal: &Vector3<f64>) -> f64 {
    let length = normal.norm();
    if length == 0.0 {
        0.0
    } else {
        direction.dot(normal) / length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{EdgeKey, Primitive};
    use approx::assert_relative_eq;

    fn octahedron() -> (crate::geometry::Mesh, AdjacencyIndex) {
        let mesh = Primitive::octahedron(1.0).to_mesh();
        let index = AdjacencyIndex::build(&mesh.vertices, &mesh.faces, 1e-12).unwrap();
        (mesh, index)
    }

    fn query(point: Point3<f64>) -> EdgeProximityResult {
        let (mesh, index) = octahedron();
        nearest_edge_with_tolerance(&point, &mesh.vertices, &mesh.faces, &index, Tolerance::default())
            .unwrap()
    }

    #[test]
    fn test_edge_midpoint_outside() {
        // Direction of the midpoint of edge (+x, +y)
        let result = query(Point3::new(2.0, 2.0, 0.0));
        let Proximity::Single(hit) = result else {
            panic!("expected a single winner");
        };
        assert_eq!(hit.vertices, [0, 2]);
        assert_eq!(hit.faces, vec![0, 3]);
        assert_relative_eq!(hit.parameter, 0.5, epsilon = 1e-12);
        assert_relative_eq!(hit.point, Point3::new(0.5, 0.5, 0.0), epsilon = 1e-12);
        assert_relative_eq!(hit.distance, 1.5 * 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_edge_midpoint_inside() {
        let result = query(Point3::new(0.3, 0.3, 0.0));
        let hit = result.first();
        assert!(!result.is_tie());
        assert_eq!(hit.vertices, [0, 2]);
        assert!(hit.side.is_inside());
        assert_relative_eq!(hit.distance, -0.2 * 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_coincident_endpoints_keep_best_aligned() {
        // Straight above the apex: all four apex edges reach the apex, and all
        // face it equally, so all four stay
        let result = query(Point3::new(0.0, 0.0, 2.0));
        assert_eq!(result.len(), 4);
        for hit in &result {
            assert_eq!(hit.point, Point3::new(0.0, 0.0, 1.0));
            assert_eq!(hit.endpoint(), Some(4));
            assert_relative_eq!(hit.distance, 1.0, epsilon = 1e-12);
        }

        // Leaning towards +x: only the edge from the apex to +x faces it best
        let result = query(Point3::new(0.1, 0.0, 2.0));
        let Proximity::Single(hit) = result else {
            panic!("expected a single winner");
        };
        assert_eq!(EdgeKey::new(hit.vertices[0], hit.vertices[1]), EdgeKey::new(0, 4));
    }

    #[test]
    fn test_ties_at_distinct_points_all_reported() {
        // The origin is equally far from the midpoint of every edge
        let result = query(Point3::origin());
        let Proximity::Tied(hits) = result else {
            panic!("expected a tie");
        };
        assert_eq!(hits.len(), 12);
        assert!(hits.windows(2).all(|w| w[0].edge < w[1].edge));

        for (i, hit) in hits.iter().enumerate() {
            assert_relative_eq!(hit.parameter, 0.5, epsilon = 1e-12);
            assert_relative_eq!(hit.distance, -0.5_f64.sqrt(), epsilon = 1e-12);
            assert!(hit.side.is_inside());
            for other in &hits[i + 1..] {
                assert!(nalgebra::distance(&hit.point, &other.point) > 0.5);
            }
        }
    }

    #[test]
    fn test_non_manifold_edge_signed_by_summed_normals() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        // Two fins facing +z and one facing -y share edge (0, 1)
        let faces = vec![[0, 1, 2], [1, 0, 3], [0, 1, 4]];
        let index = AdjacencyIndex::build(&vertices, &faces, 1e-12).unwrap();
        let shared = index.edge_id(0, 1).unwrap();
        assert_relative_eq!(index.edge_normal(shared), Vector3::new(0.0, -1.0, 2.0), epsilon = 1e-12);

        // Straight below the edge: the -y fin alone would call this tangent
        // (outside), the summed normal puts it inside
        let result = nearest_edge_with_tolerance(
            &Point3::new(0.5, 0.0, -1.0),
            &vertices,
            &faces,
            &index,
            Tolerance::default(),
        )
        .unwrap();
        let Proximity::Single(hit) = result else {
            panic!("expected a single winner");
        };
        assert_eq!(hit.edge, shared);
        assert_eq!(hit.faces, vec![0, 1, 2]);
        assert_relative_eq!(hit.point, Point3::new(0.5, 0.0, 0.0), epsilon = 1e-12);
        assert!(hit.side.is_inside());
        assert_relative_eq!(hit.distance, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_boundary_edge_has_sign() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2]];
        let index = AdjacencyIndex::build(&vertices, &faces, 1e-12).unwrap();

        let above = nearest_edge_with_tolerance(
            &Point3::new(0.5, -1.0, 1.0),
            &vertices,
            &faces,
            &index,
            Tolerance::default(),
        )
        .unwrap();
        let hit = above.first();
        assert_eq!(hit.vertices, [0, 1]);
        assert_eq!(hit.faces, vec![0]);
        assert!(hit.distance > 0.0);

        let below = nearest_edge_with_tolerance(
            &Point3::new(0.5, -1.0, -1.0),
            &vertices,
            &faces,
            &index,
            Tolerance::default(),
        )
        .unwrap();
        assert!(below.first().distance < 0.0);
    }
}
