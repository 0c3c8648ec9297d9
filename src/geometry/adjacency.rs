// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Incidence maps between vertices, undirected edges and faces.
//!
//! The index is derived once from a vertex/face set and then shared read-only
//! by every proximity query against that mesh. It records:
//!
//! - vertex -> incident faces
//! - edge -> its two endpoint vertices
//! - edge -> incident faces (two on a closed manifold, one on a boundary)
//! - face -> outward unit normal
//!
//! Edge ids are positions in the edge list, which is sorted by [`EdgeKey`].

use super::Face;
use crate::error::{Degeneracy, ProximityError, ProximityResult};
use crate::utils::math::triangle_normal;
use ahash::AHashMap;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Undirected edge as an ordered vertex pair (`low < high`)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EdgeKey {
    pub low: usize,
    pub high: usize,
}

impl EdgeKey {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn vertices(&self) -> [usize; 2] {
        [self.low, self.high]
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.low, self.high)
    }
}

/// Face incidences gathered from a subset of faces
struct Incidence {
    vertex_faces: Vec<Vec<usize>>,
    edge_faces: AHashMap<EdgeKey, Vec<usize>>,
}

impl Incidence {
    fn new(vertex_count: usize) -> Self {
        Self {
            vertex_faces: vec![Vec::new(); vertex_count],
            edge_faces: AHashMap::new(),
        }
    }

    fn record(&mut self, face_index: usize, face: &Face) {
        for corner in 0..3 {
            let from = face[corner];
            let to = face[(corner + 1) % 3];
            self.vertex_faces[from].push(face_index);
            self.edge_faces
                .entry(EdgeKey::new(from, to))
                .or_default()
                .push(face_index);
        }
    }

    fn merge(mut self, other: Self) -> Self {
        for (mine, theirs) in self.vertex_faces.iter_mut().zip(other.vertex_faces) {
            mine.extend(theirs);
        }
        for (key, faces) in other.edge_faces {
            self.edge_faces.entry(key).or_default().extend(faces);
        }
        self
    }
}

/// Read-only topology and normals of a triangle mesh
#[derive(Debug, Clone)]
pub struct AdjacencyIndex {
    vertex_faces: Vec<Vec<usize>>,
    edges: Vec<EdgeKey>,
    edge_faces: Vec<Vec<usize>>,
    edge_ids: AHashMap<EdgeKey, usize>,
    face_normals: Vec<Vector3<f64>>,
    non_manifold: Vec<usize>,
}

impl AdjacencyIndex {
    /// Build the index in a single pass over the faces.
    ///
    /// Fails with [`ProximityError::DegenerateGeometry`] for an empty mesh, a
    /// face that repeats a vertex, or a face whose area is within
    /// `degenerate_tolerance` of zero (relative to its longest edge squared).
    pub fn build(
        vertices: &[Point3<f64>],
        faces: &[Face],
        degenerate_tolerance: f64,
    ) -> ProximityResult<Self> {
        check_not_empty(vertices, faces)?;

        let face_normals = faces
            .iter()
            .enumerate()
            .map(|(f, face)| face_normal(vertices, f, face, degenerate_tolerance))
            .collect::<ProximityResult<Vec<_>>>()?;

        let mut incidence = Incidence::new(vertices.len());
        for (f, face) in faces.iter().enumerate() {
            incidence.record(f, face);
        }

        Ok(Self::finish(incidence, face_normals))
    }

    /// Same result as [`build`](Self::build), with faces processed on the
    /// rayon pool and per-worker partial maps merged at the end.
    pub fn build_parallel(
        vertices: &[Point3<f64>],
        faces: &[Face],
        degenerate_tolerance: f64,
    ) -> ProximityResult<Self> {
        check_not_empty(vertices, faces)?;

        // Collect per face first so the reported error is the lowest failing face
        let face_normals = faces
            .par_iter()
            .enumerate()
            .map(|(f, face)| face_normal(vertices, f, face, degenerate_tolerance))
            .collect::<Vec<_>>()
            .into_iter()
            .collect::<ProximityResult<Vec<_>>>()?;

        let vertex_count = vertices.len();
        let incidence = faces
            .par_iter()
            .enumerate()
            .fold(
                || Incidence::new(vertex_count),
                |mut acc, (f, face)| {
                    acc.record(f, face);
                    acc
                },
            )
            .reduce(|| Incidence::new(vertex_count), Incidence::merge);

        Ok(Self::finish(incidence, face_normals))
    }

    fn finish(incidence: Incidence, face_normals: Vec<Vector3<f64>>) -> Self {
        let Incidence {
            mut vertex_faces,
            edge_faces: edge_map,
        } = incidence;

        for faces in &mut vertex_faces {
            faces.sort_unstable();
            faces.dedup();
        }

        let mut entries: Vec<(EdgeKey, Vec<usize>)> = edge_map.into_iter().collect();
        entries.sort_unstable_by_key(|(key, _)| *key);

        let mut edges = Vec::with_capacity(entries.len());
        let mut edge_faces = Vec::with_capacity(entries.len());
        let mut edge_ids = AHashMap::with_capacity(entries.len());
        let mut non_manifold = Vec::new();

        for (id, (key, mut faces)) in entries.into_iter().enumerate() {
            faces.sort_unstable();
            if faces.len() > 2 {
                debug!(edge = %key, faces = ?faces, "non-manifold edge");
                non_manifold.push(id);
            }
            edges.push(key);
            edge_faces.push(faces);
            edge_ids.insert(key, id);
        }

        if !non_manifold.is_empty() {
            warn!(
                count = non_manifold.len(),
                "mesh has edges shared by more than two faces; their normals are averaged"
            );
        }

        debug!(
            vertices = vertex_faces.len(),
            faces = face_normals.len(),
            edges = edges.len(),
            "built adjacency index"
        );

        Self {
            vertex_faces,
            edges,
            edge_faces,
            edge_ids,
            face_normals,
            non_manifold,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_faces.len()
    }

    pub fn face_count(&self) -> usize {
        self.face_normals.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Faces referencing `vertex`, ascending
    pub fn vertex_faces(&self, vertex: usize) -> &[usize] {
        &self.vertex_faces[vertex]
    }

    pub fn edge_vertices(&self, edge: usize) -> EdgeKey {
        self.edges[edge]
    }

    /// Faces bordering `edge`, ascending
    pub fn edge_faces(&self, edge: usize) -> &[usize] {
        &self.edge_faces[edge]
    }

    /// All edges, sorted by key; positions are edge ids
    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    pub fn edge_id(&self, a: usize, b: usize) -> Option<usize> {
        self.edge_ids.get(&EdgeKey::new(a, b)).copied()
    }

    pub fn face_normal(&self, face: usize) -> Vector3<f64> {
        self.face_normals[face]
    }

    pub fn face_normals(&self) -> &[Vector3<f64>] {
        &self.face_normals
    }

    /// Edges with more than two incident faces
    pub fn non_manifold_edges(&self) -> &[usize] {
        &self.non_manifold
    }

    /// Edges with exactly one incident face
    pub fn boundary_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.edge_faces
            .iter()
            .enumerate()
            .filter(|(_, faces)| faces.len() == 1)
            .map(|(id, _)| id)
    }

    /// Every edge is shared by exactly two faces
    pub fn is_closed(&self) -> bool {
        self.edge_faces.iter().all(|faces| faces.len() == 2)
    }

    /// Mean of the unit normals of the faces around `vertex`.
    /// Zero for a vertex no face references.
    pub fn vertex_normal(&self, vertex: usize) -> Vector3<f64> {
        mean_normal(&self.face_normals, &self.vertex_faces[vertex])
    }

    /// Sum of the unit normals of the faces bordering `edge`. Not normalized.
    pub fn edge_normal(&self, edge: usize) -> Vector3<f64> {
        self.edge_faces[edge]
            .iter()
            .map(|&f| self.face_normals[f])
            .sum()
    }

    /// Reject a vertex/face set other than the one this index was built from
    pub fn check_mesh(&self, vertices: &[Point3<f64>], faces: &[Face]) -> ProximityResult<()> {
        if vertices.len() != self.vertex_count() || faces.len() != self.face_count() {
            return Err(ProximityError::StaleIndex {
                expected_vertices: self.vertex_count(),
                expected_faces: self.face_count(),
                vertices: vertices.len(),
                faces: faces.len(),
            });
        }
        Ok(())
    }
}

fn check_not_empty(vertices: &[Point3<f64>], faces: &[Face]) -> ProximityResult<()> {
    if vertices.is_empty() {
        return Err(Degeneracy::NoVertices.into());
    }
    if faces.is_empty() {
        return Err(Degeneracy::NoFaces.into());
    }
    Ok(())
}

fn face_normal(
    vertices: &[Point3<f64>],
    face_index: usize,
    face: &Face,
    tolerance: f64,
) -> ProximityResult<Vector3<f64>> {
    for &vertex in face {
        if vertex >= vertices.len() {
            return Err(ProximityError::VertexOutOfRange {
                face: face_index,
                vertex,
                vertex_count: vertices.len(),
            });
        }
    }

    let [a, b, c] = *face;
    if a == b || b == c || a == c {
        return Err(Degeneracy::RepeatedVertex { face: face_index }.into());
    }

    triangle_normal(&vertices[a], &vertices[b], &vertices[c], tolerance)
        .ok_or_else(|| Degeneracy::ZeroArea { face: face_index }.into())
}

fn mean_normal(face_normals: &[Vector3<f64>], faces: &[usize]) -> Vector3<f64> {
    if faces.is_empty() {
        return Vector3::zeros();
    }
    let sum: Vector3<f64> = faces.iter().map(|&f| face_normals[f]).sum();
    sum / faces.len() as f64
}
