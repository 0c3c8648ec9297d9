// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Indexed triangle mesh

use super::BoundingBox;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Triangle as three vertex indices, wound counter-clockwise seen from outside
pub type Face = [usize; 3];

/// Closed triangulated surface: vertex positions plus face index triples.
///
/// Vertex and face identities are their positions in the two vectors. A mesh
/// is treated as immutable while an [`AdjacencyIndex`](super::AdjacencyIndex)
/// built from it is in use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        let index = self.vertices.len();
        self.vertices.push(position);
        index
    }

    /// Add a face and return its index
    pub fn add_face(&mut self, face: Face) -> usize {
        let index = self.faces.len();
        self.faces.push(face);
        index
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Corner positions of a face. Panics if the face or its indices are out of range.
    pub fn triangle(&self, face: usize) -> [Point3<f64>; 3] {
        let [a, b, c] = self.faces[face];
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }

    /// Total surface area
    pub fn surface_area(&self) -> f64 {
        (0..self.faces.len())
            .map(|f| {
                let [v0, v1, v2] = self.triangle(f);
                (v1 - v0).cross(&(v2 - v0)).norm() / 2.0
            })
            .sum()
    }

    /// Enclosed volume from signed tetrahedra against the origin.
    /// Positive for a closed, outward-wound surface.
    pub fn signed_volume(&self) -> f64 {
        (0..self.faces.len())
            .map(|f| {
                let [v0, v1, v2] = self.triangle(f);
                v0.coords.dot(&v1.coords.cross(&v2.coords)) / 6.0
            })
            .sum()
    }
}
