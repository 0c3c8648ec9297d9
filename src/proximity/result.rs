// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tagged query results

use super::Side;
use crate::error::{ProximityError, ProximityResult};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Outcome of a proximity query: one nearest feature, or several tied ones
/// in ascending feature order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "hits", rename_all = "snake_case")]
pub enum Proximity<T> {
    Single(T),
    /// Always holds at least two hits
    Tied(Vec<T>),
}

impl<T> Proximity<T> {
    pub(crate) fn from_hits(mut hits: Vec<T>) -> ProximityResult<Self> {
        match hits.len() {
            0 => Err(ProximityError::EmptyTieSet),
            1 => hits.pop().map(Self::Single).ok_or(ProximityError::EmptyTieSet),
            _ => Ok(Self::Tied(hits)),
        }
    }

    /// All hits, ascending by feature
    pub fn hits(&self) -> &[T] {
        match self {
            Self::Single(hit) => std::slice::from_ref(hit),
            Self::Tied(hits) => hits,
        }
    }

    pub fn first(&self) -> &T {
        &self.hits()[0]
    }

    pub fn len(&self) -> usize {
        self.hits().len()
    }

    /// Never true; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, Self::Tied(_))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.hits().iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Single(hit) => vec![hit],
            Self::Tied(hits) => hits,
        }
    }
}

impl<'a, T> IntoIterator for &'a Proximity<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Nearest-vertex hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexHit {
    pub vertex: usize,
    /// Signed: positive outside, negative inside
    pub distance: f64,
    /// Position of the vertex
    pub point: Point3<f64>,
    pub side: Side,
    /// Faces incident to the vertex, ascending
    pub faces: Vec<usize>,
}

/// Nearest-edge hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeHit {
    /// Edge id in the adjacency index
    pub edge: usize,
    /// Endpoints, lower index first
    pub vertices: [usize; 2],
    /// Faces bordering the edge, ascending
    pub faces: Vec<usize>,
    /// Position of `point` along the edge from `vertices[0]` (0) to `vertices[1]` (1)
    pub parameter: f64,
    /// Signed: positive outside, negative inside
    pub distance: f64,
    /// Closest point on the edge
    pub point: Point3<f64>,
    pub side: Side,
}

impl EdgeHit {
    /// The endpoint vertex the closest point collapsed onto, if any
    pub fn endpoint(&self) -> Option<usize> {
        if self.parameter == 0.0 {
            Some(self.vertices[0])
        } else if self.parameter == 1.0 {
            Some(self.vertices[1])
        } else {
            None
        }
    }
}

pub type VertexProximityResult = Proximity<VertexHit>;
pub type EdgeProximityResult = Proximity<EdgeHit>;
