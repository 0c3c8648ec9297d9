// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Engine API: a mesh, its adjacency index and query settings kept together

use crate::config::ProximityConfig;
use crate::error::ProximityResult;
use crate::geometry::{analyze, AdjacencyIndex, Mesh, MeshStats};
use crate::proximity::{
    nearest_edge_with_tolerance, nearest_vertex_with_tolerance, EdgeProximityResult,
    VertexProximityResult,
};
use nalgebra::Point3;
use rayon::prelude::*;
use tracing::debug;

/// Owns a mesh and the index built from it, so queries can never see a
/// stale index. Replacing the geometry goes through [`rebuild`](Self::rebuild).
#[derive(Debug, Clone)]
pub struct ProximityEngine {
    mesh: Mesh,
    index: AdjacencyIndex,
    config: ProximityConfig,
}

impl ProximityEngine {
    /// Create an engine with the default configuration
    pub fn new(mesh: Mesh) -> ProximityResult<Self> {
        Self::with_config(mesh, ProximityConfig::default())
    }

    pub fn with_config(mesh: Mesh, config: ProximityConfig) -> ProximityResult<Self> {
        let index = Self::build_index(&mesh, &config)?;
        Ok(Self {
            mesh,
            index,
            config,
        })
    }

    fn build_index(mesh: &Mesh, config: &ProximityConfig) -> ProximityResult<AdjacencyIndex> {
        if mesh.face_count() >= config.parallel_threshold {
            debug!(faces = mesh.face_count(), "building adjacency index in parallel");
            AdjacencyIndex::build_parallel(&mesh.vertices, &mesh.faces, config.degenerate_tolerance)
        } else {
            AdjacencyIndex::build(&mesh.vertices, &mesh.faces, config.degenerate_tolerance)
        }
    }

    /// Replace the mesh and rebuild the index. On failure the engine keeps
    /// its previous mesh and index.
    pub fn rebuild(&mut self, mesh: Mesh) -> ProximityResult<()> {
        let index = Self::build_index(&mesh, &self.config)?;
        self.mesh = mesh;
        self.index = index;
        Ok(())
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn index(&self) -> &AdjacencyIndex {
        &self.index
    }

    pub fn config(&self) -> &ProximityConfig {
        &self.config
    }

    pub fn stats(&self) -> MeshStats {
        analyze(&self.mesh, &self.index)
    }

    pub fn nearest_vertex(&self, point: &Point3<f64>) -> ProximityResult<VertexProximityResult> {
        nearest_vertex_with_tolerance(
            point,
            &self.mesh.vertices,
            &self.mesh.faces,
            &self.index,
            self.config.tolerance,
        )
    }

    pub fn nearest_edge(&self, point: &Point3<f64>) -> ProximityResult<EdgeProximityResult> {
        nearest_edge_with_tolerance(
            point,
            &self.mesh.vertices,
            &self.mesh.faces,
            &self.index,
            self.config.tolerance,
        )
    }

    /// Nearest vertex for many points in parallel, in input order
    pub fn nearest_vertices(
        &self,
        points: &[Point3<f64>],
    ) -> ProximityResult<Vec<VertexProximityResult>> {
        points
            .par_iter()
            .map(|point| self.nearest_vertex(point))
            .collect()
    }

    /// Nearest edge for many points in parallel, in input order
    pub fn nearest_edges(&self, points: &[Point3<f64>]) -> ProximityResult<Vec<EdgeProximityResult>> {
        points
            .par_iter()
            .map(|point| self.nearest_edge(point))
            .collect()
    }
}
