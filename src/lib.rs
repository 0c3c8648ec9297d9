// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyprox
//!
//! Nearest-vertex and nearest-edge queries on closed triangle meshes, with
//! exact tie handling and inside/outside signs taken from local face normals.
//!
//! Build an [`AdjacencyIndex`] once per mesh, then query it as often as
//! needed; the index is read-only and can be shared across threads.
//!
//! ```
//! use nalgebra::Point3;
//! use polyprox::{build_adjacency, nearest_vertex, Primitive, Proximity};
//!
//! let cube = Primitive::unit_cube().to_mesh();
//! let index = build_adjacency(&cube.vertices, &cube.faces).unwrap();
//!
//! let result = nearest_vertex(&Point3::new(1.0, 1.0, 1.0), &cube.vertices, &cube.faces, &index)
//!     .unwrap();
//! let Proximity::Single(hit) = result else { panic!("unexpected tie") };
//! assert_eq!(hit.vertex, 7);
//! assert!(hit.distance > 0.0);
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod io;
pub mod proximity;
pub mod utils;

pub use config::{ProximityConfig, Tolerance};
pub use engine::ProximityEngine;
pub use error::{Degeneracy, ProximityError, ProximityResult};
pub use geometry::{AdjacencyIndex, EdgeKey, Face, Mesh, Primitive};
pub use io::import_mesh;
pub use proximity::{
    build_adjacency, classify, nearest_edge, nearest_edge_with_tolerance, nearest_vertex,
    nearest_vertex_with_tolerance, EdgeHit, EdgeProximityResult, Proximity, Side, VertexHit,
    VertexProximityResult,
};

use anyhow::Result;

/// Load a mesh file and build an engine for it
pub fn load_engine(path: &str, config: ProximityConfig) -> Result<ProximityEngine> {
    let mesh = import_mesh(path)?;
    let engine = ProximityEngine::with_config(mesh, config)?;
    Ok(engine)
}
