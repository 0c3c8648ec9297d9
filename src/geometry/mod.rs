// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - mesh representation, topology and fixtures

mod adjacency;
mod analytics;
mod bbox;
mod mesh;
mod primitives;

pub use adjacency::{AdjacencyIndex, EdgeKey};
pub use analytics::{analyze, MeshStats};
pub use bbox::BoundingBox;
pub use mesh::{Face, Mesh};
pub use primitives::Primitive;
