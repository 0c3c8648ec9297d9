// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! STL reader (ASCII and binary) backed by stl_io

use crate::geometry::Mesh;
use anyhow::{Context, Result};
use nalgebra::Point3;
use std::io::{Read, Seek};

/// Read an STL stream into an indexed mesh.
///
/// stl_io merges bit-identical corner positions, so facets that share corners
/// end up sharing vertex indices and the adjacency index sees a connected
/// surface. Stored facet normals are ignored; normals are recomputed from the
/// winding.
pub fn read_stl<R: Read + Seek>(reader: &mut R) -> Result<Mesh> {
    let indexed = stl_io::read_stl(reader).context("Failed to read STL data")?;

    let vertices = indexed
        .vertices
        .iter()
        .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
        .collect();
    let faces = indexed.faces.iter().map(|triangle| triangle.vertices).collect();

    Ok(Mesh::from_parts(vertices, faces))
}
