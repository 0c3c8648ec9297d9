// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh file importer

use super::{parse_obj, read_stl};
use crate::geometry::Mesh;
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::BufReader;
use std::path::Path;

/// Import a mesh, choosing the reader from the file extension (`.obj`, `.stl`)
pub fn import_mesh(path: impl AsRef<Path>) -> Result<Mesh> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("obj") => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read OBJ file: {}", path.display()))?;
            parse_obj(&source)
                .with_context(|| format!("Failed to parse OBJ file: {}", path.display()))
        }
        Some("stl") => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open STL file: {}", path.display()))?;
            read_stl(&mut BufReader::new(file))
                .with_context(|| format!("Failed to parse STL file: {}", path.display()))
        }
        _ => bail!(
            "Unsupported mesh format: {} (expected .obj or .stl)",
            path.display()
        ),
    }
}
