// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Wavefront OBJ reader using pest

use crate::geometry::Mesh;
use anyhow::{anyhow, bail, Context, Result};
use nalgebra::Point3;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "io/obj.pest"]
struct ObjParser;

/// Parse OBJ source into a mesh.
///
/// Only `v` and `f` records are read. Face references may carry texture and
/// normal indices (`1/2/3`, `1//3`), which are ignored, and may be negative
/// (relative to the vertices read so far). Polygons are split into a
/// triangle fan around their first corner.
pub fn parse_obj(source: &str) -> Result<Mesh> {
    let file = ObjParser::parse(Rule::file, source)
        .context("Failed to parse OBJ source")?
        .next()
        .ok_or_else(|| anyhow!("Empty OBJ document"))?;

    let mut mesh = Mesh::new();
    for record in file.into_inner() {
        match record.as_rule() {
            Rule::vertex => {
                let position = parse_vertex(record)?;
                mesh.add_vertex(position);
            }
            Rule::face => {
                let line = record.as_span().start_pos().line_col().0;
                let corners = parse_face(record, mesh.vertex_count())
                    .with_context(|| format!("Invalid face on line {}", line))?;
                for i in 1..corners.len() - 1 {
                    mesh.add_face([corners[0], corners[i], corners[i + 1]]);
                }
            }
            _ => {}
        }
    }

    Ok(mesh)
}

fn parse_vertex(record: Pair<Rule>) -> Result<Point3<f64>> {
    let line = record.as_span().start_pos().line_col().0;
    let coords = record
        .into_inner()
        .take(3)
        .map(|number| number.as_str().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid vertex on line {}", line))?;
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

fn parse_face(record: Pair<Rule>, vertex_count: usize) -> Result<Vec<usize>> {
    record
        .into_inner()
        .map(|face_ref| {
            let index = face_ref
                .into_inner()
                .next()
                .ok_or_else(|| anyhow!("Face reference without a vertex index"))?;
            let raw: i64 = index.as_str().parse()?;
            resolve_index(raw, vertex_count)
        })
        .collect()
}

/// OBJ indices are 1-based; negative ones count back from the last vertex
fn resolve_index(raw: i64, vertex_count: usize) -> Result<usize> {
    let resolved = match raw {
        0 => bail!("Vertex index 0 is not valid in OBJ"),
        r if r > 0 => r - 1,
        r => vertex_count as i64 + r,
    };
    if resolved < 0 || resolved >= vertex_count as i64 {
        bail!(
            "Vertex index {} is out of range ({} vertices defined so far)",
            raw,
            vertex_count
        );
    }
    Ok(resolved as usize)
}
