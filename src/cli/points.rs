// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Query point parsing for the command line and batch files

use anyhow::{bail, Context, Result};
use nalgebra::Point3;

/// Parse `x,y,z` or `x y z`
pub fn parse_point(text: &str) -> Result<Point3<f64>> {
    let coords = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>()
                .with_context(|| format!("Invalid coordinate {:?}", part))
        })
        .collect::<Result<Vec<_>>>()?;

    if coords.len() != 3 {
        bail!("Expected 3 coordinates, got {} in {:?}", coords.len(), text);
    }
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

/// Parse one point per line; blank lines and `#` comments are skipped
pub fn parse_points(source: &str) -> Result<Vec<Point3<f64>>> {
    source
        .lines()
        .enumerate()
        .map(|(n, line)| (n + 1, line.split('#').next().unwrap_or("").trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(n, line)| parse_point(line).with_context(|| format!("Line {}", n)))
        .collect()
}
