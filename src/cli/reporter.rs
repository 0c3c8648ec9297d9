// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::geometry::MeshStats;
use crate::proximity::{EdgeHit, EdgeProximityResult, Side, VertexHit, VertexProximityResult};
use colored::*;
use nalgebra::Point3;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    pub fn report_query_header(point: &Point3<f64>) {
        println!("\n{}", "━".repeat(72).bright_black());
        println!("{} {}", "Query:".bold(), Self::format_point(point).cyan());
        println!("{}", "━".repeat(72).bright_black());
    }

    pub fn report_vertex(result: &VertexProximityResult) {
        println!("\n{} {}", "Nearest vertex".bold(), Self::tie_label(result.len()));
        for hit in result {
            Self::print_vertex_hit(hit);
        }
    }

    pub fn report_edge(result: &EdgeProximityResult) {
        println!("\n{} {}", "Nearest edge".bold(), Self::tie_label(result.len()));
        for hit in result {
            Self::print_edge_hit(hit);
        }
    }

    pub fn report_stats(stats: &MeshStats) {
        println!("\n{}", "Mesh:".bold());
        Self::print_metric("Vertices", &stats.vertex_count.to_string());
        Self::print_metric("Faces", &stats.face_count.to_string());
        Self::print_metric("Edges", &stats.edge_count.to_string());
        Self::print_metric("Euler characteristic", &stats.euler_characteristic.to_string());
        Self::print_metric("Volume", &format!("{:.6}", stats.volume));
        Self::print_metric("Surface area", &format!("{:.6}", stats.surface_area));
        Self::print_metric(
            "Bounding box",
            &format!(
                "({:.4}, {:.4}, {:.4}) .. ({:.4}, {:.4}, {:.4})",
                stats.bbox[0], stats.bbox[1], stats.bbox[2], stats.bbox[3], stats.bbox[4], stats.bbox[5]
            ),
        );

        if stats.is_closed {
            println!("  {} {}", "✅".green(), "Closed surface".green());
        } else {
            println!(
                "  {} {}",
                "⚠️".yellow(),
                format!(
                    "Open surface: {} boundary edges, {} non-manifold edges",
                    stats.boundary_edges, stats.non_manifold_edges
                )
                .yellow()
            );
        }
        if stats.volume < 0.0 {
            println!(
                "  {} {}",
                "⚠️".yellow(),
                "Negative volume: faces appear to be wound inward, signs will be flipped".yellow()
            );
        }
    }

    fn print_vertex_hit(hit: &VertexHit) {
        println!(
            "  {} {:>6}  {} {}  {} {}  {} {:?}",
            "vertex".bright_black(),
            hit.vertex,
            "distance".bright_black(),
            Self::format_distance(hit.distance, hit.side),
            "at".bright_black(),
            Self::format_point(&hit.point),
            "faces".bright_black(),
            hit.faces
        );
    }

    fn print_edge_hit(hit: &EdgeHit) {
        println!(
            "  {} {:>6}  {} {}  {} {}  {} {:?}  {} {:.4}",
            "edge".bright_black(),
            format!("{}-{}", hit.vertices[0], hit.vertices[1]),
            "distance".bright_black(),
            Self::format_distance(hit.distance, hit.side),
            "at".bright_black(),
            Self::format_point(&hit.point),
            "faces".bright_black(),
            hit.faces,
            "t".bright_black(),
            hit.parameter
        );
    }

    fn print_metric(name: &str, value: &str) {
        println!("  {:<22} {}", format!("{}:", name).bright_black(), value);
    }

    fn tie_label(count: usize) -> ColoredString {
        if count > 1 {
            format!("({}-way tie)", count).yellow()
        } else {
            "".normal()
        }
    }

    fn format_distance(distance: f64, side: Side) -> ColoredString {
        let text = format!("{:>+12.6} ({})", distance, side);
        match side {
            Side::Outside => text.green(),
            Side::Inside => text.red(),
        }
    }

    pub fn format_point(point: &Point3<f64>) -> String {
        format!("[{:.6}, {:.6}, {:.6}]", point.x, point.y, point.z)
    }
}
