// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyprox CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use nalgebra::Point3;
use polyprox::cli::{parse_point, parse_points, Reporter};
use polyprox::{
    load_engine, EdgeProximityResult, ProximityConfig, ProximityEngine, VertexProximityResult,
};
use serde::Serialize;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "polyprox")]
#[command(about = "Polyprox - signed nearest-vertex and nearest-edge queries on triangle meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./polyprox.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the nearest features to a single point
    Query {
        /// Mesh file (.obj or .stl)
        mesh: String,

        /// Query point as x,y,z
        #[arg(short, long, allow_hyphen_values = true)]
        point: String,

        /// Which features to report
        #[arg(short, long, value_enum, default_value_t = Feature::Both)]
        feature: Feature,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Query every point of a file (one `x y z` per line) and emit JSON
    Batch {
        /// Mesh file (.obj or .stl)
        mesh: String,

        /// Points file
        points: String,

        /// Output JSON file (stdout when omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Which features to report
        #[arg(short, long, value_enum, default_value_t = Feature::Both)]
        feature: Feature,
    },

    /// Show mesh topology and geometry statistics
    Info {
        /// Mesh file (.obj or .stl)
        mesh: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Feature {
    Vertex,
    Edge,
    Both,
}

impl Feature {
    fn vertex(self) -> bool {
        matches!(self, Feature::Vertex | Feature::Both)
    }

    fn edge(self) -> bool {
        matches!(self, Feature::Edge | Feature::Both)
    }
}

#[derive(Serialize)]
struct QueryReport {
    point: Point3<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vertex: Option<VertexProximityResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edge: Option<EdgeProximityResult>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Query {
            mesh,
            point,
            feature,
            json,
        } => {
            let config = load_config(cli.config.as_deref())?;
            query_command(mesh, point, *feature, *json, config)?;
        }
        Commands::Batch {
            mesh,
            points,
            output,
            feature,
        } => {
            let config = load_config(cli.config.as_deref())?;
            batch_command(mesh, points, output.as_deref(), *feature, config)?;
        }
        Commands::Info { mesh, json } => {
            let config = load_config(cli.config.as_deref())?;
            info_command(mesh, *json, config)?;
        }
        Commands::Version => {
            println!("Polyprox v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&str>) -> Result<ProximityConfig> {
    match path {
        Some(path) => {
            let mut config = ProximityConfig::from_file(path)?;
            config.apply_env_overrides()?;
            Ok(config)
        }
        None => ProximityConfig::load(),
    }
}

fn open_engine(mesh: &str, config: ProximityConfig) -> Result<ProximityEngine> {
    let start = Instant::now();
    let engine = load_engine(mesh, config).with_context(|| format!("Failed to load mesh {}", mesh))?;
    info!(
        mesh,
        vertices = engine.mesh().vertex_count(),
        faces = engine.mesh().face_count(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "mesh loaded and indexed"
    );
    Ok(engine)
}

fn run_query(engine: &ProximityEngine, point: Point3<f64>, feature: Feature) -> Result<QueryReport> {
    let vertex = if feature.vertex() {
        Some(engine.nearest_vertex(&point)?)
    } else {
        None
    };
    let edge = if feature.edge() {
        Some(engine.nearest_edge(&point)?)
    } else {
        None
    };
    Ok(QueryReport { point, vertex, edge })
}

fn query_command(
    mesh: &str,
    point: &str,
    feature: Feature,
    json: bool,
    config: ProximityConfig,
) -> Result<()> {
    let point = parse_point(point)?;
    let engine = open_engine(mesh, config)?;
    let report = run_query(&engine, point, feature)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    Reporter::report_query_header(&report.point);
    if let Some(ref vertex) = report.vertex {
        Reporter::report_vertex(vertex);
    }
    if let Some(ref edge) = report.edge {
        Reporter::report_edge(edge);
    }
    Ok(())
}

fn batch_command(
    mesh: &str,
    points_path: &str,
    output: Option<&str>,
    feature: Feature,
    config: ProximityConfig,
) -> Result<()> {
    let source = std::fs::read_to_string(points_path)
        .with_context(|| format!("Failed to read points file: {}", points_path))?;
    let points = parse_points(&source)
        .with_context(|| format!("Failed to parse points file: {}", points_path))?;
    let engine = open_engine(mesh, config)?;

    let start = Instant::now();
    let vertex = if feature.vertex() {
        Some(engine.nearest_vertices(&points)?)
    } else {
        None
    };
    let edge = if feature.edge() {
        Some(engine.nearest_edges(&points)?)
    } else {
        None
    };
    info!(
        points = points.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "batch evaluated"
    );

    let reports: Vec<QueryReport> = points
        .iter()
        .enumerate()
        .map(|(i, point)| QueryReport {
            point: *point,
            vertex: vertex.as_ref().map(|results| results[i].clone()),
            edge: edge.as_ref().map(|results| results[i].clone()),
        })
        .collect();
    let json = serde_json::to_string_pretty(&reports)?;

    match output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("Failed to write {}", path))?;
            eprintln!(
                "{} {} points written to {}",
                "✅".green(),
                reports.len(),
                path.cyan()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn info_command(mesh: &str, json: bool, config: ProximityConfig) -> Result<()> {
    let engine = open_engine(mesh, config)?;
    let stats = engine.stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{} {}", "File:".bold(), mesh.cyan());
        Reporter::report_stats(&stats);
    }
    Ok(())
}
