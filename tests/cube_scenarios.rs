// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Nearest-feature queries against the unit cube

use anyhow::Result;
use approx::assert_relative_eq;
use nalgebra::Point3;
use polyprox::{
    build_adjacency, nearest_edge, nearest_vertex, AdjacencyIndex, Mesh, Primitive, Proximity,
    Side,
};

fn cube() -> Result<(Mesh, AdjacencyIndex)> {
    let mesh = Primitive::unit_cube().to_mesh();
    let index = build_adjacency(&mesh.vertices, &mesh.faces)?;
    Ok((mesh, index))
}

#[test]
fn test_corner_point_single_vertex() -> Result<()> {
    let (mesh, index) = cube()?;
    let result = nearest_vertex(&Point3::new(1.0, 1.0, 1.0), &mesh.vertices, &mesh.faces, &index)?;

    let Proximity::Single(hit) = result else {
        panic!("expected a single winner, got {:?}", result);
    };
    assert_eq!(hit.vertex, 7);
    assert_eq!(hit.point, Point3::new(0.5, 0.5, 0.5));
    assert_eq!(hit.side, Side::Outside);
    assert_relative_eq!(hit.distance, 0.5 * 3f64.sqrt(), epsilon = 1e-12);
    assert_eq!(hit.faces, vec![4, 5, 6, 7, 10, 11]);
    Ok(())
}

#[test]
fn test_face_axis_point_four_way_vertex_tie() -> Result<()> {
    let (mesh, index) = cube()?;
    let result = nearest_vertex(&Point3::new(1.0, 0.0, 0.0), &mesh.vertices, &mesh.faces, &index)?;

    assert!(result.is_tie());
    let vertices: Vec<usize> = result.iter().map(|hit| hit.vertex).collect();
    assert_eq!(vertices, vec![4, 5, 6, 7]);
    for hit in &result {
        assert_relative_eq!(hit.distance.abs(), 0.5 * 3f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(hit.point.x, 0.5);
    }
    Ok(())
}

#[test]
fn test_interior_point_single_vertex_inside() -> Result<()> {
    let (mesh, index) = cube()?;
    let result = nearest_vertex(&Point3::new(0.4, 0.4, 0.4), &mesh.vertices, &mesh.faces, &index)?;

    let Proximity::Single(hit) = result else {
        panic!("expected a single winner, got {:?}", result);
    };
    assert_eq!(hit.vertex, 7);
    assert_eq!(hit.side, Side::Inside);
    assert_relative_eq!(
        hit.distance,
        0.4 * 3f64.sqrt() - 0.5 * 3f64.sqrt(),
        epsilon = 1e-12
    );
    Ok(())
}

#[test]
fn test_center_eight_way_vertex_tie() -> Result<()> {
    let (mesh, index) = cube()?;
    let result = nearest_vertex(&Point3::origin(), &mesh.vertices, &mesh.faces, &index)?;

    assert_eq!(result.len(), 8);
    for hit in &result {
        assert_eq!(hit.side, Side::Inside);
        assert_relative_eq!(hit.distance, -0.5 * 3f64.sqrt(), epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn test_point_on_face_reports_vertex_distance() -> Result<()> {
    let (mesh, index) = cube()?;
    let result = nearest_vertex(&Point3::new(0.5, 0.4, 0.4), &mesh.vertices, &mesh.faces, &index)?;

    assert!(!result.is_tie());
    assert_eq!(result.first().vertex, 7);
    assert_relative_eq!(result.first().distance, -0.1 * 2f64.sqrt(), epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_edge_endpoint_collapse_keeps_facing_edge() -> Result<()> {
    let (mesh, index) = cube()?;
    let result = nearest_edge(&Point3::new(1.0, 0.5, 0.5), &mesh.vertices, &mesh.faces, &index)?;

    let Proximity::Single(hit) = result else {
        panic!("expected a single winner, got {:?}", result);
    };
    assert_eq!(hit.vertices, [4, 7]);
    assert_eq!(hit.faces, vec![6, 7]);
    assert_eq!(hit.point, Point3::new(0.5, 0.5, 0.5));
    assert_eq!(hit.endpoint(), Some(7));
    assert_eq!(hit.side, Side::Outside);
    assert_relative_eq!(hit.distance, 0.5, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_face_axis_point_hits_diagonal_midpoint() -> Result<()> {
    let (mesh, index) = cube()?;
    let result = nearest_edge(&Point3::new(1.0, 0.0, 0.0), &mesh.vertices, &mesh.faces, &index)?;

    assert!(!result.is_tie());
    let hit = result.first();
    assert_eq!(hit.vertices, [4, 7]);
    assert_eq!(hit.faces, vec![6, 7]);
    assert_relative_eq!(hit.parameter, 0.5, epsilon = 1e-12);
    assert_relative_eq!(hit.point, Point3::new(0.5, 0.0, 0.0), epsilon = 1e-12);
    assert_relative_eq!(hit.distance, 0.5, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_corner_diagonal_keeps_axis_edges() -> Result<()> {
    let (mesh, index) = cube()?;
    let result = nearest_edge(&Point3::new(1.0, 1.0, 1.0), &mesh.vertices, &mesh.faces, &index)?;

    let edges: Vec<[usize; 2]> = result.iter().map(|hit| hit.vertices).collect();
    assert_eq!(edges, vec![[3, 7], [5, 7], [6, 7]]);
    for hit in &result {
        assert_eq!(hit.endpoint(), Some(7));
        assert_eq!(hit.side, Side::Outside);
        assert_relative_eq!(hit.distance, 0.5 * 3f64.sqrt(), epsilon = 1e-12);
    }
    Ok(())
}

#[test]
fn test_interior_edge_query_inside() -> Result<()> {
    let (mesh, index) = cube()?;
    let result = nearest_edge(&Point3::new(0.3, 0.0, 0.0), &mesh.vertices, &mesh.faces, &index)?;

    let hit = result.first();
    assert_eq!(hit.vertices, [4, 7]);
    assert_eq!(hit.side, Side::Inside);
    assert_relative_eq!(hit.distance, -0.2, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_point_above_face_hits_face_diagonal() -> Result<()> {
    let (mesh, index) = cube()?;
    let result = nearest_edge(&Point3::new(0.0, 0.0, 1.0), &mesh.vertices, &mesh.faces, &index)?;

    let Proximity::Single(hit) = result else {
        panic!("expected a single winner, got {:?}", result);
    };
    assert_eq!(hit.vertices, [1, 7]);
    assert_eq!(hit.faces, vec![10, 11]);
    assert_relative_eq!(hit.distance, 0.5, epsilon = 1e-12);
    assert_relative_eq!(hit.point, Point3::new(0.0, 0.0, 0.5), epsilon = 1e-12);
    assert_eq!(hit.side, Side::Outside);
    Ok(())
}

#[test]
fn test_far_point_overflow_ties_every_feature() -> Result<()> {
    let (mesh, index) = cube()?;
    // Squared coordinates overflow, so every distance is infinite
    let far = Point3::new(1e200, 1e200, 1e200);

    let vertices = nearest_vertex(&far, &mesh.vertices, &mesh.faces, &index)?;
    assert_eq!(vertices.len(), 8);
    let corner = vertices.iter().find(|hit| hit.vertex == 7).expect("corner reported");
    assert_eq!(corner.side, Side::Outside);
    assert!(corner.distance > 0.0);

    let edges = nearest_edge(&far, &mesh.vertices, &mesh.faces, &index)?;
    assert_eq!(edges.len(), index.edge_count());
    let ids: Vec<usize> = edges.iter().map(|hit| hit.edge).collect();
    assert_eq!(ids, (0..index.edge_count()).collect::<Vec<_>>());
    Ok(())
}
