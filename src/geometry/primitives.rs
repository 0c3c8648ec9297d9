// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Closed reference meshes with shared vertices and outward winding

use super::Mesh;
use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// Geometric primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Axis-aligned box centered at the origin
    Cube { size: Vector3<f64> },
    /// Regular octahedron with vertices on the axes
    Octahedron { radius: f64 },
    /// Latitude/longitude sphere with single pole vertices
    Sphere { radius: f64, stacks: usize, slices: usize },
}

impl Primitive {
    pub fn cube(size: Vector3<f64>) -> Self {
        Self::Cube { size }
    }

    /// Unit cube spanning [-0.5, 0.5] on every axis
    pub fn unit_cube() -> Self {
        Self::cube(Vector3::new(1.0, 1.0, 1.0))
    }

    pub fn octahedron(radius: f64) -> Self {
        Self::Octahedron { radius }
    }

    pub fn sphere(radius: f64, stacks: usize, slices: usize) -> Self {
        Self::Sphere {
            radius,
            stacks: stacks.max(2),
            slices: slices.max(3),
        }
    }

    pub fn to_mesh(&self) -> Mesh {
        match *self {
            Self::Cube { size } => generate_cube_mesh(size),
            Self::Octahedron { radius } => generate_octahedron_mesh(radius),
            Self::Sphere {
                radius,
                stacks,
                slices,
            } => generate_sphere_mesh(radius, stacks, slices),
        }
    }
}

fn generate_cube_mesh(size: Vector3<f64>) -> Mesh {
    let half = size / 2.0;
    let mut mesh = Mesh::with_capacity(8, 12);

    // Vertex i has +x when bit 2 is set, +y for bit 1, +z for bit 0
    for i in 0..8usize {
        let pick = |bit: usize, extent: f64| if i & bit != 0 { extent } else { -extent };
        mesh.add_vertex(Point3::new(pick(4, half.x), pick(2, half.y), pick(1, half.z)));
    }

    let faces = [
        [0, 6, 4],
        [0, 2, 6], // z-
        [0, 3, 2],
        [0, 1, 3], // x-
        [2, 7, 6],
        [2, 3, 7], // y+
        [4, 6, 7],
        [4, 7, 5], // x+
        [0, 4, 5],
        [0, 5, 1], // y-
        [1, 5, 7],
        [1, 7, 3], // z+
    ];
    for face in faces {
        mesh.add_face(face);
    }

    mesh
}

fn generate_octahedron_mesh(radius: f64) -> Mesh {
    let vertices = vec![
        Point3::new(radius, 0.0, 0.0),
        Point3::new(-radius, 0.0, 0.0),
        Point3::new(0.0, radius, 0.0),
        Point3::new(0.0, -radius, 0.0),
        Point3::new(0.0, 0.0, radius),
        Point3::new(0.0, 0.0, -radius),
    ];
    let faces = vec![
        [0, 2, 4],
        [1, 4, 2],
        [0, 4, 3],
        [0, 5, 2],
        [1, 3, 4],
        [1, 2, 5],
        [0, 3, 5],
        [1, 5, 3],
    ];
    Mesh::from_parts(vertices, faces)
}

fn generate_sphere_mesh(radius: f64, stacks: usize, slices: usize) -> Mesh {
    let rings = stacks - 1;
    let mut mesh = Mesh::with_capacity(rings * slices + 2, 2 * slices * stacks);

    let north = mesh.add_vertex(Point3::new(0.0, 0.0, radius));
    for i in 1..stacks {
        let phi = PI * i as f64 / stacks as f64;
        for j in 0..slices {
            let theta = 2.0 * PI * j as f64 / slices as f64;
            mesh.add_vertex(Point3::new(
                radius * phi.sin() * theta.cos(),
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
            ));
        }
    }
    let south = mesh.add_vertex(Point3::new(0.0, 0.0, -radius));

    let ring = |i: usize, j: usize| 1 + i * slices + j % slices;

    for j in 0..slices {
        mesh.add_face([north, ring(0, j), ring(0, j + 1)]);
    }
    for i in 0..rings - 1 {
        for j in 0..slices {
            let (a, b) = (ring(i, j), ring(i, j + 1));
            let (c, d) = (ring(i + 1, j), ring(i + 1, j + 1));
            mesh.add_face([a, c, d]);
            mesh.add_face([a, d, b]);
        }
    }
    for j in 0..slices {
        mesh.add_face([south, ring(rings - 1, j + 1), ring(rings - 1, j)]);
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_cube_layout() {
        let mesh = Primitive::unit_cube().to_mesh();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 12);
        assert_eq!(mesh.vertices[7], Point3::new(0.5, 0.5, 0.5));
        assert_eq!(mesh.vertices[4], Point3::new(0.5, -0.5, -0.5));
        assert_relative_eq!(mesh.signed_volume(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_octahedron_is_outward() {
        let mesh = Primitive::octahedron(1.0).to_mesh();
        // Volume of a regular octahedron with circumradius 1 is 4/3
        assert_relative_eq!(mesh.signed_volume(), 4.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sphere_counts_and_orientation() {
        let mesh = Primitive::sphere(2.0, 8, 12).to_mesh();
        assert_eq!(mesh.vertex_count(), 7 * 12 + 2);
        assert_eq!(mesh.face_count(), 2 * 12 * 7);
        let expected = 4.0 / 3.0 * PI * 8.0;
        let volume = mesh.signed_volume();
        assert!(volume > 0.0);
        assert!((volume - expected).abs() < expected * 0.2);
    }
}
