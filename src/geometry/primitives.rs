// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Closed reference shapes

use super::{Mesh, Point, Triangle};
use nalgebra::Vector3;
use std::f32::consts::PI;

/// Geometric primitives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Cube { size: Vector3<f32>, center: bool },
    Sphere { r: f32, segments: u32 },
    Octahedron { r: f32 },
}

impl Primitive {
    pub fn cube(size: Vector3<f32>, center: bool) -> Self {
        Self::Cube { size, center }
    }

    pub fn sphere(r: f32, segments: u32) -> Self {
        let segments = if segments >= 3 { segments } else { 32 };
        Self::Sphere { r, segments }
    }

    pub fn octahedron(r: f32) -> Self {
        Self::Octahedron { r }
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Cube { size, center } => generate_cube_mesh(*size, *center),
            Self::Sphere { r, segments } => generate_sphere_mesh(*r, *segments),
            Self::Octahedron { r } => generate_octahedron_mesh(*r),
        }
    }
}

fn generate_cube_mesh(size: Vector3<f32>, center: bool) -> Mesh {
    let (min, max) = if center {
        (-size / 2.0, size / 2.0)
    } else {
        (Vector3::zeros(), size)
    };

    // 8 corners of the cube
    let corners = [
        Point::new(min.x, min.y, min.z),
        Point::new(max.x, min.y, min.z),
        Point::new(max.x, max.y, min.z),
        Point::new(min.x, max.y, min.z),
        Point::new(min.x, min.y, max.z),
        Point::new(max.x, min.y, max.z),
        Point::new(max.x, max.y, max.z),
        Point::new(min.x, max.y, max.z),
    ];

    // 6 faces, two triangles each, wound outward
    let faces: [[usize; 3]; 12] = [
        // Front (z+)
        [4, 5, 6],
        [4, 6, 7],
        // Back (z-)
        [1, 0, 3],
        [1, 3, 2],
        // Right (x+)
        [5, 1, 2],
        [5, 2, 6],
        // Left (x-)
        [0, 4, 7],
        [0, 7, 3],
        // Top (y+)
        [7, 6, 2],
        [7, 2, 3],
        // Bottom (y-)
        [0, 1, 5],
        [0, 5, 4],
    ];

    faces
        .iter()
        .map(|[a, b, c]| Triangle::new(corners[*a], corners[*b], corners[*c]))
        .collect::<Vec<_>>()
        .into()
}

fn generate_sphere_mesh(radius: f32, segments: u32) -> Mesh {
    let stacks = segments as usize;
    let slices = segments as usize;

    // Rings from pole to pole; the last column wraps onto the first so the
    // seam closes exactly.
    let mut rings = Vec::with_capacity(stacks + 1);
    for i in 0..=stacks {
        let phi = PI * i as f32 / stacks as f32;
        let y = radius * phi.cos();
        let r = radius * phi.sin();

        let ring: Vec<Point> = (0..slices)
            .map(|j| {
                let theta = 2.0 * PI * j as f32 / slices as f32;
                Point::new(r * theta.cos(), y, r * theta.sin())
            })
            .collect();
        rings.push(ring);
    }

    let mut mesh = Mesh::with_capacity(2 * stacks * slices);
    for i in 0..stacks {
        for j in 0..slices {
            let next = (j + 1) % slices;
            let first = rings[i][j];
            let first_next = rings[i][next];
            let second = rings[i + 1][j];
            let second_next = rings[i + 1][next];

            mesh.add_triangle(Triangle::new(first, second, first_next));
            mesh.add_triangle(Triangle::new(second, second_next, first_next));
        }
    }

    mesh
}

fn generate_octahedron_mesh(r: f32) -> Mesh {
    let px = Point::new(r, 0.0, 0.0);
    let nx = Point::new(-r, 0.0, 0.0);
    let py = Point::new(0.0, r, 0.0);
    let ny = Point::new(0.0, -r, 0.0);
    let pz = Point::new(0.0, 0.0, r);
    let nz = Point::new(0.0, 0.0, -r);

    Mesh::from_triangles(vec![
        Triangle::new(px, py, pz),
        Triangle::new(py, nx, pz),
        Triangle::new(nx, ny, pz),
        Triangle::new(ny, px, pz),
        Triangle::new(py, px, nz),
        Triangle::new(nx, py, nz),
        Triangle::new(ny, nx, nz),
        Triangle::new(px, ny, nz),
    ])
}
