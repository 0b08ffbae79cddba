// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation and utilities

use super::BoundingBox;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Single-precision 3D point.
///
/// Equality is exact component-wise float equality. Two points built from the
/// same text compare equal; points re-derived through arithmetic may not.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Position vector from the origin
    #[inline]
    pub fn coords(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn component(&self, axis: usize) -> f32 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

// NaN components never compare equal, so such points never match in a set.
impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // 0.0 == -0.0 must hash identically
        fn key(value: f32) -> u32 {
            if value == 0.0 {
                0
            } else {
                value.to_bits()
            }
        }
        state.write_u32(key(self.x));
        state.write_u32(key(self.y));
        state.write_u32(key(self.z));
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

impl From<Point3<f32>> for Point {
    fn from(p: Point3<f32>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Point> for Point3<f32> {
    fn from(p: Point) -> Self {
        Point3::new(p.x, p.y, p.z)
    }
}

impl From<Vector3<f32>> for Point {
    fn from(v: Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[f32; 3]> for Point {
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// Triangle defined by three vertex positions.
///
/// Vertex order fixes the winding. Both front and back faces count as hits
/// during classification, so the winding never changes a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub v1: Point,
    pub v2: Point,
    pub v3: Point,
}

impl Triangle {
    pub const fn new(v1: Point, v2: Point, v3: Point) -> Self {
        Self { v1, v2, v3 }
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.v1, self.v2, self.v3]
    }

    /// Local bounding box of the three vertices
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::from_point(self.v1);
        bbox.expand_to_include(&self.v2);
        bbox.expand_to_include(&self.v3);
        bbox
    }

    pub fn centroid(&self) -> Point {
        Point::new(
            (self.v1.x + self.v2.x + self.v3.x) / 3.0,
            (self.v1.y + self.v2.y + self.v3.y) / 3.0,
            (self.v1.z + self.v2.z + self.v3.z) / 3.0,
        )
    }

    /// Unnormalized face normal following the winding order
    pub fn normal(&self) -> Vector3<f32> {
        let edge1 = self.v2.coords() - self.v1.coords();
        let edge2 = self.v3.coords() - self.v1.coords();
        edge1.cross(&edge2)
    }

    pub fn flipped(&self) -> Self {
        Self::new(self.v1, self.v3, self.v2)
    }
}

/// Triangle soup. No shared vertices, no adjacency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new()
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Compute the global bounding box over every vertex
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_triangles(&self.triangles)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Vertex count of the soup (three per triangle, no deduplication)
    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Append another mesh's triangles
    pub fn merge(&mut self, other: &Mesh) {
        self.triangles.extend_from_slice(&other.triangles);
    }

    /// Reverse the winding of every triangle
    pub fn flip_orientation(&mut self) {
        for triangle in &mut self.triangles {
            *triangle = triangle.flipped();
        }
    }

    /// Translate every vertex by an offset
    pub fn translate(&mut self, offset: Vector3<f32>) {
        let shift = |p: &mut Point| {
            p.x += offset.x;
            p.y += offset.y;
            p.z += offset.z;
        };
        for triangle in &mut self.triangles {
            shift(&mut triangle.v1);
            shift(&mut triangle.v2);
            shift(&mut triangle.v3);
        }
    }
}

impl From<Vec<Triangle>> for Mesh {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self::from_triangles(triangles)
    }
}
