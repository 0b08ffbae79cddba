// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - primitives, intersection tests and classification

mod bbox;
mod mesh;
mod primitives;
mod ray;

pub mod classification;
pub mod parallel;
pub mod triangle_intersection;

pub use bbox::BoundingBox;
pub use classification::{
    classify_point, count_crossings, is_point_inside, Classification, PreparedMesh, TriangleSource,
};
pub use mesh::{Mesh, Point, Triangle};
pub use parallel::{classify_points, outside_points, BatchClassifier};
pub use primitives::Primitive;
pub use ray::{classification_direction, Ray};
pub use triangle_intersection::ray_intersects_triangle;
