// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Meshprobe
//!
//! Classifies 3D query points as inside or outside a closed triangle mesh.
//! Each point casts a ray along +X; an odd number of triangle crossings
//! means inside. Mesh and per-triangle bounding boxes prune the search and
//! the point set is split into partitions that run on a rayon pool.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod metrics;
pub mod sampling;

pub use config::ProbeConfig;
pub use error::{ProbeError, Result};
pub use geometry::{
    classify_points, is_point_inside, outside_points, BatchClassifier, BoundingBox, Mesh, Point,
    PreparedMesh, Triangle,
};
pub use metrics::RunMetrics;

use std::path::Path;

/// Load a point file and a mesh file and return the points inside the mesh.
///
/// Malformed lines in either file are skipped and logged.
pub fn classify_files(points: impl AsRef<Path>, mesh: impl AsRef<Path>) -> Result<Vec<Point>> {
    let points = io::load_points(points)?;
    let mesh = io::load_mesh(mesh)?;
    let prepared = PreparedMesh::from_triangles(mesh.items);
    Ok(classify_points(&points.items, &prepared))
}
