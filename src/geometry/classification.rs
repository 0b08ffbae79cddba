// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point-in-mesh classification by ray parity
//!
//! A query point is inside a closed mesh iff the ray cast from it along `+X`
//! crosses the surface an odd number of times. The mesh's global bounding box
//! rejects rays that cannot reach any triangle, and each triangle's own box
//! gates the full intersection test.

use super::triangle_intersection::ray_intersects_triangle;
use super::{BoundingBox, Mesh, Point, Ray, Triangle};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Meshes smaller than this are scanned on the calling thread
const PARALLEL_TRIANGLE_THRESHOLD: usize = 2048;

/// Inside/outside verdict for one query point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Inside,
    Outside,
}

impl Classification {
    pub fn from_crossings(crossings: usize) -> Self {
        if crossings % 2 == 1 {
            Classification::Inside
        } else {
            Classification::Outside
        }
    }

    pub fn is_inside(self) -> bool {
        self == Classification::Inside
    }
}

/// Anything that can count ray crossings against a set of triangles.
///
/// [`PreparedMesh`] scans every triangle behind per-triangle boxes. A
/// hierarchy could implement this trait to visit fewer candidates.
pub trait TriangleSource: Sync {
    /// Envelope of every vertex
    fn bounding_box(&self) -> &BoundingBox;

    /// Number of triangles the ray crosses strictly in front of its origin
    fn count_crossings(&self, ray: &Ray) -> usize;
}

/// Read-only mesh with its global box and per-triangle boxes precomputed
#[derive(Debug, Clone)]
pub struct PreparedMesh {
    triangles: Vec<Triangle>,
    triangle_boxes: Vec<BoundingBox>,
    bounds: BoundingBox,
}

impl PreparedMesh {
    pub fn new(mesh: &Mesh) -> Self {
        Self::from_triangles(mesh.triangles.clone())
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        let triangle_boxes = triangles.iter().map(Triangle::bounding_box).collect();
        let bounds = BoundingBox::from_triangles(&triangles);
        log::debug!(
            "Prepared {} triangles, bounds {:?}..{:?}",
            triangles.len(),
            bounds.min,
            bounds.max
        );
        Self {
            triangles,
            triangle_boxes,
            bounds,
        }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    fn count_range(&self, ray: &Ray, start: usize, end: usize) -> usize {
        self.triangles[start..end]
            .iter()
            .zip(&self.triangle_boxes[start..end])
            .filter(|(triangle, bbox)| bbox.intersects_ray(ray) && ray_intersects_triangle(ray, triangle))
            .count()
    }
}

impl From<Mesh> for PreparedMesh {
    fn from(mesh: Mesh) -> Self {
        Self::from_triangles(mesh.triangles)
    }
}

impl From<&Mesh> for PreparedMesh {
    fn from(mesh: &Mesh) -> Self {
        Self::new(mesh)
    }
}

impl TriangleSource for PreparedMesh {
    fn bounding_box(&self) -> &BoundingBox {
        &self.bounds
    }

    fn count_crossings(&self, ray: &Ray) -> usize {
        let len = self.triangles.len();
        if len < PARALLEL_TRIANGLE_THRESHOLD {
            return self.count_range(ray, 0, len);
        }

        // Sub-ranges run as tasks on the current pool and sum into one counter
        let chunks = rayon::current_num_threads().max(1);
        let crossings = AtomicUsize::new(0);
        (0..chunks).into_par_iter().for_each(|chunk| {
            let start = chunk * len / chunks;
            let end = (chunk + 1) * len / chunks;
            let local = self.count_range(ray, start, end);
            crossings.fetch_add(local, Ordering::Relaxed);
        });
        crossings.into_inner()
    }
}

/// Number of surface crossings along the classification ray from `point`.
///
/// Zero when the mesh is empty or the ray misses the global box.
pub fn count_crossings<S: TriangleSource + ?Sized>(point: &Point, source: &S) -> usize {
    let bounds = source.bounding_box();
    // The slab test does not reject an inverted box, so empty meshes short-circuit here
    if bounds.is_empty() {
        return 0;
    }

    let ray = Ray::classification(*point);
    if !bounds.intersects_ray(&ray) {
        return 0;
    }

    source.count_crossings(&ray)
}

/// Classify one point against a closed mesh
pub fn classify_point<S: TriangleSource + ?Sized>(point: &Point, source: &S) -> Classification {
    Classification::from_crossings(count_crossings(point, source))
}

/// Test if a point is inside a closed mesh (odd crossing count)
pub fn is_point_inside<S: TriangleSource + ?Sized>(point: &Point, source: &S) -> bool {
    classify_point(point, source).is_inside()
}
