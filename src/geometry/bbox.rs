// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bounding box utilities

use super::{Point, Ray, Triangle};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Inverted box that contains nothing. Expanding it by any point yields
    /// the degenerate box of that point.
    pub fn empty() -> Self {
        Self {
            min: Point::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    pub fn from_point(point: Point) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    pub fn from_points(points: &[Point]) -> Self {
        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(point);
        }
        bbox
    }

    /// Envelope of every vertex of every triangle
    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let mut bbox = Self::empty();
        for triangle in triangles {
            bbox.expand_to_include(&triangle.v1);
            bbox.expand_to_include(&triangle.v2);
            bbox.expand_to_include(&triangle.v3);
        }
        bbox
    }

    pub fn expand_to_include(&mut self, point: &Point) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// True when `min > max` on any axis, i.e. no point was ever included
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    pub fn size(&self) -> nalgebra::Vector3<f32> {
        nalgebra::Vector3::new(
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }

    /// Grow the box by `fraction` of its size on every side
    pub fn inflated(&self, fraction: f32) -> Self {
        let pad = self.size() * fraction;
        Self::new(
            Point::new(self.min.x - pad.x, self.min.y - pad.y, self.min.z - pad.z),
            Point::new(self.max.x + pad.x, self.max.y + pad.y, self.max.z + pad.z),
        )
    }

    pub fn contains(&self, point: &Point) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }

    /// Slab test against the infinite line carried by `ray`.
    ///
    /// Per-axis parameter intervals are intersected pairwise: x with y, then
    /// the overlap with z. No `t >= 0` clamp is applied, so boxes behind the
    /// origin still report a hit. Zero direction components divide through to
    /// IEEE infinities, and a NaN interval bound never rejects.
    ///
    /// An inverted (empty) box is not rejected by this arithmetic; callers
    /// must check [`BoundingBox::is_empty`] first.
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        let origin = &ray.origin;
        let direction = &ray.direction;

        let (mut t_min, mut t_max) = ordered(
            (self.min.x - origin.x) / direction.x,
            (self.max.x - origin.x) / direction.x,
        );

        let (ty_min, ty_max) = ordered(
            (self.min.y - origin.y) / direction.y,
            (self.max.y - origin.y) / direction.y,
        );

        if t_min > ty_max || ty_min > t_max {
            return false;
        }

        if ty_min > t_min {
            t_min = ty_min;
        }
        if ty_max < t_max {
            t_max = ty_max;
        }

        let (tz_min, tz_max) = ordered(
            (self.min.z - origin.z) / direction.z,
            (self.max.z - origin.z) / direction.z,
        );

        !(t_min > tz_max || tz_min > t_max)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[inline]
fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a > b {
        (b, a)
    } else {
        (a, b)
    }
}
