// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Ray representation

use super::Point;
use nalgebra::Vector3;

/// A ray in 3D space defined by origin and direction.
///
/// The direction is used as given. It is not normalized and zero components
/// are allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    /// Ray from `origin` along the fixed classification direction `(1, 0, 0)`
    pub fn classification(origin: Point) -> Self {
        Self::new(origin, classification_direction())
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`
    #[inline]
    pub fn at(&self, t: f32) -> Point {
        Point::from(self.origin.coords() + self.direction * t)
    }
}

/// Direction shared by every parity test, `+X`
#[inline]
pub fn classification_direction() -> Vector3<f32> {
    Vector3::new(1.0, 0.0, 0.0)
}
