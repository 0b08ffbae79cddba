// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Ray-triangle intersection (Möller–Trumbore)

use super::{Ray, Triangle};

/// Tolerance for the parallel-ray rejection and the forward-hit check
pub const EPSILON: f32 = 1e-7;

/// Test if a ray hits a triangle strictly in front of its origin.
///
/// Front and back faces both count. Hits on edges and vertices are accepted
/// whenever the barycentric inequalities hold after rounding, so a ray through
/// an edge shared by two triangles may count twice.
pub fn ray_intersects_triangle(ray: &Ray, triangle: &Triangle) -> bool {
    ray_triangle_distance(ray, triangle).is_some()
}

/// Ray parameter `t > EPSILON` of the hit, if any
pub fn ray_triangle_distance(ray: &Ray, triangle: &Triangle) -> Option<f32> {
    let v1 = triangle.v1.coords();
    let edge1 = triangle.v2.coords() - v1;
    let edge2 = triangle.v3.coords() - v1;

    let h = ray.direction.cross(&edge2);
    let a = edge1.dot(&h);

    if a > -EPSILON && a < EPSILON {
        return None; // Ray parallel to triangle
    }

    let f = 1.0 / a;
    let s = ray.origin.coords() - v1;
    let u = f * s.dot(&h);

    if u < 0.0 || u > 1.0 {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * ray.direction.dot(&q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(&q);
    (t > EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    fn sample_triangles() -> Vec<Triangle> {
        vec![
            Triangle::new(
                Point::new(0.0, 0.0, 0.0),
                Point::new(1.0, 0.0, 0.0),
                Point::new(0.0, 1.0, 0.0),
            ),
            Triangle::new(
                Point::new(2.0, -1.0, 0.5),
                Point::new(3.0, 1.0, -0.5),
                Point::new(2.5, 0.25, 2.0),
            ),
            Triangle::new(
                Point::new(-4.0, 1.0, 1.0),
                Point::new(-3.0, 0.0, 3.0),
                Point::new(-5.0, -2.0, 2.0),
            ),
        ]
    }

    #[test]
    fn test_ray_along_normal_through_centroid_hits() {
        for tri in sample_triangles() {
            let normal = tri.normal().normalize();
            let centroid = tri.centroid();

            for direction in [normal, -normal] {
                let origin = Point::from(centroid.coords() - direction);
                let ray = Ray::new(origin, direction);
                let t = ray_triangle_distance(&ray, &tri).expect("ray should hit");
                assert_relative_eq!(t, 1.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_parallel_ray_misses() {
        for tri in sample_triangles() {
            let normal = tri.normal().normalize();
            let in_plane = (tri.v2.coords() - tri.v1.coords()).normalize();
            let origin = Point::from(tri.centroid().coords() + normal * 0.5 - in_plane);
            assert!(!ray_intersects_triangle(&Ray::new(origin, in_plane), &tri));
        }
    }

    #[test]
    fn test_hit_behind_origin_is_rejected() {
        let tri = sample_triangles()[0];
        let ray = Ray::new(Point::new(0.25, 0.25, 1.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(!ray_intersects_triangle(&ray, &tri));

        let ray = Ray::new(Point::new(0.25, 0.25, 1.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(ray_intersects_triangle(&ray, &tri));
    }

    #[test]
    fn test_origin_on_surface_is_not_a_forward_hit() {
        let tri = sample_triangles()[0];
        let ray = Ray::new(Point::new(0.25, 0.25, 0.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(!ray_intersects_triangle(&ray, &tri));
    }

    #[test]
    fn test_ray_outside_triangle_misses() {
        let tri = sample_triangles()[0];
        let ray = Ray::new(Point::new(0.75, 0.75, -1.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(!ray_intersects_triangle(&ray, &tri));

        let ray = Ray::new(Point::new(-0.1, 0.5, -1.0), Vector3::new(0.0, 0.0, 1.0));
        assert!(!ray_intersects_triangle(&ray, &tri));
    }

    #[test]
    fn test_winding_does_not_change_hit() {
        let tri = sample_triangles()[1];
        let ray = Ray::new(Point::new(0.0, 0.1, 0.6), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(
            ray_intersects_triangle(&ray, &tri),
            ray_intersects_triangle(&ray, &tri.flipped())
        );
    }
}
