// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point-in-mesh classification against closed reference shapes

use meshprobe::geometry::{
    classify_point, classify_points, count_crossings, is_point_inside, outside_points,
    BatchClassifier, Classification, Mesh, Point, PreparedMesh, Primitive,
};
use meshprobe::sampling::{sample_points, SampleConfig};
use nalgebra::Vector3;

fn unit_cube() -> PreparedMesh {
    PreparedMesh::new(&Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_mesh())
}

#[test]
fn test_unit_cube() {
    let cube = unit_cube();

    assert!(is_point_inside(&Point::new(0.5, 0.3, 0.6), &cube));
    assert!(is_point_inside(&Point::new(0.05, 0.95, 0.1), &cube));
    assert!(!is_point_inside(&Point::new(1.5, 0.5, 0.5), &cube));
    assert!(!is_point_inside(&Point::new(0.5, 1.5, 0.5), &cube));

    // Left of the cube: the ray enters and leaves
    let left = Point::new(-1.0, 0.3, 0.6);
    assert_eq!(count_crossings(&left, &cube), 2);
    assert_eq!(classify_point(&left, &cube), Classification::Outside);
}

#[test]
fn test_octahedron() {
    let octahedron = PreparedMesh::new(&Primitive::octahedron(1.0).to_mesh());

    assert!(is_point_inside(&Point::new(0.1, 0.2, 0.3), &octahedron));
    assert!(is_point_inside(&Point::new(-0.3, -0.2, 0.1), &octahedron));
    // Inside the bounding box but beyond the |x|+|y|+|z| = 1 faces
    assert!(!is_point_inside(&Point::new(0.5, 0.4, 0.3), &octahedron));
    assert_eq!(count_crossings(&Point::new(-2.0, 0.2, 0.3), &octahedron), 2);
}

#[test]
fn test_sphere() {
    let sphere = PreparedMesh::new(&Primitive::sphere(2.0, 24).to_mesh());

    assert!(is_point_inside(&Point::new(0.3, 0.2, 0.1), &sphere));
    assert!(is_point_inside(&Point::new(-1.1, 0.7, 0.45), &sphere));
    assert!(!is_point_inside(&Point::new(3.0, 0.2, 0.1), &sphere));
    // Inside the box, outside the sphere
    assert!(!is_point_inside(&Point::new(1.8, 1.7, 0.3), &sphere));
}

#[test]
fn test_hollow_cube() {
    let mut shell = Primitive::cube(Vector3::new(4.0, 4.0, 4.0), true).to_mesh();
    let mut cavity = Primitive::cube(Vector3::new(2.0, 2.0, 2.0), true).to_mesh();
    cavity.flip_orientation();
    shell.merge(&cavity);
    let hollow = PreparedMesh::new(&shell);

    let in_cavity = Point::new(0.1, 0.2, 0.3);
    let in_wall = Point::new(1.5, 0.2, 0.3);
    let beyond = Point::new(2.5, 0.2, 0.3);

    assert_eq!(count_crossings(&in_cavity, &hollow), 2);
    assert!(!is_point_inside(&in_cavity, &hollow));
    assert!(is_point_inside(&in_wall, &hollow));
    assert!(!is_point_inside(&beyond, &hollow));
}

#[test]
fn test_translated_mesh() {
    let mut mesh = Primitive::cube(Vector3::new(1.0, 1.0, 1.0), false).to_mesh();
    mesh.translate(Vector3::new(10.0, -5.0, 2.0));
    let prepared = PreparedMesh::new(&mesh);

    assert!(is_point_inside(&Point::new(10.5, -4.7, 2.6), &prepared));
    assert!(!is_point_inside(&Point::new(0.5, 0.3, 0.6), &prepared));
}

#[test]
fn test_zero_triangle_mesh() {
    let empty = PreparedMesh::new(&Mesh::empty());
    let points = [
        Point::new(0.0, 0.0, 0.0),
        Point::new(-1.0, 2.0, 3.0),
        Point::new(f32::MAX, 0.0, 0.0),
    ];

    for point in &points {
        assert_eq!(count_crossings(point, &empty), 0);
    }
    assert!(classify_points(&points, &empty).is_empty());
    assert_eq!(outside_points(&points, &[]), points.to_vec());
}

#[test]
fn test_classification_is_idempotent() {
    let cube = unit_cube();
    let points = vec![
        Point::new(0.5, 0.3, 0.6),
        Point::new(2.0, 0.3, 0.6),
        Point::new(0.2, 0.7, 0.4),
    ];

    let first = classify_points(&points, &cube);
    let second = classify_points(&points, &cube);
    assert_eq!(first, second);
    assert_eq!(first, vec![points[0], points[2]]);
}

#[test]
fn test_partition_count_does_not_change_result() {
    let octahedron = Primitive::octahedron(1.0).to_mesh();
    let prepared = PreparedMesh::new(&octahedron);
    let points = sample_points(
        &octahedron.bounding_box(),
        &SampleConfig {
            count: 2_000,
            margin: 0.25,
            seed: Some(2025),
        },
    )
    .expect("finite octahedron bounds");

    let expected: Vec<Point> = points
        .iter()
        .copied()
        .filter(|p| is_point_inside(p, &prepared))
        .collect();
    assert!(!expected.is_empty());
    assert!(expected.len() < points.len());

    for partitions in [1, 2, 5, 13, 64] {
        let inside = BatchClassifier::with_partitions(partitions).inside_points(&points, &prepared);
        assert_eq!(inside, expected, "partitions = {}", partitions);
    }
}

#[test]
fn test_inside_and_outside_partition_input() {
    let cube = unit_cube();
    let points = vec![
        Point::new(0.5, 0.3, 0.6),
        Point::new(3.0, 3.0, 3.0),
        Point::new(0.5, 0.3, 0.6),
        Point::new(-2.0, 0.1, 0.2),
    ];

    let inside = classify_points(&points, &cube);
    let outside = outside_points(&points, &inside);

    // Duplicates are classified independently
    assert_eq!(inside, vec![points[0], points[2]]);
    assert_eq!(outside, vec![points[1], points[3]]);
    assert_eq!(inside.len() + outside.len(), points.len());
}
