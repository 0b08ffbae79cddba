// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch classification of query points using rayon

use super::classification::{is_point_inside, TriangleSource};
use super::Point;
use ahash::AHashSet;
use rayon::prelude::*;
use std::ops::Range;

/// Splits query points into contiguous partitions and classifies them in
/// parallel against one shared, read-only triangle source.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchClassifier {
    partitions: Option<usize>,
}

impl BatchClassifier {
    /// One partition per worker of the current rayon pool
    pub fn new() -> Self {
        Self { partitions: None }
    }

    /// Fixed partition count (clamped to at least one)
    pub fn with_partitions(partitions: usize) -> Self {
        Self {
            partitions: Some(partitions.max(1)),
        }
    }

    pub fn partition_count(&self) -> usize {
        self.partitions
            .unwrap_or_else(rayon::current_num_threads)
            .max(1)
    }

    /// Points classified inside.
    ///
    /// Points keep their input order within a partition and partitions are
    /// concatenated in order, so output is deterministic for a fixed
    /// partition count.
    pub fn inside_points<S: TriangleSource + ?Sized>(&self, points: &[Point], source: &S) -> Vec<Point> {
        let partitions = self.partition_count();
        log::debug!(
            "Classifying {} points in {} partitions",
            points.len(),
            partitions
        );

        let results: Vec<Vec<Point>> = (0..partitions)
            .into_par_iter()
            .map(|index| {
                points[partition_range(points.len(), partitions, index)]
                    .iter()
                    .filter(|point| is_point_inside(point, source))
                    .copied()
                    .collect()
            })
            .collect();

        results.concat()
    }

    /// Per-point verdicts in input order
    pub fn inside_mask<S: TriangleSource + ?Sized>(&self, points: &[Point], source: &S) -> Vec<bool> {
        let partitions = self.partition_count();
        let results: Vec<Vec<bool>> = (0..partitions)
            .into_par_iter()
            .map(|index| {
                points[partition_range(points.len(), partitions, index)]
                    .iter()
                    .map(|point| is_point_inside(point, source))
                    .collect()
            })
            .collect();

        results.concat()
    }
}

/// Contiguous, balanced range of partition `index` out of `partitions`
pub fn partition_range(len: usize, partitions: usize, index: usize) -> Range<usize> {
    let partitions = partitions.max(1);
    (index * len / partitions)..((index + 1) * len / partitions)
}

/// Points classified inside, one partition per pool worker
pub fn classify_points<S: TriangleSource + ?Sized>(points: &[Point], source: &S) -> Vec<Point> {
    BatchClassifier::new().inside_points(points, source)
}

/// Complement of `inside` relative to `points`.
///
/// Matching is exact float equality, so every copy of an inside coordinate is
/// excluded. Input order is preserved.
pub fn outside_points(points: &[Point], inside: &[Point]) -> Vec<Point> {
    let inside: AHashSet<Point> = inside.iter().copied().collect();
    points
        .iter()
        .filter(|point| !inside.contains(*point))
        .copied()
        .collect()
}
