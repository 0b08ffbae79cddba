// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Random query point generation around a mesh

use crate::error::{ProbeError, Result};
use crate::geometry::{BoundingBox, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Settings for [`sample_points`]
#[derive(Debug, Clone, Copy)]
pub struct SampleConfig {
    pub count: usize,
    /// Fraction of the box size added on every side
    pub margin: f32,
    /// Fixed seed for reproducible clouds
    pub seed: Option<u64>,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            count: 10_000,
            margin: 0.1,
            seed: None,
        }
    }
}

/// Uniform random points inside `bounds` grown by `config.margin`.
///
/// An empty box yields no points. A region whose corners or extent are not
/// finite is rejected.
pub fn sample_points(bounds: &BoundingBox, config: &SampleConfig) -> Result<Vec<Point>> {
    if bounds.is_empty() || config.count == 0 {
        return Ok(Vec::new());
    }

    let region = bounds.inflated(config.margin.max(0.0));
    check_finite(&region)?;

    Ok(match config.seed {
        Some(seed) => fill(&region, config.count, &mut StdRng::seed_from_u64(seed)),
        None => fill(&region, config.count, &mut rand::thread_rng()),
    })
}

fn check_finite(region: &BoundingBox) -> Result<()> {
    let size = region.size();
    let finite = [region.min.x, region.min.y, region.min.z]
        .into_iter()
        .chain([region.max.x, region.max.y, region.max.z])
        .chain([size.x, size.y, size.z])
        .all(f32::is_finite);

    if finite {
        Ok(())
    } else {
        Err(ProbeError::Sampling(format!(
            "bounds {} .. {} are not finite",
            region.min, region.max
        )))
    }
}

fn fill<R: Rng>(region: &BoundingBox, count: usize, rng: &mut R) -> Vec<Point> {
    (0..count)
        .map(|_| {
            Point::new(
                rng.gen_range(region.min.x..=region.max.x),
                rng.gen_range(region.min.y..=region.max.y),
                rng.gen_range(region.min.z..=region.max.z),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_points_stay_in_region() {
        let config = SampleConfig {
            count: 500,
            margin: 0.5,
            seed: Some(7),
        };
        let points = sample_points(&unit_box(), &config).unwrap();
        let region = unit_box().inflated(0.5);

        assert_eq!(points.len(), 500);
        assert!(points.iter().all(|p| region.contains(p)));
        assert!(points.iter().any(|p| !unit_box().contains(p)));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let config = SampleConfig {
            count: 64,
            margin: 0.0,
            seed: Some(42),
        };
        assert_eq!(
            sample_points(&unit_box(), &config).unwrap(),
            sample_points(&unit_box(), &config).unwrap()
        );
    }

    #[test]
    fn test_empty_box_yields_nothing() {
        let points = sample_points(&BoundingBox::empty(), &SampleConfig::default()).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_flat_box() {
        let flat = BoundingBox::new(Point::new(0.0, 0.0, 2.0), Point::new(1.0, 1.0, 2.0));
        let config = SampleConfig {
            count: 10,
            margin: 0.0,
            seed: Some(1),
        };
        assert!(sample_points(&flat, &config)
            .unwrap()
            .iter()
            .all(|p| p.z == 2.0));
    }

    #[test]
    fn test_overflowing_extent_is_rejected() {
        // Corners are finite but max - min overflows f32
        let huge = BoundingBox::new(Point::new(-3e38, 0.0, 0.0), Point::new(3e38, 1.0, 1.0));
        for margin in [0.0, 0.1] {
            let config = SampleConfig {
                count: 3,
                margin,
                seed: Some(3),
            };
            assert!(matches!(
                sample_points(&huge, &config),
                Err(ProbeError::Sampling(_))
            ));
        }
    }

    #[test]
    fn test_infinite_corner_is_rejected() {
        let unbounded = BoundingBox::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(f32::INFINITY, 1.0, 1.0),
        );
        let config = SampleConfig {
            count: 3,
            margin: 0.0,
            seed: None,
        };
        assert!(matches!(
            sample_points(&unbounded, &config),
            Err(ProbeError::Sampling(_))
        ));
    }
}
