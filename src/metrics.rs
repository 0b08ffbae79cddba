// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Run metrics collection and reporting

use crate::error::{ProbeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};

/// Counts and timings for one classification run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub points_loaded: usize,
    pub triangles_loaded: usize,
    pub skipped_lines: usize,
    pub inside_count: usize,
    pub outside_count: usize,
    pub threads: usize,
    pub partitions: usize,
    pub load_ms: f64,
    pub classify_ms: f64,
    pub write_ms: f64,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of query points classified inside
    pub fn inside_ratio(&self) -> f64 {
        if self.points_loaded == 0 {
            0.0
        } else {
            self.inside_count as f64 / self.points_loaded as f64
        }
    }

    /// Classified points per second
    pub fn throughput(&self) -> f64 {
        if self.classify_ms <= 0.0 {
            0.0
        } else {
            self.points_loaded as f64 / (self.classify_ms / 1000.0)
        }
    }

    /// Export metrics as JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ProbeError::Serialization(e.to_string()))
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?).map_err(|e| ProbeError::io(path, e))
    }
}

/// Timer for measuring operation duration
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}
