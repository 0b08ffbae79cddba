// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Classification pipeline: load, classify, write

use crate::config::ProbeConfig;
use crate::error::{ProbeError, Result};
use crate::geometry::{outside_points, BatchClassifier, BoundingBox, Mesh, Point, PreparedMesh};
use crate::io::{self, Diagnostic};
use crate::metrics::{RunMetrics, Timer};
use std::path::Path;

/// Inputs read from disk, with the lines that had to be skipped
pub struct LoadedInputs {
    pub points: Vec<Point>,
    pub mesh: Mesh,
    pub point_diagnostics: Vec<Diagnostic>,
    pub mesh_diagnostics: Vec<Diagnostic>,
}

/// Outcome of a full run
pub struct RunOutcome {
    pub inside: Vec<Point>,
    pub outside: Vec<Point>,
    pub metrics: RunMetrics,
    pub point_diagnostics: Vec<Diagnostic>,
    pub mesh_diagnostics: Vec<Diagnostic>,
}

/// Runner for executing classification runs
pub struct Runner {
    config: ProbeConfig,
    pool: Option<rayon::ThreadPool>,
}

impl Runner {
    pub fn new(config: ProbeConfig) -> Result<Self> {
        config.validate()?;
        let pool = match config.threads {
            Some(threads) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("meshprobe-{}", i))
                    .build()?,
            ),
            None => None,
        };
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Worker count of the pool classification runs on
    pub fn thread_count(&self) -> usize {
        self.pool
            .as_ref()
            .map(|pool| pool.current_num_threads())
            .unwrap_or_else(rayon::current_num_threads)
    }

    pub fn partition_count(&self) -> usize {
        self.config.partitions.unwrap_or_else(|| self.thread_count())
    }

    /// Read the configured point and mesh files
    pub fn load(&self) -> Result<LoadedInputs> {
        let points_path = required(&self.config.points, "points")?;
        let mesh_path = required(&self.config.mesh, "mesh")?;

        let points = io::load_points(points_path)?;
        let mesh = io::load_mesh(mesh_path)?;

        Ok(LoadedInputs {
            points: points.items,
            mesh: Mesh::from_triangles(mesh.items),
            point_diagnostics: points.diagnostics,
            mesh_diagnostics: mesh.diagnostics,
        })
    }

    /// Points inside `mesh`, computed on this runner's pool
    pub fn classify(&self, points: &[Point], mesh: &Mesh) -> Vec<Point> {
        let prepared = PreparedMesh::new(mesh);
        let classifier = BatchClassifier::with_partitions(self.partition_count());
        let job = || classifier.inside_points(points, &prepared);

        match &self.pool {
            Some(pool) => pool.install(job),
            None => job(),
        }
    }

    /// Write the configured outputs
    pub fn write(&self, inside: &[Point], outside: &[Point], mesh: &Mesh) -> Result<()> {
        if let Some(path) = &self.config.visualization_output {
            io::save_visualization(path, inside, outside, &mesh.triangles)?;
        }
        if let Some(path) = &self.config.inside_points_output {
            io::save_points(path, inside)?;
        }
        Ok(())
    }

    /// Load, classify, and write outputs, collecting timings
    pub fn run(&self) -> Result<RunOutcome> {
        self.run_with(&mut ())
    }

    /// [`Runner::run`] with `progress` notified around the classification phase
    pub fn run_with<P: RunProgress + ?Sized>(&self, progress: &mut P) -> Result<RunOutcome> {
        let mut metrics = RunMetrics::new();

        let timer = Timer::start();
        let inputs = self.load()?;
        metrics.load_ms = timer.elapsed_ms();

        progress.classify_started(inputs.points.len(), inputs.mesh.triangle_count());
        let (inside, outside) = self.classify_timed(&inputs, &mut metrics);
        progress.classify_finished(inside.len());

        let timer = Timer::start();
        self.write(&inside, &outside, &inputs.mesh)?;
        metrics.write_ms = timer.elapsed_ms();

        Ok(RunOutcome {
            inside,
            outside,
            metrics,
            point_diagnostics: inputs.point_diagnostics,
            mesh_diagnostics: inputs.mesh_diagnostics,
        })
    }

    /// Classify loaded inputs and fill in counts and classification time
    fn classify_timed(
        &self,
        inputs: &LoadedInputs,
        metrics: &mut RunMetrics,
    ) -> (Vec<Point>, Vec<Point>) {
        metrics.points_loaded = inputs.points.len();
        metrics.triangles_loaded = inputs.mesh.triangle_count();
        metrics.skipped_lines = inputs.point_diagnostics.len() + inputs.mesh_diagnostics.len();
        metrics.threads = self.thread_count();
        metrics.partitions = self.partition_count();

        if inputs.mesh.is_empty() {
            log::warn!("Mesh has no triangles; every point classifies as outside");
        }

        let timer = Timer::start();
        let inside = self.classify(&inputs.points, &inputs.mesh);
        metrics.classify_ms = timer.elapsed_ms();

        let outside = outside_points(&inputs.points, &inside);
        metrics.inside_count = inside.len();
        metrics.outside_count = outside.len();

        log::info!(
            "{} of {} points inside ({:.2} ms)",
            inside.len(),
            inputs.points.len(),
            metrics.classify_ms
        );
        (inside, outside)
    }
}

/// Hooks around the classification phase of [`Runner::run_with`]
pub trait RunProgress {
    fn classify_started(&mut self, _points: usize, _triangles: usize) {}

    fn classify_finished(&mut self, _inside: usize) {}
}

impl RunProgress for () {}

/// Triangle count, bounds and skipped lines of one mesh file
#[derive(Debug, Clone)]
pub struct MeshSummary {
    pub triangle_count: usize,
    pub bounds: BoundingBox,
    pub diagnostics: Vec<Diagnostic>,
}

impl MeshSummary {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let report = io::load_mesh(path)?;
        Ok(Self {
            triangle_count: report.items.len(),
            bounds: BoundingBox::from_triangles(&report.items),
            diagnostics: report.diagnostics,
        })
    }
}

fn required<'a>(path: &'a Option<std::path::PathBuf>, what: &str) -> Result<&'a Path> {
    path.as_deref()
        .ok_or_else(|| ProbeError::Config(format!("no {} file given", what)))
}
