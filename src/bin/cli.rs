// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Meshprobe CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use meshprobe::cli::{MeshSummary, Reporter, RunProgress, Runner};
use meshprobe::io;
use meshprobe::sampling::{sample_points, SampleConfig};
use meshprobe::{BoundingBox, ProbeConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "meshprobe")]
#[command(about = "Classify points as inside or outside a closed triangle mesh", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Query point file (one `x y z` per line)
    #[arg(value_name = "POINTS")]
    points: Option<PathBuf>,

    /// Mesh file (OBJ or STL)
    #[arg(value_name = "MESH")]
    mesh: Option<PathBuf>,

    #[command(flatten)]
    run: RunArgs,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Args, Default)]
struct RunArgs {
    /// Where inside points are written
    #[arg(long, value_name = "FILE")]
    inside_out: Option<PathBuf>,

    /// Where the visualization OBJ is written
    #[arg(long, value_name = "FILE")]
    visualization: Option<PathBuf>,

    /// Skip writing the visualization OBJ
    #[arg(long)]
    no_visualization: bool,

    /// Worker threads
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Point partitions
    #[arg(short, long)]
    partitions: Option<usize>,

    /// Configuration file (defaults to ./meshprobe.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write run metrics as JSON
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify query points against a mesh
    Classify {
        /// Query point file
        points: PathBuf,

        /// Mesh file
        mesh: PathBuf,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Generate random query points around a mesh
    Sample {
        /// Mesh file
        mesh: PathBuf,

        /// Number of points
        #[arg(short = 'n', long, default_value = "10000")]
        count: usize,

        /// Output point file
        #[arg(short, long, default_value = "points.txt")]
        output: PathBuf,

        /// Fraction of the mesh size added around its bounds
        #[arg(long, default_value = "0.1")]
        margin: f32,

        /// Seed for a reproducible cloud
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print mesh statistics
    Inspect {
        /// Mesh file
        mesh: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        Reporter::report_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Classify { points, mesh, run }) => {
            classify_command(points, mesh, run, cli.verbose)
        }
        Some(Commands::Sample {
            mesh,
            count,
            output,
            margin,
            seed,
        }) => {
            init_logger("warn", cli.verbose);
            let config = SampleConfig {
                count,
                margin,
                seed,
            };
            sample_command(&mesh, &output, &config)
        }
        Some(Commands::Inspect { mesh }) => {
            init_logger("warn", cli.verbose);
            inspect_command(&mesh)
        }
        Some(Commands::Version) => {
            println!("meshprobe v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => match (cli.points, cli.mesh) {
            (Some(points), Some(mesh)) => classify_command(points, mesh, cli.run, cli.verbose),
            _ => {
                eprintln!("Usage: meshprobe <POINTS> <MESH>");
                anyhow::bail!("point and mesh files required")
            }
        },
    }
}

fn classify_command(points: PathBuf, mesh: PathBuf, args: RunArgs, verbose: bool) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = ProbeConfig::from_file(path)?;
            config.apply_env(|key| std::env::var(key).ok())?;
            config
        }
        None => ProbeConfig::load()?,
    };

    config.points = Some(points);
    config.mesh = Some(mesh);
    if let Some(path) = args.inside_out {
        config.inside_points_output = Some(path);
    }
    if let Some(path) = args.visualization {
        config.visualization_output = Some(path);
    }
    if args.no_visualization {
        config.visualization_output = None;
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }
    if args.partitions.is_some() {
        config.partitions = args.partitions;
    }

    init_logger(&config.log_level, verbose);

    let runner = Runner::new(config).context("invalid configuration")?;
    log::debug!(
        "Classifying on {} threads, {} partitions",
        runner.thread_count(),
        runner.partition_count()
    );

    let mut progress = Spinner::new(verbose);
    let outcome = runner.run_with(&mut progress)?;
    let metrics = &outcome.metrics;

    let config = runner.config();
    if verbose {
        if let Some(path) = &config.points {
            Reporter::report_diagnostics(path, &outcome.point_diagnostics);
        }
        if let Some(path) = &config.mesh {
            Reporter::report_diagnostics(path, &outcome.mesh_diagnostics);
        }
        Reporter::report_run(metrics);
    } else {
        println!(
            "{} {} of {} points inside",
            "✓".green(),
            metrics.inside_count,
            metrics.points_loaded
        );
    }

    if let Some(path) = &config.inside_points_output {
        Reporter::report_output("Inside points", path);
    }
    if let Some(path) = &config.visualization_output {
        Reporter::report_output("Visualization", path);
    }
    if let Some(path) = &args.report {
        metrics
            .write_json(path)
            .with_context(|| format!("writing report {}", path.display()))?;
        Reporter::report_output("Report", path);
    }

    Ok(())
}

/// Spinner shown while points are classified in verbose mode
struct Spinner {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Spinner {
    fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }
}

impl RunProgress for Spinner {
    fn classify_started(&mut self, points: usize, triangles: usize) {
        if !self.enabled {
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!(
            "Classifying {} points against {} triangles",
            points, triangles
        ));
        pb.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(pb);
    }

    fn classify_finished(&mut self, _inside: usize) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
    }
}

fn sample_command(mesh: &Path, output: &Path, config: &SampleConfig) -> Result<()> {
    let report = io::load_mesh(mesh)?;
    let bounds = BoundingBox::from_triangles(&report.items);
    if bounds.is_empty() {
        anyhow::bail!("{} has no triangles to sample around", mesh.display());
    }

    let points = sample_points(&bounds, config)?;
    io::save_points(output, &points)?;

    println!(
        "{} Wrote {} points to {}",
        "✓".green(),
        points.len(),
        output.display()
    );
    Ok(())
}

fn inspect_command(mesh: &Path) -> Result<()> {
    let summary = MeshSummary::load(mesh)?;
    Reporter::report_mesh(mesh, &summary);
    Ok(())
}

/// Log to stderr at `level`, raised to `info` by `--verbose` and overridden by `RUST_LOG`
fn init_logger(level: &str, verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.target(env_logger::Target::Stderr);
    builder.filter_level(log::LevelFilter::Warn);
    builder.parse_filters(level);
    if verbose {
        builder.filter_module("meshprobe", log::LevelFilter::Info);
    }
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // A logger may already be installed when embedded; keep it.
    let _ = builder.try_init();
}
