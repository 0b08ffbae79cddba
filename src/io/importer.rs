// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point and mesh file importers

use super::parser::{parse_obj, parse_points, Diagnostic, LoadReport};
use crate::error::{ProbeError, Result};
use crate::geometry::{Point, Triangle};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Diagnostics logged individually before the rest are summarized
const MAX_LOGGED_DIAGNOSTICS: usize = 20;

/// Mesh file formats understood by [`load_mesh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    Obj,
    Stl,
}

impl MeshFormat {
    /// Pick the format from the file extension; no extension means OBJ
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().map(|ext| ext.to_string_lossy().to_lowercase()) {
            None => Ok(MeshFormat::Obj),
            Some(ext) if ext == "obj" => Ok(MeshFormat::Obj),
            Some(ext) if ext == "stl" => Ok(MeshFormat::Stl),
            Some(ext) => Err(ProbeError::UnsupportedFormat(ext)),
        }
    }
}

/// Load a whitespace-delimited point file
pub fn load_points(path: impl AsRef<Path>) -> Result<LoadReport<Point>> {
    let path = path.as_ref();
    log::debug!("Reading points from {}", display_path(path));

    let file = File::open(path).map_err(|e| ProbeError::io(path, e))?;
    let report = parse_points(BufReader::new(file)).map_err(|e| ProbeError::io(path, e))?;

    log_diagnostics(path, &report.diagnostics);
    log::info!("Loaded {} points from {}", report.len(), path.display());
    Ok(report)
}

/// Load a closed triangle mesh from OBJ or STL
pub fn load_mesh(path: impl AsRef<Path>) -> Result<LoadReport<Triangle>> {
    let path = path.as_ref();
    log::debug!("Reading mesh from {}", display_path(path));

    let report = match MeshFormat::from_path(path)? {
        MeshFormat::Obj => load_obj(path)?,
        MeshFormat::Stl => load_stl(path)?,
    };

    log_diagnostics(path, &report.diagnostics);
    log::info!(
        "Loaded {} triangles from {}",
        report.len(),
        path.display()
    );
    Ok(report)
}

/// Load the `v`/`f` subset of an OBJ file
pub fn load_obj(path: impl AsRef<Path>) -> Result<LoadReport<Triangle>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ProbeError::io(path, e))?;
    parse_obj(BufReader::new(file)).map_err(|e| ProbeError::io(path, e))
}

/// Load an ASCII or binary STL file
pub fn load_stl(path: impl AsRef<Path>) -> Result<LoadReport<Triangle>> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| ProbeError::io(path, e))?;
    let stl = stl_io::read_stl(&mut file).map_err(|e| ProbeError::io(path, e))?;

    let triangles = stl
        .faces
        .iter()
        .map(|face| {
            let corner = |i: usize| {
                let v = &stl.vertices[face.vertices[i]];
                Point::new(v[0], v[1], v[2])
            };
            Triangle::new(corner(0), corner(1), corner(2))
        })
        .collect();

    Ok(LoadReport::new(triangles))
}

fn log_diagnostics(path: &Path, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics.iter().take(MAX_LOGGED_DIAGNOSTICS) {
        log::warn!("{}: {}", path.display(), diagnostic);
    }
    if diagnostics.len() > MAX_LOGGED_DIAGNOSTICS {
        log::warn!(
            "{}: {} more lines skipped",
            path.display(),
            diagnostics.len() - MAX_LOGGED_DIAGNOSTICS
        );
    }
}

fn display_path(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
