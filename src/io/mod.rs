// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - point and mesh import, result and visualization export

mod exporter;
mod importer;
mod parser;

pub use exporter::{save_points, save_visualization, write_points, write_visualization};
pub use importer::{load_mesh, load_obj, load_points, load_stl, MeshFormat};
pub use parser::{parse_obj, parse_points, Diagnostic, DiagnosticKind, LoadReport};
