// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs, writing outputs or configuring a run.
///
/// Malformed lines inside an input file are not errors; they are collected as
/// [`crate::io::Diagnostic`]s next to the parsed data.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// File could not be opened, read or written
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Mesh file extension not handled by any importer
    #[error("unsupported mesh format: {0}")]
    UnsupportedFormat(String),

    /// Invalid configuration value or unparsable config file
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Sample region has non-finite bounds or extent
    #[error("cannot sample region: {0}")]
    Sampling(String),

    /// Worker pool could not be created
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Report or config serialization failed
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ProbeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;
