// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Run configuration

use crate::error::{ProbeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File picked up from the working directory by [`ProbeConfig::load`]
pub const DEFAULT_CONFIG_FILE: &str = "meshprobe.toml";

/// Classification run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Query point file
    pub points: Option<PathBuf>,
    /// Closed mesh file (OBJ or STL)
    pub mesh: Option<PathBuf>,
    /// Where inside points are written
    pub inside_points_output: Option<PathBuf>,
    /// Where the visualization OBJ is written
    pub visualization_output: Option<PathBuf>,
    /// Worker pool size, hardware parallelism when unset
    pub threads: Option<usize>,
    /// Point partitions, pool size when unset
    pub partitions: Option<usize>,
    /// `env_logger` filter directives
    pub log_level: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            points: None,
            mesh: None,
            inside_points_output: Some(PathBuf::from("insidePoints.txt")),
            visualization_output: Some(PathBuf::from("visualization.obj")),
            threads: None,       // Auto-detect
            partitions: None,    // One per worker
            log_level: "warn".to_string(),
        }
    }
}

impl ProbeConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ProbeError::io(path, e))?;
        let config: ProbeConfig = toml::from_str(&content)
            .map_err(|e| ProbeError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `meshprobe.toml` if present, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `MESHPROBE_*` overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(threads) = lookup("MESHPROBE_THREADS") {
            self.threads = Some(parse_count("MESHPROBE_THREADS", &threads)?);
        }

        if let Some(partitions) = lookup("MESHPROBE_PARTITIONS") {
            self.partitions = Some(parse_count("MESHPROBE_PARTITIONS", &partitions)?);
        }

        if let Some(level) = lookup("MESHPROBE_LOG") {
            self.log_level = level;
        }

        if let Some(dir) = lookup("MESHPROBE_OUTPUT_DIR") {
            let dir = PathBuf::from(dir);
            self.inside_points_output = self
                .inside_points_output
                .take()
                .map(|p| dir.join(p.file_name().unwrap_or(p.as_os_str())));
            self.visualization_output = self
                .visualization_output
                .take()
                .map(|p| dir.join(p.file_name().unwrap_or(p.as_os_str())));
        }

        self.validate()
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content =
            toml::to_string_pretty(self).map_err(|e| ProbeError::Serialization(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| ProbeError::io(path, e))
    }

    pub fn validate(&self) -> Result<()> {
        if self.threads == Some(0) {
            return Err(ProbeError::Config("threads must be at least 1".into()));
        }
        if self.partitions == Some(0) {
            return Err(ProbeError::Config("partitions must be at least 1".into()));
        }
        Ok(())
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| ProbeError::Config(format!("{} must be a positive integer, got {:?}", key, value)))
}
