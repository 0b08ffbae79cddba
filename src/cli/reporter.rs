// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::runner::MeshSummary;
use crate::io::Diagnostic;
use crate::metrics::RunMetrics;
use colored::*;
use std::path::Path;

/// Diagnostics printed per file before the rest are summarized
const MAX_PRINTED_DIAGNOSTICS: usize = 10;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Print the summary of a classification run
    pub fn report_run(metrics: &RunMetrics) {
        println!("\n{}", "━".repeat(60).bright_black());
        println!("{}", "Classification Summary".bold());
        println!("{}", "━".repeat(60).bright_black());

        Self::print_row("Points loaded:", metrics.points_loaded.to_string().cyan());
        Self::print_row(
            "Triangles loaded:",
            metrics.triangles_loaded.to_string().cyan(),
        );
        if metrics.skipped_lines > 0 {
            Self::print_row("Skipped lines:", metrics.skipped_lines.to_string().yellow());
        }
        Self::print_row(
            "Inside:",
            format!(
                "{} ({:.1}%)",
                metrics.inside_count,
                metrics.inside_ratio() * 100.0
            )
            .green(),
        );
        Self::print_row("Outside:", metrics.outside_count.to_string().normal());
        Self::print_row(
            "Workers:",
            format!("{} threads, {} partitions", metrics.threads, metrics.partitions).normal(),
        );

        println!("\n{}", "Timing:".bold());
        Self::print_row("Load:", Self::format_ms(metrics.load_ms).normal());
        Self::print_row("Classify:", Self::format_ms(metrics.classify_ms).cyan());
        Self::print_row("Write:", Self::format_ms(metrics.write_ms).normal());
        Self::print_row(
            "Throughput:",
            format!("{:.0} points/s", metrics.throughput()).yellow(),
        );
        println!("{}", "━".repeat(60).bright_black());
    }

    /// Print skipped-line diagnostics for one input file
    pub fn report_diagnostics(file: &Path, diagnostics: &[Diagnostic]) {
        if diagnostics.is_empty() {
            return;
        }

        println!(
            "{} {} skipped {} line(s)",
            "⚠".yellow(),
            file.display().to_string().cyan(),
            diagnostics.len()
        );
        for diagnostic in diagnostics.iter().take(MAX_PRINTED_DIAGNOSTICS) {
            println!("    {}", diagnostic.to_string().bright_black());
        }
        if diagnostics.len() > MAX_PRINTED_DIAGNOSTICS {
            println!(
                "    {}",
                format!("... and {} more", diagnostics.len() - MAX_PRINTED_DIAGNOSTICS).bright_black()
            );
        }
    }

    /// Print mesh statistics for the `inspect` command
    pub fn report_mesh(file: &Path, summary: &MeshSummary) {
        println!("{} {}", "Mesh:".bold(), file.display().to_string().cyan());
        Self::print_row("Triangles:", summary.triangle_count.to_string().cyan());
        let bounds = &summary.bounds;
        if bounds.is_empty() {
            Self::print_row("Bounds:", "empty".yellow());
        } else {
            Self::print_row("Bounds min:", bounds.min.to_string().normal());
            Self::print_row("Bounds max:", bounds.max.to_string().normal());
        }
        Self::report_diagnostics(file, &summary.diagnostics);
    }

    /// Report an output file that was written
    pub fn report_output(label: &str, path: &Path) {
        println!(
            "  {} {}",
            format!("{}:", label).bright_black(),
            path.display().to_string().cyan()
        );
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }

    fn print_row(label: &str, value: ColoredString) {
        println!("  {:<18} {}", label.bright_black(), value);
    }

    fn format_ms(ms: f64) -> String {
        if ms < 1.0 {
            format!("{:.0}μs", ms * 1000.0)
        } else if ms < 1000.0 {
            format!("{:.2}ms", ms)
        } else {
            format!("{:.2}s", ms / 1000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ms() {
        assert_eq!(Reporter::format_ms(0.5), "500μs");
        assert_eq!(Reporter::format_ms(12.345), "12.35ms");
        assert_eq!(Reporter::format_ms(2500.0), "2.50s");
    }
}
