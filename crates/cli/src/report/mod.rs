// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for discovery lists, coverage verdicts, and runs.
//!
//! Formatters write to a [`WriteColor`] so the same code serves a colored
//! terminal, a plain pipe, and in-memory buffers in tests.

mod json;
mod text;

use std::io;
use std::path::{Path, PathBuf};

use termcolor::WriteColor;

use crate::cli::OutputFormat;
use crate::config::defaults::COVERAGE_REPORT_FILE;
use crate::coverage::CoverageReport;
use crate::error::{Error, Result};
use crate::runner::RunSummary;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Formats command results for one output format.
pub trait ReportFormatter {
    /// Discovered test files, already sorted.
    fn discovered(&self, out: &mut dyn WriteColor, files: &[PathBuf]) -> io::Result<()>;

    /// A coverage verdict.
    fn coverage(&self, out: &mut dyn WriteColor, report: &CoverageReport) -> io::Result<()>;

    /// Per-file results of a run followed by its coverage verdict.
    fn run(
        &self,
        out: &mut dyn WriteColor,
        summary: &RunSummary,
        coverage: &CoverageReport,
    ) -> io::Result<()>;
}

/// Formatter for the requested output format.
pub fn formatter(format: OutputFormat) -> Box<dyn ReportFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// `55.00%`, or `n/a` when nothing was measurable.
pub fn format_percentage(percentage: Option<f64>) -> String {
    match percentage {
        Some(pct) => format!("{:.2}%", pct),
        None => "n/a".to_string(),
    }
}

/// Write the report as JSON into `dir`, creating it if needed.
pub fn write_report(report: &CoverageReport, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    let path = dir.join(COVERAGE_REPORT_FILE);
    let content = serde_json::to_string_pretty(report)
        .map_err(|e| Error::io(&path, io::Error::other(e)))?;
    std::fs::write(&path, content).map_err(|e| Error::io(&path, e))?;
    tracing::debug!("wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
