// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON format output.

use std::io::{self, Write};
use std::path::PathBuf;

use serde_json::json;
use termcolor::WriteColor;

use super::ReportFormatter;
use crate::coverage::CoverageReport;
use crate::pattern::to_slash;
use crate::runner::RunSummary;

/// Machine-readable formatter. Colors are never emitted.
pub struct JsonFormatter;

fn emit(out: &mut dyn WriteColor, value: &serde_json::Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

impl ReportFormatter for JsonFormatter {
    fn discovered(&self, out: &mut dyn WriteColor, files: &[PathBuf]) -> io::Result<()> {
        let files: Vec<String> = files.iter().map(|f| to_slash(f)).collect();
        emit(out, &json!({ "count": files.len(), "files": files }))
    }

    fn coverage(&self, out: &mut dyn WriteColor, report: &CoverageReport) -> io::Result<()> {
        emit(out, &serde_json::to_value(report)?)
    }

    fn run(
        &self,
        out: &mut dyn WriteColor,
        summary: &RunSummary,
        coverage: &CoverageReport,
    ) -> io::Result<()> {
        let files: Vec<_> = summary
            .files
            .iter()
            .map(|f| {
                json!({
                    "path": to_slash(&f.path),
                    "passed": f.passed,
                    "error": f.error.as_ref().map(|e| e.to_string()),
                    "duration_ms": f.duration.as_millis() as u64,
                })
            })
            .collect();

        emit(
            out,
            &json!({
                "passed": summary.passed() && coverage.passed,
                "files": files,
                "coverage": serde_json::to_value(coverage)?,
            }),
        )
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
