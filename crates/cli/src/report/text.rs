// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text format output.

use std::io::{self, Write};
use std::path::PathBuf;

use termcolor::WriteColor;

use super::{ReportFormatter, format_percentage};
use crate::color::{scheme, verdict};
use crate::coverage::CoverageReport;
use crate::pattern::to_slash;
use crate::runner::RunSummary;

/// Human-readable formatter.
pub struct TextFormatter;

fn label(out: &mut dyn WriteColor, passed: bool) -> io::Result<()> {
    out.set_color(&verdict(passed))?;
    write!(out, "{}", if passed { "PASS" } else { "FAIL" })?;
    out.reset()
}

impl ReportFormatter for TextFormatter {
    fn discovered(&self, out: &mut dyn WriteColor, files: &[PathBuf]) -> io::Result<()> {
        for file in files {
            writeln!(out, "{}", to_slash(file))?;
        }
        Ok(())
    }

    fn coverage(&self, out: &mut dyn WriteColor, report: &CoverageReport) -> io::Result<()> {
        out.set_color(&scheme::heading())?;
        write!(out, "coverage")?;
        out.reset()?;
        match &report.profile {
            Some(profile) => writeln!(out, " ({} files, profile {})", report.files, profile)?,
            None => writeln!(out, " ({} files)", report.files)?,
        }

        for m in &report.metrics {
            write!(out, "  {:<11}", m.metric.as_str())?;
            if m.percentage.is_none() {
                out.set_color(&scheme::muted())?;
            }
            write!(out, "{:>8}", format_percentage(m.percentage))?;
            out.reset()?;
            write!(
                out,
                "  {:>13}  min {:>3}%  ",
                format!("{}/{}", m.covered, m.total),
                m.threshold
            )?;
            label(out, m.passed)?;
            writeln!(out)?;
        }

        label(out, report.passed)?;
        if report.passed {
            writeln!(out, ": coverage thresholds met")
        } else {
            let failing: Vec<&str> = report.shortfalls().map(|m| m.metric.as_str()).collect();
            writeln!(out, ": below threshold: {}", failing.join(", "))
        }
    }

    fn run(
        &self,
        out: &mut dyn WriteColor,
        summary: &RunSummary,
        coverage: &CoverageReport,
    ) -> io::Result<()> {
        for file in &summary.files {
            label(out, file.passed)?;
            write!(out, " ")?;
            out.set_color(&scheme::path())?;
            write!(out, "{}", to_slash(&file.path))?;
            out.reset()?;
            writeln!(out, " ({}ms)", file.duration.as_millis())?;

            if let Some(error) = &file.error {
                writeln!(out, "  {}", error)?;
            } else if !file.passed {
                for line in file.output.lines() {
                    writeln!(out, "  {}", line)?;
                }
            }
        }

        let failed = summary.failed().count();
        writeln!(
            out,
            "\n{} files: {} passed, {} failed\n",
            summary.files.len(),
            summary.files.len() - failed,
            failed
        )?;
        self.coverage(out, coverage)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
