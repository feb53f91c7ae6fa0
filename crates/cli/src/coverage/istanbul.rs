// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Istanbul `json-summary` parsing.
//!
//! The format maps file paths to `{ lines, statements, functions, branches }`
//! counters with `total` and `covered` fields, plus a `total` entry that
//! summarizes everything. The `total` entry is ignored; aggregation is
//! recomputed from the per-file counters after filtering. A counter whose
//! `covered` exceeds its `total` is rejected.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::{Counts, CoverageMap, FileCoverage, Metric};
use crate::pattern::to_slash;

#[derive(Debug, Default, Deserialize)]
struct Counter {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    covered: u64,
}

impl Counter {
    fn counts(&self, path: &str, metric: Metric) -> Result<Counts, String> {
        if self.covered > self.total {
            return Err(format!(
                "{}: {} covered {} exceeds total {}",
                path, metric, self.covered, self.total
            ));
        }
        Ok(Counts::new(self.covered, self.total))
    }
}

#[derive(Debug, Deserialize)]
struct FileSummary {
    #[serde(default)]
    lines: Counter,
    #[serde(default)]
    statements: Counter,
    #[serde(default)]
    functions: Counter,
    #[serde(default)]
    branches: Counter,
}

/// Parse an istanbul summary into a coverage map keyed relative to `root`.
pub fn parse_summary(content: &str, root: &Path) -> Result<CoverageMap, String> {
    let parsed: BTreeMap<String, FileSummary> = serde_json::from_str(content)
        .map_err(|e| format!("failed to parse coverage summary: {}", e))?;

    parsed
        .into_iter()
        .filter(|(path, _)| path != "total")
        .map(|(path, summary)| -> Result<(String, FileCoverage), String> {
            let coverage = FileCoverage {
                branches: summary.branches.counts(&path, Metric::Branches)?,
                functions: summary.functions.counts(&path, Metric::Functions)?,
                lines: summary.lines.counts(&path, Metric::Lines)?,
                statements: summary.statements.counts(&path, Metric::Statements)?,
            };
            Ok((normalize_coverage_path(&path, root), coverage))
        })
        .collect()
}

/// Make a reported path relative to the project root when it lies inside it.
pub fn normalize_coverage_path(path: &str, root: &Path) -> String {
    let p = Path::new(path);
    match p.strip_prefix(root) {
        Ok(relative) => to_slash(relative),
        Err(_) => {
            if p.is_absolute() {
                tracing::debug!("coverage path outside project root: {}", path);
            }
            path.trim_start_matches("./").to_string()
        }
    }
}

#[cfg(test)]
#[path = "istanbul_tests.rs"]
mod tests;
