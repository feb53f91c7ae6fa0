// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage measurements, aggregation, and threshold enforcement.
//!
//! Measurements arrive per file (from one or more workers), are merged by
//! summation, filtered by the descriptor's include/exclude patterns, summed
//! per metric, and compared against the active thresholds.

mod enforce;
pub mod istanbul;

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::CoverageConfig;
use crate::config::defaults::CONFIG_FILE;
use crate::error::{Error, Result};
use crate::pattern::PatternFilter;

pub use enforce::{CoverageReport, MetricResult, Summary, aggregate, enforce};

/// The four coverage metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Branches,
    Functions,
    Lines,
    Statements,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Branches,
        Metric::Functions,
        Metric::Lines,
        Metric::Statements,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Branches => "branches",
            Metric::Functions => "functions",
            Metric::Lines => "lines",
            Metric::Statements => "statements",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Covered and measurable unit counts for one metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub covered: u64,
    pub total: u64,
}

impl Counts {
    pub fn new(covered: u64, total: u64) -> Self {
        Self { covered, total }
    }

    /// Percentage floored to two decimals; None when nothing is measurable.
    pub fn percentage(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let hundredths = (u128::from(self.covered) * 10_000) / u128::from(self.total);
        Some(hundredths as f64 / 100.0)
    }
}

/// Sums saturate at `u64::MAX`. Saturation keeps `covered <= total` when
/// both operands uphold it.
impl Add for Counts {
    type Output = Counts;

    fn add(self, other: Counts) -> Counts {
        Counts {
            covered: self.covered.saturating_add(other.covered),
            total: self.total.saturating_add(other.total),
        }
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, other: Counts) {
        *self = *self + other;
    }
}

/// Per-file counts for all four metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCoverage {
    pub branches: Counts,
    pub functions: Counts,
    pub lines: Counts,
    pub statements: Counts,
}

impl FileCoverage {
    pub fn get(&self, metric: Metric) -> Counts {
        match metric {
            Metric::Branches => self.branches,
            Metric::Functions => self.functions,
            Metric::Lines => self.lines,
            Metric::Statements => self.statements,
        }
    }
}

impl AddAssign for FileCoverage {
    fn add_assign(&mut self, other: FileCoverage) {
        self.branches += other.branches;
        self.functions += other.functions;
        self.lines += other.lines;
        self.statements += other.statements;
    }
}

/// Coverage keyed by `/`-separated path relative to the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageMap {
    files: BTreeMap<String, FileCoverage>,
}

impl CoverageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add counts for a file, summing with anything already recorded.
    pub fn record(&mut self, path: impl Into<String>, coverage: FileCoverage) {
        *self.files.entry(path.into()).or_default() += coverage;
    }

    /// Sum another map into this one. Order of merges does not matter.
    pub fn merge(&mut self, other: &CoverageMap) {
        for (path, coverage) in &other.files {
            self.record(path.clone(), *coverage);
        }
    }

    pub fn get(&self, path: &str) -> Option<&FileCoverage> {
        self.files.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileCoverage)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<(String, FileCoverage)> for CoverageMap {
    fn from_iter<I: IntoIterator<Item = (String, FileCoverage)>>(iter: I) -> Self {
        let mut map = CoverageMap::new();
        for (path, coverage) in iter {
            map.record(path, coverage);
        }
        map
    }
}

/// Build the include/exclude filter for coverage collection.
pub fn filter_for(config: &CoverageConfig) -> Result<PatternFilter> {
    PatternFilter::new(&config.include_patterns(), &config.exclude_patterns())
        .map_err(|e| Error::malformed(CONFIG_FILE, e))
}

/// Load and merge istanbul summary files.
pub fn load_measurements(paths: &[impl AsRef<Path>], root: &Path) -> Result<CoverageMap> {
    let mut merged = CoverageMap::new();
    for path in paths {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let map = istanbul::parse_summary(&content, root).map_err(|message| {
            Error::MalformedMeasurement {
                path: path.to_path_buf(),
                message,
            }
        })?;
        tracing::debug!("loaded {} files from {}", map.len(), path.display());
        merged.merge(&map);
    }
    Ok(merged)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
