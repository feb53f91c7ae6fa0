// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregation and threshold enforcement.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Counts, CoverageMap, Metric};
use crate::config::Thresholds;
use crate::error::{Error, Result};
use crate::pattern::PatternFilter;

/// Summed counts per metric over the included files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub branches: Counts,
    pub functions: Counts,
    pub lines: Counts,
    pub statements: Counts,
}

impl Summary {
    pub fn get(&self, metric: Metric) -> Counts {
        match metric {
            Metric::Branches => self.branches,
            Metric::Functions => self.functions,
            Metric::Lines => self.lines,
            Metric::Statements => self.statements,
        }
    }
}

/// Sum every included, non-excluded file's counts.
///
/// A file with zero measurable units for a metric adds nothing to that
/// metric's covered or total sums, so it neither raises nor lowers it.
pub fn aggregate(map: &CoverageMap, filter: &PatternFilter) -> Summary {
    let mut summary = Summary::default();
    for (path, coverage) in map.iter() {
        if !filter.is_match(Path::new(path)) {
            tracing::debug!("coverage skips {}", path);
            continue;
        }
        summary.files += 1;
        summary.branches += coverage.branches;
        summary.functions += coverage.functions;
        summary.lines += coverage.lines;
        summary.statements += coverage.statements;
    }
    summary
}

/// Outcome for one metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricResult {
    pub metric: Metric,
    pub covered: u64,
    pub total: u64,
    /// None when no file has measurable units for this metric.
    pub percentage: Option<f64>,
    pub threshold: f64,
    pub passed: bool,
}

/// Full threshold verdict for a run.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub generated: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub files: usize,
    pub metrics: Vec<MetricResult>,
    pub passed: bool,
}

/// Compare every metric against its threshold. All four are always evaluated.
pub fn enforce(summary: &Summary, thresholds: &Thresholds) -> CoverageReport {
    let metrics: Vec<MetricResult> = Metric::ALL
        .into_iter()
        .map(|metric| {
            let counts = summary.get(metric);
            let percentage = counts.percentage();
            let threshold = thresholds.get(metric);
            MetricResult {
                metric,
                covered: counts.covered,
                total: counts.total,
                percentage,
                threshold,
                passed: percentage.is_none_or(|pct| pct >= threshold),
            }
        })
        .collect();

    let passed = metrics.iter().all(|m| m.passed);
    CoverageReport {
        generated: Utc::now(),
        profile: None,
        files: summary.files,
        metrics,
        passed,
    }
}

impl CoverageReport {
    /// Attach the active profile name.
    pub fn with_profile(mut self, profile: Option<&str>) -> Self {
        self.profile = profile.map(String::from);
        self
    }

    pub fn metric(&self, metric: Metric) -> Option<&MetricResult> {
        self.metrics.iter().find(|m| m.metric == metric)
    }

    /// Metrics below their threshold.
    pub fn shortfalls(&self) -> impl Iterator<Item = &MetricResult> {
        self.metrics.iter().filter(|m| !m.passed)
    }

    /// `Err(ThresholdNotMet)` listing every failing metric.
    pub fn verdict(&self) -> Result<()> {
        if self.passed {
            return Ok(());
        }
        let shortfalls = self
            .shortfalls()
            .map(|m| {
                format!(
                    "{} {:.2}% < {}%",
                    m.metric,
                    m.percentage.unwrap_or_default(),
                    m.threshold
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::ThresholdNotMet { shortfalls })
    }
}

#[cfg(test)]
#[path = "enforce_tests.rs"]
mod tests;
