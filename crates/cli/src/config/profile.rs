// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Named profiles (`[profile.<name>]`).
//!
//! A profile overlays coverage thresholds and the report directory on the
//! base descriptor. Only fields present in the profile are overwritten.

use serde::Deserialize;

use super::CoverageConfig;
use crate::coverage::Metric;

/// One `[profile.<name>]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    #[serde(default)]
    pub coverage: ProfileCoverageConfig,
}

/// `[profile.<name>.coverage]`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileCoverageConfig {
    /// Replaces `coverage.directory`.
    #[serde(default)]
    pub directory: Option<String>,

    /// Per-metric replacements for `coverage.thresholds`.
    #[serde(default)]
    pub thresholds: ThresholdOverrides,
}

/// Thresholds where absence means "keep the base value".
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdOverrides {
    pub branches: Option<f64>,
    pub functions: Option<f64>,
    pub lines: Option<f64>,
    pub statements: Option<f64>,
}

impl ThresholdOverrides {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Branches => self.branches,
            Metric::Functions => self.functions,
            Metric::Lines => self.lines,
            Metric::Statements => self.statements,
        }
    }
}

impl ProfileConfig {
    pub(super) fn merge_into(&self, coverage: &mut CoverageConfig) {
        if let Some(directory) = &self.coverage.directory {
            coverage.directory = directory.clone();
        }
        for metric in Metric::ALL {
            if let Some(value) = self.coverage.thresholds.get(metric) {
                coverage.thresholds.set(metric, value);
            }
        }
    }
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
