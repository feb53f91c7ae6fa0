// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized default values for configuration.
//!
//! All default values are documented here for easy reference.
//! Individual config structs delegate to these via their `default_*` methods.

/// Descriptor file name searched for by discovery.
pub const CONFIG_FILE: &str = "rigor.toml";

/// The only descriptor version understood.
pub const VERSION: i64 = 1;

/// Default test environment identifier.
pub const ENVIRONMENT: &str = "node";

/// Default directory for coverage reports, relative to the project root.
pub const COVERAGE_DIRECTORY: &str = "coverage";

/// Report file written inside the coverage directory.
pub const COVERAGE_REPORT_FILE: &str = "coverage-report.json";

/// Default glob patterns for test file detection.
pub mod test_patterns {
    /// Patterns a file must match to be a test file.
    pub fn matching() -> Vec<String> {
        vec![
            "**/__tests__/**/*.test.*".to_string(),
            "**/*.test.*".to_string(),
            "**/*.spec.*".to_string(),
        ]
    }

    /// Patterns excluded from test discovery.
    pub fn ignore() -> Vec<String> {
        vec!["node_modules/".to_string()]
    }
}

/// Default glob patterns for coverage collection.
pub mod coverage_patterns {
    /// Every file is instrumented unless excluded.
    pub fn include() -> Vec<String> {
        vec!["**/*".to_string()]
    }
}

/// Built-in presets.
pub mod presets {
    /// Preset names recognized in `preset = "..."`.
    pub const KNOWN: &[&str] = &["ts-jest"];

    /// Transform rules contributed by a preset as `(pattern, tool)` pairs.
    ///
    /// Returns None for unknown presets.
    pub fn transform_rules(preset: &str) -> Option<&'static [(&'static str, &'static str)]> {
        match preset {
            "ts-jest" => Some(&[(r"^.+\.(ts|tsx)$", "ts-jest")]),
            _ => None,
        }
    }
}
