// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Descriptor loading and validation.
//!
//! A descriptor (`rigor.toml`) is parsed once per invocation, merged with the
//! selected profile, validated, and then passed by reference to discovery,
//! transform resolution, the runner, and coverage enforcement.

pub mod defaults;
mod profile;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coverage::Metric;
use crate::error::{Error, Result};
use crate::pattern;
use crate::transform::TransformRules;

pub use profile::{ProfileConfig, ProfileCoverageConfig, ThresholdOverrides};

/// The test-harness descriptor.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Descriptor format version (must be 1).
    pub version: i64,

    /// Optional preset contributing default transform rules.
    #[serde(default)]
    pub preset: Option<String>,

    /// Test discovery and environment settings.
    #[serde(default)]
    pub test: TestConfig,

    /// Ordered transform rules (`[[transform]]`). Declaration order matters.
    #[serde(default)]
    pub transform: Vec<TransformRuleConfig>,

    /// Coverage collection and thresholds.
    #[serde(default)]
    pub coverage: CoverageConfig,

    /// External executor used by `rigor run`.
    #[serde(default)]
    pub runner: RunnerConfig,

    /// Named overlays selected with `--profile`.
    #[serde(default)]
    pub profile: BTreeMap<String, ProfileConfig>,

    /// Profile merged into this descriptor, if any.
    #[serde(skip)]
    pub active_profile: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: defaults::VERSION,
            preset: None,
            test: TestConfig::default(),
            transform: Vec::new(),
            coverage: CoverageConfig::default(),
            runner: RunnerConfig::default(),
            profile: BTreeMap::new(),
            active_profile: None,
        }
    }
}

/// `[test]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestConfig {
    /// Simulated environment identifier ("node" or "jsdom").
    #[serde(default = "TestConfig::default_environment")]
    pub environment: String,

    /// Setup scripts run before each test file, in order.
    #[serde(default)]
    pub setup: Vec<String>,

    /// A file is a test file iff it matches one of these.
    #[serde(default = "TestConfig::default_match", rename = "match")]
    pub patterns: Vec<String>,

    /// Files matching any of these are never test files.
    #[serde(default = "TestConfig::default_ignore")]
    pub ignore: Vec<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            environment: Self::default_environment(),
            setup: Vec::new(),
            patterns: Self::default_match(),
            ignore: Self::default_ignore(),
        }
    }
}

impl TestConfig {
    fn default_environment() -> String {
        defaults::ENVIRONMENT.to_string()
    }

    fn default_match() -> Vec<String> {
        defaults::test_patterns::matching()
    }

    fn default_ignore() -> Vec<String> {
        defaults::test_patterns::ignore()
    }

    /// Parse the environment identifier.
    pub fn environment(&self) -> Result<Environment> {
        self.environment.parse()
    }
}

/// Supported simulated execution environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Bare execution context.
    Node,
    /// DOM-like browser environment.
    Jsdom,
}

impl Environment {
    pub const ALL: [Environment; 2] = [Environment::Node, Environment::Jsdom];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Node => "node",
            Environment::Jsdom => "jsdom",
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| Error::UnknownEnvironment {
                name: s.to_string(),
                supported: Environment::ALL
                    .iter()
                    .map(|e| e.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `[[transform]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformRuleConfig {
    /// Regular expression matched against the relative, `/`-separated path.
    pub pattern: String,

    /// Transform tool executable.
    pub tool: String,

    /// Options handed to the tool unchanged.
    #[serde(default)]
    pub options: toml::Table,
}

/// `[coverage]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoverageConfig {
    /// Files instrumented for coverage. `!pattern` entries exclude.
    #[serde(default = "CoverageConfig::default_include")]
    pub include: Vec<String>,

    /// Files never counted, even when included.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Report output directory, relative to the project root.
    #[serde(default = "CoverageConfig::default_directory")]
    pub directory: String,

    /// Minimum aggregate percentages.
    #[serde(default)]
    pub thresholds: Thresholds,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            include: Self::default_include(),
            exclude: Vec::new(),
            directory: Self::default_directory(),
            thresholds: Thresholds::default(),
        }
    }
}

impl CoverageConfig {
    fn default_include() -> Vec<String> {
        defaults::coverage_patterns::include()
    }

    fn default_directory() -> String {
        defaults::COVERAGE_DIRECTORY.to_string()
    }

    /// Include patterns with `!` negations removed.
    pub fn include_patterns(&self) -> Vec<String> {
        self.include
            .iter()
            .filter(|p| !p.starts_with('!'))
            .cloned()
            .collect()
    }

    /// Exclude patterns plus negated include entries.
    pub fn exclude_patterns(&self) -> Vec<String> {
        self.include
            .iter()
            .filter_map(|p| p.strip_prefix('!').map(String::from))
            .chain(self.exclude.iter().cloned())
            .collect()
    }

    /// Absolute path of the report directory.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.directory)
    }
}

/// Minimum coverage percentages. Missing values mean "no minimum".
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Thresholds {
    #[serde(default)]
    pub branches: f64,
    #[serde(default)]
    pub functions: f64,
    #[serde(default)]
    pub lines: f64,
    #[serde(default)]
    pub statements: f64,
}

impl Thresholds {
    /// Same minimum for every metric.
    pub fn uniform(value: f64) -> Self {
        Self {
            branches: value,
            functions: value,
            lines: value,
            statements: value,
        }
    }

    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Branches => self.branches,
            Metric::Functions => self.functions,
            Metric::Lines => self.lines,
            Metric::Statements => self.statements,
        }
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::Branches => self.branches = value,
            Metric::Functions => self.functions = value,
            Metric::Lines => self.lines = value,
            Metric::Statements => self.statements = value,
        }
    }

    /// Reject non-finite values and values outside [0, 100].
    pub fn validate(&self) -> Result<()> {
        for metric in Metric::ALL {
            let value = self.get(metric);
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(Error::InvalidThreshold {
                    metric: metric.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// `[runner]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    /// Executor command and arguments.
    #[serde(default)]
    pub command: Vec<String>,

    /// Worker count (None = one per CPU).
    #[serde(default)]
    pub jobs: Option<usize>,
}

/// Non-fatal findings produced while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `test.match` is empty, so no test will ever be discovered.
    EmptyTestMatch,
    /// A `[runner]` is configured without a command.
    EmptyRunnerCommand,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::EmptyTestMatch => {
                f.write_str("test.match is empty; no test files will be discovered")
            }
            ConfigWarning::EmptyRunnerCommand => {
                f.write_str("runner.jobs is set but runner.command is empty")
            }
        }
    }
}

/// A loaded, validated descriptor.
#[derive(Debug)]
pub struct Loaded {
    pub config: Config,
    /// Where the descriptor came from (None = built-in defaults).
    pub path: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Parse descriptor content. Defaults are applied; no validation or profile merge.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    toml::from_str(content).map_err(|e| Error::malformed(path, e))
}

/// Read, parse, merge `profile`, and validate the descriptor at `path`.
pub fn load(path: &Path, profile: Option<&str>) -> Result<Loaded> {
    let content =
        std::fs::read_to_string(path).map_err(|e| Error::malformed(path, e.to_string()))?;
    let mut config = parse(&content, path)?;
    if let Some(name) = profile {
        config.apply_profile(name)?;
    }
    let warnings = config.validate(path)?;
    tracing::debug!(
        "loaded {} (profile: {})",
        path.display(),
        config.active_profile.as_deref().unwrap_or("none")
    );
    Ok(Loaded {
        config,
        path: Some(path.to_path_buf()),
        warnings,
    })
}

/// Built-in defaults, used when no descriptor file exists.
pub fn load_defaults(profile: Option<&str>) -> Result<Loaded> {
    let mut config = Config::default();
    if let Some(name) = profile {
        config.apply_profile(name)?;
    }
    let warnings = config.validate(Path::new(defaults::CONFIG_FILE))?;
    Ok(Loaded {
        config,
        path: None,
        warnings,
    })
}

impl Config {
    /// Merge the named profile over this descriptor.
    pub fn apply_profile(&mut self, name: &str) -> Result<()> {
        let overlay = self
            .profile
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownProfile {
                name: name.to_string(),
                declared: if self.profile.is_empty() {
                    "none".to_string()
                } else {
                    self.profile.keys().cloned().collect::<Vec<_>>().join(", ")
                },
            })?;
        overlay.merge_into(&mut self.coverage);
        self.active_profile = Some(name.to_string());
        Ok(())
    }

    /// Validate everything that serde cannot, returning non-fatal warnings.
    pub fn validate(&self, path: &Path) -> Result<Vec<ConfigWarning>> {
        if self.version != defaults::VERSION {
            return Err(Error::malformed(
                path,
                format!(
                    "unsupported version {} (expected {})",
                    self.version,
                    defaults::VERSION
                ),
            ));
        }

        self.test.environment()?;
        self.coverage.thresholds.validate()?;

        // Compile every pattern now so a bad glob or regex aborts before any test runs.
        for patterns in [
            &self.test.patterns,
            &self.coverage.include_patterns(),
            &self.coverage.exclude_patterns(),
        ] {
            pattern::build_glob_set(patterns).map_err(|e| Error::malformed(path, e))?;
        }
        pattern::IgnoreSet::new(&self.test.ignore).map_err(|e| Error::malformed(path, e))?;
        TransformRules::from_config(self).map_err(|e| Error::malformed(path, e))?;

        let mut warnings = Vec::new();
        if self.test.patterns.is_empty() {
            warnings.push(ConfigWarning::EmptyTestMatch);
        }
        if self.runner.command.is_empty() && self.runner.jobs.is_some() {
            warnings.push(ConfigWarning::EmptyRunnerCommand);
        }
        Ok(warnings)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
