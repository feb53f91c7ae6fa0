// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transform rule resolution and invocation.
//!
//! Rules are kept in declaration order and resolved by linear scan: the first
//! rule whose pattern matches the file's relative path wins, even when a later
//! rule would also match. Preset rules are appended after declared rules.

use std::path::Path;
use std::process::Command;

use regex::Regex;

use crate::config::Config;
use crate::config::defaults::presets;
use crate::error::{Error, Result};
use crate::pattern::to_slash;
use crate::process::{failure_message, output_with_stdin};

/// Environment variable carrying the rule options as JSON.
pub const OPTIONS_ENV: &str = "RIGOR_TRANSFORM_OPTIONS";

/// A compiled transform rule.
#[derive(Debug, Clone)]
pub struct TransformRule {
    pub pattern: Regex,
    pub tool: String,
    pub options: serde_json::Value,
}

impl TransformRule {
    pub fn new(
        pattern: &str,
        tool: &str,
        options: serde_json::Value,
    ) -> std::result::Result<Self, String> {
        let pattern = Regex::new(pattern)
            .map_err(|e| format!("invalid transform pattern '{}': {}", pattern, e))?;
        Ok(Self {
            pattern,
            tool: tool.to_string(),
            options,
        })
    }

    pub fn matches(&self, path: &Path) -> bool {
        self.pattern.is_match(&to_slash(path))
    }
}

/// Ordered transform rules.
#[derive(Debug, Clone, Default)]
pub struct TransformRules {
    rules: Vec<TransformRule>,
}

impl TransformRules {
    pub fn new(rules: Vec<TransformRule>) -> Self {
        Self { rules }
    }

    /// Compile the descriptor's `[[transform]]` rules followed by preset rules.
    pub fn from_config(config: &Config) -> std::result::Result<Self, String> {
        let mut rules = Vec::with_capacity(config.transform.len());
        for rule in &config.transform {
            let options = serde_json::to_value(&rule.options).map_err(|e| e.to_string())?;
            rules.push(TransformRule::new(&rule.pattern, &rule.tool, options)?);
        }

        if let Some(preset) = &config.preset {
            let preset_rules = presets::transform_rules(preset).ok_or_else(|| {
                format!(
                    "unknown preset '{}' (known: {})",
                    preset,
                    presets::KNOWN.join(", ")
                )
            })?;
            for (pattern, tool) in preset_rules {
                let options = serde_json::Value::Object(serde_json::Map::new());
                rules.push(TransformRule::new(pattern, tool, options)?);
            }
        }

        Ok(Self { rules })
    }

    /// First rule matching `path`, or None for "no transform".
    pub fn resolve(&self, path: &Path) -> Option<&TransformRule> {
        self.rules.iter().find(|rule| rule.matches(path))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransformRule> {
        self.rules.iter()
    }
}

/// Converts source text into executable text.
pub trait Transformer: Send + Sync {
    fn transform(&self, rule: &TransformRule, path: &Path, source: &str) -> Result<String>;
}

/// Runs the rule's tool as a child process.
///
/// The relative path is the only argument, source arrives on stdin, options
/// in `RIGOR_TRANSFORM_OPTIONS`, and stdout is the transformed text.
pub struct CommandTransformer<'a> {
    root: &'a Path,
}

impl<'a> CommandTransformer<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }
}

impl Transformer for CommandTransformer<'_> {
    fn transform(&self, rule: &TransformRule, path: &Path, source: &str) -> Result<String> {
        let failed = |message: String| Error::TransformFailed {
            path: path.to_path_buf(),
            tool: rule.tool.clone(),
            message,
        };

        let output = output_with_stdin(
            Command::new(&rule.tool)
                .arg(path)
                .current_dir(self.root)
                .env(OPTIONS_ENV, rule.options.to_string()),
            source,
        )
        .map_err(|e| failed(format!("failed to spawn: {}", e)))?;

        if !output.status.success() {
            return Err(failed(failure_message(&output)));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| failed("output is not valid UTF-8".to_string()))
    }
}

/// Read `path` (relative to `root`) and apply its resolved transform, if any.
pub fn transform_file(
    rules: &TransformRules,
    transformer: &dyn Transformer,
    root: &Path,
    path: &Path,
) -> Result<String> {
    let full = root.join(path);
    let source = std::fs::read_to_string(&full).map_err(|e| Error::TransformFailed {
        path: path.to_path_buf(),
        tool: "read".to_string(),
        message: e.to_string(),
    })?;

    match rules.resolve(path) {
        Some(rule) => {
            tracing::debug!("transforming {} with {}", path.display(), rule.tool);
            transformer.transform(rule, path, &source)
        }
        None => Ok(source),
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
