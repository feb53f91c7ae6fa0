// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Glob pattern compilation and path filters.
//!
//! All patterns are evaluated against paths relative to the project root.
//! Matching is case-sensitive, `*` never crosses a `/`, and `**` matches any
//! number of directories.

use std::path::Path;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

/// Compile a single glob with project matching semantics.
pub fn compile_glob(pattern: &str) -> Result<Glob, String> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .case_insensitive(false)
        .build()
        .map_err(|e| format!("invalid glob pattern '{}': {}", pattern, e.kind()))
}

/// Build a GlobSet from pattern strings.
pub fn build_glob_set(patterns: &[String]) -> Result<GlobSet, String> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern)?);
    }
    builder.build().map_err(|e| e.to_string())
}

/// Expand a test ignore pattern into the globs it stands for.
///
/// - `dir/` or `/dir/` → `**/dir/**` (that directory at any depth)
/// - `name` (no `/`) → `**/name` and `**/name/**` (file or directory at any depth)
/// - `a/b` or `**/x` → unchanged (anchored at the project root)
///
/// A setup script listed by bare file name is therefore never discovered as a test.
pub fn normalize_ignore_pattern(pattern: &str) -> Vec<String> {
    if pattern.starts_with("**/") {
        return vec![pattern.to_string()];
    }

    let trimmed = pattern.trim_start_matches('/');
    if let Some(dir) = trimmed.strip_suffix('/') {
        return vec![format!("**/{}/**", dir.trim_end_matches('/'))];
    }
    if !trimmed.contains('/') {
        return vec![format!("**/{}", trimmed), format!("**/{}/**", trimmed)];
    }
    vec![trimmed.to_string()]
}

/// Compiled test ignore patterns.
#[derive(Debug, Clone)]
pub struct IgnoreSet {
    set: GlobSet,
}

impl IgnoreSet {
    pub fn new(patterns: &[String]) -> Result<Self, String> {
        let expanded: Vec<String> = patterns
            .iter()
            .flat_map(|p| normalize_ignore_pattern(p))
            .collect();
        Ok(Self {
            set: build_glob_set(&expanded)?,
        })
    }

    pub fn is_match(&self, path: &Path) -> bool {
        self.set.is_match(path)
    }
}

/// Include/exclude filter where exclusion always wins.
#[derive(Debug, Clone)]
pub struct PatternFilter {
    include: GlobSet,
    exclude: GlobSet,
}

impl PatternFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, String> {
        Ok(Self {
            include: build_glob_set(include)?,
            exclude: build_glob_set(exclude)?,
        })
    }

    /// True iff the path matches some include pattern and no exclude pattern.
    pub fn is_match(&self, path: &Path) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}

/// Render a relative path with `/` separators.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
