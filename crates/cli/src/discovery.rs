// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery and test discovery.
//!
//! `find_config` walks from the current directory up to the git root looking
//! for rigor.toml. `discover_tests` applies the descriptor's match and ignore
//! patterns to a walked tree.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::config::defaults::CONFIG_FILE;
use crate::error::{Error, Result};
use crate::pattern::{IgnoreSet, build_glob_set};
use crate::walker::{FileWalker, WalkerConfig};

/// Find rigor.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        // Stop at git root
        if current.join(".git").exists() {
            return None;
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return None,
        }
    }
}

/// Compiled test matcher: match patterns minus ignore patterns.
#[derive(Debug, Clone)]
pub struct TestMatcher {
    patterns: globset::GlobSet,
    ignore: IgnoreSet,
}

impl TestMatcher {
    pub fn new(config: &Config) -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        Ok(Self {
            patterns: build_glob_set(&config.test.patterns)
                .map_err(|e| Error::malformed(path, e))?,
            ignore: IgnoreSet::new(&config.test.ignore).map_err(|e| Error::malformed(path, e))?,
        })
    }

    /// A path is a test file iff it matches a pattern and no ignore pattern.
    pub fn is_test(&self, path: &Path) -> bool {
        self.patterns.is_match(path) && !self.ignore.is_match(path)
    }
}

/// Discover test files under `root`, sorted by relative path.
pub fn discover_tests(
    config: &Config,
    root: &Path,
    walker: &WalkerConfig,
) -> Result<Vec<PathBuf>> {
    let matcher = TestMatcher::new(config)?;
    let (files, stats) = FileWalker::new(walker.clone()).walk_collect(root);

    let tests: Vec<PathBuf> = files
        .into_iter()
        .map(|f| f.path)
        .filter(|path| matcher.is_test(path))
        .collect();

    tracing::debug!(
        "discovered {} test files out of {} walked",
        tests.len(),
        stats.files_found
    );
    Ok(tests)
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
