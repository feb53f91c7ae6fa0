// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel file walking.
//!
//! Uses the `ignore` crate's parallel walker and funnels entries through a
//! channel. Results are relative to the walk root and sorted by path, so two
//! walks over an unchanged tree return identical sequences.

use std::path::{Path, PathBuf};

use crossbeam_channel::unbounded;
use ignore::{WalkBuilder, WalkState};

/// Walker settings.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Maximum directory depth (None = unlimited).
    pub max_depth: Option<usize>,
    /// Respect .gitignore and friends.
    pub git_ignore: bool,
    /// Skip hidden files and directories.
    pub hidden: bool,
    /// Walker threads (0 = automatic).
    pub threads: usize,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(100),
            git_ignore: true,
            hidden: true,
            threads: 0,
        }
    }
}

/// A file found by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    /// Path relative to the walk root.
    pub path: PathBuf,
}

/// Walk statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct WalkStats {
    pub files_found: usize,
    pub errors: usize,
}

enum Event {
    File(WalkedFile),
    Error,
}

pub struct FileWalker {
    config: WalkerConfig,
}

impl FileWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Walk `root` and return every regular file, sorted by relative path.
    pub fn walk_collect(&self, root: &Path) -> (Vec<WalkedFile>, WalkStats) {
        let (tx, rx) = unbounded();

        WalkBuilder::new(root)
            .max_depth(self.config.max_depth)
            .hidden(self.config.hidden)
            .git_ignore(self.config.git_ignore)
            .git_global(self.config.git_ignore)
            .git_exclude(self.config.git_ignore)
            .ignore(self.config.git_ignore)
            .parents(self.config.git_ignore)
            .threads(self.config.threads)
            .build_parallel()
            .run(|| {
                let tx = tx.clone();
                Box::new(move |entry| {
                    let event = match entry {
                        Ok(entry) => {
                            if !entry.file_type().is_some_and(|t| t.is_file()) {
                                return WalkState::Continue;
                            }
                            let Ok(path) = entry.path().strip_prefix(root) else {
                                return WalkState::Continue;
                            };
                            Event::File(WalkedFile {
                                path: path.to_path_buf(),
                            })
                        }
                        Err(e) => {
                            tracing::warn!("walk error: {}", e);
                            Event::Error
                        }
                    };
                    if tx.send(event).is_err() {
                        return WalkState::Quit;
                    }
                    WalkState::Continue
                })
            });
        drop(tx);

        let mut stats = WalkStats::default();
        let mut files = Vec::new();
        for event in rx {
            match event {
                Event::File(file) => files.push(file),
                Event::Error => stats.errors += 1,
            }
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        stats.files_found = files.len();
        tracing::debug!("walked {}: {} files", root.display(), stats.files_found);

        (files, stats)
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
