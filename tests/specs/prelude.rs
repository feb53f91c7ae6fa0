//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for building throwaway projects and running the
//! rigor binary against them.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Returns a Command configured to run the rigor binary
pub fn rigor_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rigor"));
    for var in ["RIGOR_CONFIG", "RIGOR_PROFILE", "RIGOR_LOG", "NO_COLOR"] {
        cmd.env_remove(var);
    }
    cmd
}

/// A temporary project directory.
pub struct Project {
    dir: TempDir,
}

impl Project {
    /// An empty project with no rigor.toml.
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// A project whose rigor.toml has the given content.
    pub fn with_config(content: &str) -> Self {
        let project = Self::empty();
        project.config(content);
        project
    }

    pub fn config(&self, content: &str) -> &Self {
        self.file("rigor.toml", content)
    }

    /// Write a file, creating parent directories.
    pub fn file(&self, path: &str, content: &str) -> &Self {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, path: &str) -> PathBuf {
        self.dir.path().join(path)
    }

    /// `rigor <args>` run from the project directory.
    pub fn rigor(&self, args: &[&str]) -> Command {
        let mut cmd = rigor_cmd();
        cmd.args(args).current_dir(self.path());
        cmd
    }

    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.join(path)).unwrap()
    }
}

/// Istanbul json-summary with one file at the given percentages (out of 100).
pub fn summary(file: &str, branches: u64, functions: u64, lines: u64, statements: u64) -> String {
    let counter = |covered: u64| {
        format!(r#"{{"total":100,"covered":{covered},"skipped":0,"pct":{covered}}}"#)
    };
    format!(
        r#"{{"total":{{"lines":{total}}},"{file}":{{"branches":{b},"functions":{f},"lines":{l},"statements":{s}}}}}"#,
        total = counter(lines),
        b = counter(branches),
        f = counter(functions),
        l = counter(lines),
        s = counter(statements),
    )
}
