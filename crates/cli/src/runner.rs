// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parallel per-file test orchestration with failure isolation.
//!
//! Each test file is an independent unit of work on a rayon pool: its setup
//! scripts run in declaration order, then the file is transformed and handed
//! to the executor. A failure (or panic) in one unit marks that file failed
//! and never stops the others.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::config::defaults::CONFIG_FILE;
use crate::config::{Config, Environment};
use crate::coverage::{CoverageMap, istanbul};
use crate::error::{Error, Result};
use crate::pattern::to_slash;
use crate::process::{failure_message, output_with_stdin};
use crate::transform::{TransformRules, Transformer, transform_file};

/// Directory under the coverage output directory holding per-file measurements.
const WORKER_DIR: &str = ".workers";

/// What the executor reports for one test file.
#[derive(Debug, Clone, Default)]
pub struct FileRun {
    pub passed: bool,
    pub output: String,
    pub coverage: CoverageMap,
}

/// Runs setup scripts and test files. Test semantics live behind this seam.
pub trait TestExecutor: Send + Sync {
    /// Run one setup script before `test_file`.
    fn run_setup(
        &self,
        setup: &str,
        test_file: &Path,
        env: Environment,
    ) -> std::result::Result<(), String>;

    /// Execute a test file whose (possibly transformed) text is `source`.
    fn run_file(
        &self,
        test_file: &Path,
        source: &str,
        env: Environment,
    ) -> std::result::Result<FileRun, String>;
}

/// Outcome for one test file.
#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    pub passed: bool,
    /// Setup, transform or execution error, if the file never completed.
    pub error: Option<Error>,
    pub output: String,
    pub duration: Duration,
}

/// Results of a whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Per-file results sorted by path.
    pub files: Vec<FileResult>,
    /// Coverage summed over every file that executed.
    pub coverage: CoverageMap,
}

impl RunSummary {
    pub fn passed(&self) -> bool {
        self.files.iter().all(|f| f.passed)
    }

    pub fn failed(&self) -> impl Iterator<Item = &FileResult> {
        self.files.iter().filter(|f| !f.passed)
    }
}

/// One run over a set of discovered test files.
pub struct TestRun<'a> {
    pub config: &'a Config,
    pub root: &'a Path,
    pub rules: &'a TransformRules,
    pub transformer: &'a dyn Transformer,
    pub executor: &'a dyn TestExecutor,
}

impl TestRun<'_> {
    /// Run every file and merge per-file coverage.
    pub fn run(&self, files: &[PathBuf]) -> Result<RunSummary> {
        let env = self.config.test.environment()?;

        let run_all = || -> Vec<(FileResult, CoverageMap)> {
            files.par_iter().map(|path| self.run_file(path, env)).collect()
        };

        let results = match self.config.runner.jobs {
            Some(jobs) => match rayon::ThreadPoolBuilder::new().num_threads(jobs).build() {
                Ok(pool) => pool.install(run_all),
                Err(e) => {
                    tracing::warn!("falling back to the global pool: {}", e);
                    run_all()
                }
            },
            None => run_all(),
        };

        let mut summary = RunSummary::default();
        for (result, coverage) in results {
            summary.coverage.merge(&coverage);
            summary.files.push(result);
        }
        summary.files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(summary)
    }

    fn run_file(&self, path: &Path, env: Environment) -> (FileResult, CoverageMap) {
        let start = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(|| self.execute(path, env)));

        let (passed, error, output, coverage) = match outcome {
            Ok(Ok(run)) => (run.passed, None, run.output, run.coverage),
            Ok(Err(e)) => {
                tracing::debug!("{}", e);
                (false, Some(e), String::new(), CoverageMap::new())
            }
            Err(_) => {
                let e = Error::ExecutionFailed {
                    test_file: path.to_path_buf(),
                    message: "internal error: worker panicked".to_string(),
                };
                (false, Some(e), String::new(), CoverageMap::new())
            }
        };

        let result = FileResult {
            path: path.to_path_buf(),
            passed,
            error,
            output,
            duration: start.elapsed(),
        };
        (result, coverage)
    }

    fn execute(&self, path: &Path, env: Environment) -> Result<FileRun> {
        for setup in &self.config.test.setup {
            self.executor
                .run_setup(setup, path, env)
                .map_err(|message| Error::SetupFailed {
                    test_file: path.to_path_buf(),
                    setup: setup.clone(),
                    message,
                })?;
        }

        let source = transform_file(self.rules, self.transformer, self.root, path)?;

        self.executor
            .run_file(path, &source, env)
            .map_err(|message| Error::ExecutionFailed {
                test_file: path.to_path_buf(),
                message,
            })
    }
}

/// Runs `[runner] command` as a child process for each phase.
///
/// The child learns what to do from the environment: `RIGOR_PHASE` is
/// `setup` or `test`, `RIGOR_FILE` names the setup script or test file,
/// `RIGOR_TEST_FILE` the test file, and `RIGOR_ENVIRONMENT` the environment.
/// In the test phase the source arrives on stdin and an istanbul summary
/// written to `RIGOR_COVERAGE_FILE` is collected.
pub struct CommandExecutor<'a> {
    program: &'a str,
    args: &'a [String],
    root: &'a Path,
    scratch: PathBuf,
    /// Sequence number keeping measurement file names distinct.
    measurements: AtomicUsize,
}

impl<'a> CommandExecutor<'a> {
    pub fn new(config: &'a Config, root: &'a Path) -> Result<Self> {
        let (program, args) = config.runner.command.split_first().ok_or_else(|| {
            Error::malformed(CONFIG_FILE, "[runner] command is required to run tests")
        })?;
        Ok(Self {
            program: program.as_str(),
            args,
            root,
            scratch: config.coverage.output_dir(root).join(WORKER_DIR),
            measurements: AtomicUsize::new(0),
        })
    }

    fn command(&self, phase: &str, file: &str, test_file: &Path, env: Environment) -> Command {
        let mut command = Command::new(self.program);
        command
            .args(self.args)
            .current_dir(self.root)
            .env("RIGOR_PHASE", phase)
            .env("RIGOR_FILE", file)
            .env("RIGOR_TEST_FILE", to_slash(test_file))
            .env("RIGOR_ENVIRONMENT", env.as_str());
        command
    }

    /// A fresh measurement path for one execution of `test_file`.
    fn coverage_file(&self, test_file: &Path) -> PathBuf {
        let seq = self.measurements.fetch_add(1, Ordering::Relaxed);
        let name = to_slash(test_file).replace(['/', ':'], "__");
        self.scratch.join(format!("{}-{}.json", seq, name))
    }

    /// Remove the per-file measurement directory if it is empty.
    pub fn finish(&self) {
        if std::fs::remove_dir(&self.scratch).is_ok() {
            tracing::debug!("removed {}", self.scratch.display());
        }
    }
}

impl TestExecutor for CommandExecutor<'_> {
    fn run_setup(
        &self,
        setup: &str,
        test_file: &Path,
        env: Environment,
    ) -> std::result::Result<(), String> {
        let output = output_with_stdin(&mut self.command("setup", setup, test_file, env), "")
            .map_err(|e| format!("failed to spawn {}: {}", self.program, e))?;
        if output.status.success() {
            Ok(())
        } else {
            Err(failure_message(&output))
        }
    }

    fn run_file(
        &self,
        test_file: &Path,
        source: &str,
        env: Environment,
    ) -> std::result::Result<FileRun, String> {
        std::fs::create_dir_all(&self.scratch)
            .map_err(|e| format!("{}: {}", self.scratch.display(), e))?;
        let coverage_file = self.coverage_file(test_file);

        let mut command = self.command("test", &to_slash(test_file), test_file, env);
        command.env("RIGOR_COVERAGE_FILE", &coverage_file);
        let output = output_with_stdin(&mut command, source)
            .map_err(|e| format!("failed to spawn {}: {}", self.program, e))?;

        let coverage = match std::fs::read_to_string(&coverage_file) {
            Ok(content) => {
                if let Err(e) = std::fs::remove_file(&coverage_file) {
                    tracing::warn!("failed to remove {}: {}", coverage_file.display(), e);
                }
                istanbul::parse_summary(&content, self.root)?
            }
            Err(_) => CoverageMap::new(),
        };

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(FileRun {
            passed: output.status.success(),
            output: text,
            coverage,
        })
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
