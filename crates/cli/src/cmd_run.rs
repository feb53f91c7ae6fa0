// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Run command implementation.

use termcolor::{ColorChoice, StandardStream};

use rigor::ExitCode;
use rigor::cli::{Cli, OutputFormat, RunArgs};
use rigor::coverage::{self, aggregate, enforce};
use rigor::discovery;
use rigor::report;
use rigor::runner::{CommandExecutor, TestRun};
use rigor::transform::CommandTransformer;
use rigor::walker::WalkerConfig;

use crate::Project;

/// Discover, run every test file, and enforce coverage on the merged result.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let mut project = Project::load(cli)?;
    if args.jobs.is_some() {
        project.config.runner.jobs = args.jobs;
    }
    let config = &project.config;
    let root = project.root.as_path();

    let rules = project.transform_rules()?;
    let executor = CommandExecutor::new(config, root)?;
    let transformer = CommandTransformer::new(root);

    let files = discovery::discover_tests(config, root, &WalkerConfig::default())?;
    if files.is_empty() {
        tracing::warn!("no test files discovered under {}", root.display());
    }

    let summary = TestRun {
        config,
        root,
        rules: &rules,
        transformer: &transformer,
        executor: &executor,
    }
    .run(&files)?;
    executor.finish();

    let filter = coverage::filter_for(&config.coverage)?;
    let report = enforce(&aggregate(&summary.coverage, &filter), &config.coverage.thresholds)
        .with_profile(config.active_profile.as_deref());
    report::write_report(&report, &config.coverage.output_dir(root))?;

    let choice = match args.output {
        OutputFormat::Text => args.color.choice(),
        OutputFormat::Json => ColorChoice::Never,
    };
    let mut out = StandardStream::stdout(choice);
    report::formatter(args.output).run(&mut out, &summary, &report)?;

    report.verdict()?;
    Ok(if summary.passed() {
        ExitCode::Success
    } else {
        ExitCode::Failed
    })
}
