// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Coverage command implementation.

use termcolor::{ColorChoice, StandardStream};

use rigor::ExitCode;
use rigor::cli::{Cli, CoverageArgs, OutputFormat};
use rigor::coverage::{self, aggregate, enforce};
use rigor::report;

use crate::Project;

/// Merge measurements, enforce thresholds, and write the report.
///
/// A failing verdict is returned as an error after the report is printed.
pub fn run(cli: &Cli, args: &CoverageArgs) -> anyhow::Result<ExitCode> {
    let project = Project::load(cli)?;
    let config = &project.config;

    let measurements = coverage::load_measurements(&args.measurements, &project.root)?;
    let filter = coverage::filter_for(&config.coverage)?;
    let summary = aggregate(&measurements, &filter);
    let report = enforce(&summary, &config.coverage.thresholds)
        .with_profile(config.active_profile.as_deref());

    report::write_report(&report, &config.coverage.output_dir(&project.root))?;

    let choice = match args.output {
        OutputFormat::Text => args.color.choice(),
        OutputFormat::Json => ColorChoice::Never,
    };
    let mut out = StandardStream::stdout(choice);
    report::formatter(args.output).coverage(&mut out, &report)?;

    report.verdict()?;
    Ok(ExitCode::Success)
}
