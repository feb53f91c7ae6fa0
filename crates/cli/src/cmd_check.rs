// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.

use rigor::ExitCode;
use rigor::cli::Cli;
use rigor::coverage::Metric;

use crate::Project;

/// Load and validate the descriptor, then print what it resolves to.
pub fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let project = Project::load(cli)?;
    let config = &project.config;
    let rules = project.transform_rules()?;

    match &project.config_path {
        Some(path) => println!("config: {}", path.display()),
        None => println!("config: (defaults)"),
    }
    println!("root: {}", project.root.display());
    println!(
        "profile: {}",
        config.active_profile.as_deref().unwrap_or("(none)")
    );
    println!("environment: {}", config.test.environment()?);
    println!("setup: {}", config.test.setup.join(", "));
    println!("match: {}", config.test.patterns.join(", "));
    println!("ignore: {}", config.test.ignore.join(", "));
    for rule in rules.iter() {
        println!("transform: {} -> {}", rule.pattern, rule.tool);
    }
    println!(
        "coverage: {}",
        config.coverage.output_dir(&project.root).display()
    );
    let thresholds: Vec<String> = Metric::ALL
        .iter()
        .map(|m| format!("{} {}%", m, config.coverage.thresholds.get(*m)))
        .collect();
    println!("thresholds: {}", thresholds.join(", "));

    Ok(ExitCode::Success)
}
