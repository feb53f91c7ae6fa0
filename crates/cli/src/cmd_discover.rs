// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Discover command implementation.

use termcolor::{ColorChoice, StandardStream};

use rigor::ExitCode;
use rigor::cli::{Cli, DiscoverArgs};
use rigor::discovery;
use rigor::report;
use rigor::walker::WalkerConfig;

use crate::Project;

/// Print every discovered test file.
pub fn run(cli: &Cli, args: &DiscoverArgs) -> anyhow::Result<ExitCode> {
    let project = Project::load(cli)?;
    let walker = WalkerConfig {
        max_depth: Some(args.max_depth),
        git_ignore: !args.no_gitignore,
        ..WalkerConfig::default()
    };

    let files = discovery::discover_tests(&project.config, &project.root, &walker)?;

    let mut out = StandardStream::stdout(ColorChoice::Never);
    report::formatter(args.output).discovered(&mut out, &files)?;
    Ok(ExitCode::Success)
}
