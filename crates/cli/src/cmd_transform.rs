// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transform command implementation.

use std::path::PathBuf;

use rigor::ExitCode;
use rigor::cli::{Cli, TransformArgs};
use rigor::pattern::to_slash;
use rigor::transform::{CommandTransformer, transform_file};

use crate::Project;

/// Show which rule applies to a file, and optionally apply it.
pub fn run(cli: &Cli, args: &TransformArgs) -> anyhow::Result<ExitCode> {
    let project = Project::load(cli)?;
    let rules = project.transform_rules()?;

    let path: PathBuf = if args.path.is_absolute() {
        args.path
            .strip_prefix(&project.root)
            .unwrap_or(&args.path)
            .to_path_buf()
    } else {
        args.path.clone()
    };

    if args.apply {
        let transformer = CommandTransformer::new(&project.root);
        let output = transform_file(&rules, &transformer, &project.root, &path)?;
        print!("{}", output);
        return Ok(ExitCode::Success);
    }

    match rules.resolve(&path) {
        Some(rule) => {
            println!("{}: {} (pattern {})", to_slash(&path), rule.tool, rule.pattern);
            if rule.options.as_object().is_some_and(|o| !o.is_empty()) {
                println!("options: {}", rule.options);
            }
        }
        None => println!("{}: no transform", to_slash(&path)),
    }
    Ok(ExitCode::Success)
}
