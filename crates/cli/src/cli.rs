// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::color::ColorMode;

/// Load a test-harness descriptor, discover tests, and gate on coverage
#[derive(Parser)]
#[command(name = "rigor")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "RIGOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Apply a named profile from the config
    #[arg(long, global = true, env = "RIGOR_PROFILE", value_name = "NAME")]
    pub profile: Option<String>,

    /// Project root (default: the config file's directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate the config and print a summary
    Check,
    /// List discovered test files
    Discover(DiscoverArgs),
    /// Show the transform rule for a file, or apply it
    Transform(TransformArgs),
    /// Enforce coverage thresholds on istanbul summaries
    Coverage(CoverageArgs),
    /// Run every test file through the configured executor
    Run(RunArgs),
}

#[derive(clap::Args)]
pub struct DiscoverArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Maximum directory depth to traverse
    #[arg(long, default_value_t = 100)]
    pub max_depth: usize,

    /// Include files ignored by .gitignore
    #[arg(long)]
    pub no_gitignore: bool,
}

#[derive(clap::Args)]
pub struct TransformArgs {
    /// File to resolve, relative to the project root
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Run the tool and print the transformed source
    #[arg(long)]
    pub apply: bool,
}

#[derive(clap::Args)]
pub struct CoverageArgs {
    /// Istanbul json-summary files to merge
    #[arg(value_name = "MEASUREMENT", required = true)]
    pub measurements: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Color output mode
    #[arg(long, default_value = "auto", value_name = "WHEN")]
    pub color: ColorMode,

    /// Worker count (overrides [runner] jobs)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
