// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod cmd_check;
mod cmd_coverage;
mod cmd_discover;
mod cmd_run;
mod cmd_transform;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rigor::cli::{Cli, Command};
use rigor::config::{self, Config, Loaded};
use rigor::discovery;
use rigor::transform::TransformRules;
use rigor::{Error, ExitCode};

/// A loaded descriptor and the root its patterns are relative to.
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
    /// None when running on built-in defaults.
    pub config_path: Option<PathBuf>,
}

impl Project {
    /// Resolve the descriptor from `--config`, `--root`, or the current directory.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        let profile = cli.profile.as_deref();

        let found = match &cli.config {
            Some(path) => Some(cwd.join(path)),
            None => {
                let start = cli.root.as_ref().map_or_else(|| cwd.clone(), |r| cwd.join(r));
                discovery::find_config(&start)
            }
        };

        let loaded = match &found {
            Some(path) => config::load(path, profile)?,
            None => {
                tracing::debug!("no config found, using defaults");
                config::load_defaults(profile)?
            }
        };
        let Loaded {
            config,
            path,
            warnings,
        } = loaded;

        for warning in &warnings {
            eprintln!("warning: {}", warning);
        }

        let root = match (&cli.root, &path) {
            (Some(root), _) => cwd.join(root),
            (None, Some(path)) => path.parent().map_or(cwd.clone(), Path::to_path_buf),
            (None, None) => cwd,
        };

        Ok(Self {
            root,
            config,
            config_path: path,
        })
    }

    /// Compiled transform rules (declared rules, then preset rules).
    pub fn transform_rules(&self) -> rigor::Result<TransformRules> {
        TransformRules::from_config(&self.config).map_err(|message| {
            Error::MalformedConfiguration {
                path: self
                    .config_path
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(config::defaults::CONFIG_FILE)),
                message,
            }
        })
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "rigor=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("RIGOR_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Exit code for an error, looking through anyhow context for a library error.
fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<Error>())
        .map_or(ExitCode::InternalError, Error::exit_code)
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Command::Check => cmd_check::run(cli),
        Command::Discover(args) => cmd_discover::run(cli, args),
        Command::Transform(args) => cmd_transform::run(cli, args),
        Command::Coverage(args) => cmd_coverage::run(cli, args),
        Command::Run(args) => cmd_run::run(cli, args),
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("error: {:#}", e);
            exit_code_for(&e).into()
        }
    }
}
