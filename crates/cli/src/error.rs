// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types and exit codes.
//!
//! Load-time errors abort the run before any test executes. Per-file errors
//! (transform, setup) are recorded against the file and never cascade.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading a descriptor or acting on it.
#[derive(Debug, Error)]
pub enum Error {
    /// The descriptor could not be read or parsed as a structured record.
    #[error("malformed configuration in {}: {message}", path.display())]
    MalformedConfiguration { path: PathBuf, message: String },

    /// A coverage threshold was outside [0, 100].
    #[error("invalid threshold for {metric}: {value} (must be between 0 and 100)")]
    InvalidThreshold { metric: String, value: f64 },

    /// The test environment is not one of the supported identifiers.
    #[error("unknown test environment '{name}' (supported: {supported})")]
    UnknownEnvironment { name: String, supported: String },

    /// A profile was selected that the descriptor does not declare.
    #[error("unknown profile '{name}' (declared: {declared})")]
    UnknownProfile { name: String, declared: String },

    /// The transform tool failed on a file.
    #[error("transform failed for {} using {tool}: {message}", path.display())]
    TransformFailed {
        path: PathBuf,
        tool: String,
        message: String,
    },

    /// A setup script failed before a test file could run.
    #[error("setup {setup} failed for {}: {message}", test_file.display())]
    SetupFailed {
        test_file: PathBuf,
        setup: String,
        message: String,
    },

    /// The executor could not run a test file, or panicked while doing so.
    #[error("execution failed for {}: {message}", test_file.display())]
    ExecutionFailed { test_file: PathBuf, message: String },

    /// One or more coverage metrics fell below their threshold.
    #[error("coverage threshold not met: {shortfalls}")]
    ThresholdNotMet { shortfalls: String },

    /// A coverage measurement file could not be parsed.
    #[error("malformed coverage measurement in {}: {message}", path.display())]
    MalformedMeasurement { path: PathBuf, message: String },

    /// File system error outside descriptor parsing.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// True for errors detected while loading the descriptor.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedConfiguration { .. }
                | Error::InvalidThreshold { .. }
                | Error::UnknownEnvironment { .. }
                | Error::UnknownProfile { .. }
        )
    }

    /// Exit code the binary should use for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            e if e.is_config_error() => ExitCode::ConfigError,
            Error::Io { .. } | Error::MalformedMeasurement { .. } => ExitCode::InternalError,
            _ => ExitCode::Failed,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Error::MalformedConfiguration {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Everything passed.
    Success = 0,
    /// Tests, transforms, setup scripts or thresholds failed.
    Failed = 1,
    /// The descriptor is invalid.
    ConfigError = 2,
    /// Unexpected I/O or internal failure.
    InternalError = 3,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
