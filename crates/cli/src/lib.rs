// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rigor library.
//!
//! Loads a test-harness descriptor (`rigor.toml`) and implements what a test
//! runner needs from it: test discovery, transform resolution, per-file
//! orchestration, and coverage threshold enforcement.

pub mod cli;
pub mod color;
pub mod config;
pub mod coverage;
pub mod discovery;
pub mod error;
pub mod pattern;
pub mod process;
pub mod report;
pub mod runner;
pub mod transform;
pub mod walker;


pub use error::{Error, ExitCode, Result};
