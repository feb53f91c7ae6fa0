// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal color handling for text output.

use std::io::IsTerminal;

use termcolor::{ColorChoice, ColorSpec};

/// `--color` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against the current process environment.
    pub fn choice(self) -> ColorChoice {
        resolve_color(
            self,
            std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
            std::io::stdout().is_terminal(),
        )
    }
}

/// Pick a color choice. An explicit mode wins over `NO_COLOR`.
pub fn resolve_color(mode: ColorMode, no_color: bool, is_terminal: bool) -> ColorChoice {
    match mode {
        ColorMode::Always => ColorChoice::Always,
        ColorMode::Never => ColorChoice::Never,
        ColorMode::Auto if no_color || !is_terminal => ColorChoice::Never,
        ColorMode::Auto => ColorChoice::Auto,
    }
}

/// Color specs used by the text formatter.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    pub fn pass() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green)).set_bold(true);
        spec
    }

    pub fn fail() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }

    pub fn path() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    /// Metric names and headings.
    pub fn heading() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Unmeasurable values ("n/a").
    pub fn muted() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        spec
    }
}

/// Color for a pass/fail verdict.
pub fn verdict(passed: bool) -> ColorSpec {
    if passed { scheme::pass() } else { scheme::fail() }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
