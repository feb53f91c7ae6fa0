//! Descriptor loading and validation through `rigor check`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

const DESCRIPTOR: &str = r#"
version = 1
preset = "ts-jest"

[test]
environment = "jsdom"
setup = ["test/setup-env.ts"]
match = ["**/__tests__/**/*.test.ts"]
ignore = ["/node_modules/", "setup.ts"]

[coverage]
include = ["src/**/*.ts", "!src/**/*.d.ts"]
directory = "coverage"

[coverage.thresholds]
branches = 50
functions = 50
lines = 50
statements = 50

[profile.ci.coverage.thresholds]
branches = 80
functions = 80
lines = 80
statements = 80
"#;

/// A valid descriptor loads and is summarized
#[test]
fn check_summarizes_valid_descriptor() {
    let temp = Project::with_config(DESCRIPTOR);
    temp.rigor(&["check"])
        .assert()
        .success()
        .stdout(predicates::str::contains("environment: jsdom"))
        .stdout(predicates::str::contains("profile: (none)"))
        .stdout(predicates::str::contains("transform: ^.+\\.(ts|tsx)$ -> ts-jest"))
        .stdout(predicates::str::contains("thresholds: branches 50%"));
}

/// The profile is an explicit selection, by flag or environment
#[test]
fn check_applies_selected_profile() {
    let temp = Project::with_config(DESCRIPTOR);
    temp.rigor(&["check", "--profile", "ci"])
        .assert()
        .success()
        .stdout(predicates::str::contains("profile: ci"))
        .stdout(predicates::str::contains("branches 80%"));

    temp.rigor(&["check"])
        .env("RIGOR_PROFILE", "ci")
        .assert()
        .success()
        .stdout(predicates::str::contains("profile: ci"));
}

/// Without rigor.toml the built-in defaults apply
#[test]
fn check_without_descriptor_uses_defaults() {
    let temp = Project::empty();
    temp.file(".git/HEAD", "ref: refs/heads/main\n");
    temp.rigor(&["check"])
        .assert()
        .success()
        .stdout(predicates::str::contains("config: (defaults)"))
        .stdout(predicates::str::contains("environment: node"));
}

/// An explicit config path is honored, relative to the current directory
#[test]
fn check_uses_explicit_config_path() {
    let temp = Project::empty();
    temp.file("conf/alt.toml", "version = 1\n[test]\nenvironment = \"jsdom\"\n");
    temp.rigor(&["check", "-C", "conf/alt.toml"])
        .assert()
        .success()
        .stdout(predicates::str::contains("environment: jsdom"));
}

/// An empty match list warns but loads
#[test]
fn empty_match_warns() {
    let temp = Project::with_config("version = 1\n[test]\nmatch = []\n");
    temp.rigor(&["check"])
        .assert()
        .success()
        .stderr(predicates::str::contains("warning: test.match is empty"));
}

/// Every load-time error exits with code 2 and names the culprit
#[test]
fn unknown_key_is_config_error() {
    let temp = Project::with_config("version = 1\n[test]\nmatcher = []\n");
    temp.rigor(&["check"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unknown field"))
        .stderr(predicates::str::contains("matcher"));
}

#[test]
fn out_of_range_threshold_is_config_error() {
    let temp = Project::with_config("version = 1\n[coverage.thresholds]\nlines = 120\n");
    temp.rigor(&["check"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("invalid threshold for lines: 120"));
}

#[test]
fn unknown_environment_is_config_error() {
    let temp = Project::with_config("version = 1\n[test]\nenvironment = \"browser\"\n");
    temp.rigor(&["check"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unknown test environment 'browser'"));
}

#[test]
fn unknown_profile_is_config_error() {
    let temp = Project::with_config(DESCRIPTOR);
    temp.rigor(&["check", "--profile", "nightly"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unknown profile 'nightly'"))
        .stderr(predicates::str::contains("declared: ci"));
}

#[test]
fn unsupported_version_is_config_error() {
    let temp = Project::with_config("version = 2\n");
    temp.rigor(&["check"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("unsupported version 2"));
}

#[test]
fn unparsable_descriptor_is_config_error() {
    let temp = Project::with_config("version = [\n");
    temp.rigor(&["check"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("malformed configuration"));
}
