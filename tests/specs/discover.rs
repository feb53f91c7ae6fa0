//! Test discovery through `rigor discover`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

/// Ignore patterns override match patterns
#[test]
fn ignore_overrides_match() {
    let temp = Project::with_config(
        r#"
version = 1

[test]
match = ["**/*.test.ts", "**/setup.ts"]
ignore = ["setup.ts"]
"#,
    );
    temp.file("a.test.ts", "")
        .file("setup.ts", "")
        .file("b.ts", "")
        .file("src/__tests__/setup.ts", "");

    temp.rigor(&["discover"])
        .assert()
        .success()
        .stdout("a.test.ts\n");
}

/// Default patterns find conventional test files and skip node_modules
#[test]
fn default_patterns() {
    let temp = Project::with_config("version = 1\n");
    temp.file("src/app.ts", "")
        .file("src/app.test.ts", "")
        .file("src/__tests__/util.test.js", "")
        .file("lib/api.spec.ts", "")
        .file("node_modules/dep/index.test.js", "");

    temp.rigor(&["discover"])
        .assert()
        .success()
        .stdout("lib/api.spec.ts\nsrc/__tests__/util.test.js\nsrc/app.test.ts\n");
}

/// JSON output lists files with a count
#[test]
fn json_output() {
    let temp = Project::with_config("version = 1\n");
    temp.file("a.test.ts", "");

    let output = temp.rigor(&["discover", "-o", "json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["count"], 1);
    assert_eq!(value["files"][0], "a.test.ts");
}

/// --root points discovery at another directory
#[test]
fn root_option() {
    let temp = Project::empty();
    temp.file("web/rigor.toml", "version = 1\n")
        .file("web/src/a.test.ts", "")
        .file("other.test.ts", "");

    temp.rigor(&["discover", "--root", "web"])
        .assert()
        .success()
        .stdout("src/a.test.ts\n");
}

/// Matching is case-sensitive
#[test]
fn case_sensitive_matching() {
    let temp = Project::with_config("version = 1\n[test]\nmatch = [\"**/*.test.ts\"]\n");
    temp.file("a.test.ts", "").file("B.TEST.TS", "");

    temp.rigor(&["discover"])
        .assert()
        .success()
        .stdout("a.test.ts\n");
}
