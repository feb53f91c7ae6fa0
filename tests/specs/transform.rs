//! Transform resolution through `rigor transform`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

/// The preset contributes a rule for TypeScript sources
#[test]
fn preset_rule_resolves() {
    let temp = Project::with_config("version = 1\npreset = \"ts-jest\"\n");
    temp.rigor(&["transform", "src/button.tsx"])
        .assert()
        .success()
        .stdout(predicates::str::contains("src/button.tsx: ts-jest"));
}

/// Files no rule matches are left alone
#[test]
fn unmatched_file_has_no_transform() {
    let temp = Project::with_config("version = 1\npreset = \"ts-jest\"\n");
    temp.rigor(&["transform", "README.md"])
        .assert()
        .success()
        .stdout("README.md: no transform\n");
}

/// Declared rules are consulted before preset rules
#[test]
fn declared_rule_wins() {
    let temp = Project::with_config(
        r#"
version = 1
preset = "ts-jest"

[[transform]]
pattern = '\.tsx$'
tool = "swc"
options = { jsx = "react" }
"#,
    );
    temp.rigor(&["transform", "src/button.tsx"])
        .assert()
        .success()
        .stdout(predicates::str::contains("src/button.tsx: swc"))
        .stdout(predicates::str::contains(r#"options: {"jsx":"react"}"#));
}

/// An invalid transform pattern is a configuration error
#[test]
fn invalid_pattern_is_config_error() {
    let temp = Project::with_config("version = 1\n[[transform]]\npattern = '('\ntool = \"x\"\n");
    temp.rigor(&["transform", "a.ts"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("invalid transform pattern"));
}

/// --apply prints the tool's output
#[cfg(unix)]
#[test]
fn apply_prints_transformed_source() {
    let temp = Project::with_config(
        "version = 1\n[[transform]]\npattern = '\\.ts$'\ntool = \"cat\"\n",
    );
    temp.file("src/a.ts", "export const a = 1;\n");

    temp.rigor(&["transform", "src/a.ts", "--apply"])
        .assert()
        .success()
        .stdout("export const a = 1;\n");
}

/// A failing tool exits 1 and names the file and tool
#[cfg(unix)]
#[test]
fn apply_failure_exits_one() {
    let temp = Project::with_config(
        "version = 1\n[[transform]]\npattern = '\\.ts$'\ntool = \"false\"\n",
    );
    temp.file("src/a.ts", "export const a = 1;\n");

    temp.rigor(&["transform", "src/a.ts", "--apply"])
        .assert()
        .code(1)
        .stderr(predicates::str::contains("transform failed for src/a.ts using false"));
}
