//! Coverage aggregation and threshold enforcement through `rigor coverage`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

const DESCRIPTOR: &str = r#"
version = 1

[coverage]
include = ["src/**/*.ts"]
exclude = ["src/types/**"]

[coverage.thresholds]
branches = 50
functions = 50
lines = 50
statements = 50

[profile.ci.coverage]
directory = "coverage/ci"

[profile.ci.coverage.thresholds]
branches = 80
functions = 80
lines = 80
statements = 80
"#;

fn project() -> Project {
    let temp = Project::with_config(DESCRIPTOR);
    temp.file("summary.json", &summary("src/app.ts", 55, 90, 82, 81));
    temp
}

/// The same measurement passes the lenient regime
#[test]
fn lenient_thresholds_pass() {
    let temp = project();
    temp.rigor(&["coverage", "summary.json"])
        .assert()
        .success()
        .stdout(predicates::str::contains("PASS: coverage thresholds met"))
        .stderr(predicates::str::contains("threshold").not());

    let report: serde_json::Value =
        serde_json::from_str(&temp.read("coverage/coverage-report.json")).unwrap();
    assert_eq!(report["passed"], true);
    assert!(report.get("profile").is_none());
}

/// ...and fails the strict one, on branches only
#[test]
fn strict_profile_fails_branches() {
    let temp = project();
    temp.rigor(&["coverage", "summary.json", "--profile", "ci"])
        .assert()
        .code(1)
        .stdout(predicates::str::contains("FAIL: below threshold: branches\n"))
        .stderr(predicates::str::contains(
            "error: coverage threshold not met: branches 55.00% < 80%",
        ))
        .stderr(predicates::str::contains("lines").not());

    let report: serde_json::Value =
        serde_json::from_str(&temp.read("coverage/ci/coverage-report.json")).unwrap();
    assert_eq!(report["passed"], false);
    assert_eq!(report["profile"], "ci");
    let failing: Vec<_> = report["metrics"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|m| m["passed"] == false)
        .map(|m| m["metric"].as_str().unwrap())
        .collect();
    assert_eq!(failing, vec!["branches"]);
}

/// Excluded files never count, even when included
#[test]
fn excluded_files_do_not_count() {
    let temp = Project::with_config(DESCRIPTOR);
    temp.file("a.json", &summary("src/app.ts", 100, 100, 100, 100))
        .file("b.json", &summary("src/types/user.ts", 0, 0, 0, 0));

    temp.rigor(&["coverage", "a.json", "b.json", "--profile", "ci"])
        .assert()
        .success();
}

/// Measurements from several workers are summed before enforcement
#[test]
fn worker_measurements_are_merged() {
    let temp = Project::with_config(DESCRIPTOR);
    temp.file("w1.json", &summary("src/app.ts", 100, 100, 100, 100))
        .file("w2.json", &summary("src/app.ts", 40, 100, 100, 100));

    // (100 + 40) / 200 = 70% branches
    let output = temp
        .rigor(&["coverage", "w1.json", "w2.json", "-o", "json", "--profile", "ci"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["metrics"][0]["metric"], "branches");
    assert_eq!(value["metrics"][0]["percentage"], 70.0);
    assert_eq!(value["metrics"][0]["total"], 200);
}

/// Unreadable or malformed measurements are internal errors
#[test]
fn malformed_measurement_exits_three() {
    let temp = Project::with_config(DESCRIPTOR);
    temp.file("bad.json", "{ not json");

    temp.rigor(&["coverage", "bad.json"])
        .assert()
        .code(3)
        .stderr(predicates::str::contains("bad.json"));
    temp.rigor(&["coverage", "missing.json"]).assert().code(3);
}

/// Colors are emitted only when asked for
#[test]
fn color_always_emits_ansi() {
    let temp = project();
    temp.rigor(&["coverage", "summary.json", "--color", "always"])
        .assert()
        .success()
        .stdout(predicates::str::contains("\x1b["));
    temp.rigor(&["coverage", "summary.json"])
        .assert()
        .success()
        .stdout(predicates::str::contains("\x1b[").not());
}
