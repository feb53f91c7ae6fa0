//! Per-file orchestration through `rigor run`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

/// Runner that fails setup for b.test.ts and copies cov.json as coverage.
#[cfg(unix)]
const DESCRIPTOR: &str = r#"
version = 1

[test]
match = ["**/*.test.ts"]
setup = ["setup.ts"]

[coverage]
include = ["src/**"]

[coverage.thresholds]
lines = 50

[runner]
command = ["sh", "-c", '''
if [ "$RIGOR_PHASE" = setup ]; then
  [ "$RIGOR_TEST_FILE" = b.test.ts ] && { echo "setup refused" >&2; exit 1; }
  exit 0
fi
cp cov.json "$RIGOR_COVERAGE_FILE"
echo "ran $RIGOR_FILE in $RIGOR_ENVIRONMENT"
''']
"#;

/// Running with no executor configured is a configuration error
#[test]
fn run_requires_runner_command() {
    let temp = Project::with_config("version = 1\n");
    temp.rigor(&["run"])
        .assert()
        .code(2)
        .stderr(predicates::str::contains("[runner] command"));
}

/// Every file runs; coverage from each is merged
#[cfg(unix)]
#[test]
fn all_files_pass() {
    let temp = Project::with_config(DESCRIPTOR);
    temp.file("cov.json", &summary("src/app.ts", 100, 100, 60, 100))
        .file("a.test.ts", "")
        .file("c.test.ts", "");

    temp.rigor(&["run"])
        .assert()
        .success()
        .stdout(predicates::str::contains("PASS a.test.ts"))
        .stdout(predicates::str::contains("PASS c.test.ts"))
        .stdout(predicates::str::contains("2 files: 2 passed, 0 failed"));

    let report: serde_json::Value =
        serde_json::from_str(&temp.read("coverage/coverage-report.json")).unwrap();
    assert_eq!(report["metrics"][2]["metric"], "lines");
    assert_eq!(report["metrics"][2]["covered"], 120);
    assert_eq!(report["metrics"][2]["total"], 200);
    assert!(!temp.join("coverage/.workers").exists());
}

/// A setup failure fails only its own file
#[cfg(unix)]
#[test]
fn setup_failure_is_isolated() {
    let temp = Project::with_config(DESCRIPTOR);
    temp.file("cov.json", &summary("src/app.ts", 100, 100, 100, 100))
        .file("a.test.ts", "")
        .file("b.test.ts", "")
        .file("c.test.ts", "");

    let output = temp.rigor(&["run", "-o", "json"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = value["files"].as_array().unwrap();
    assert_eq!(files.len(), 3);
    assert_eq!(files[0]["passed"], true);
    assert_eq!(files[1]["path"], "b.test.ts");
    assert_eq!(files[1]["passed"], false);
    assert!(
        files[1]["error"]
            .as_str()
            .unwrap()
            .contains("setup setup.ts failed for b.test.ts")
    );
    assert_eq!(files[2]["passed"], true);
    assert_eq!(value["coverage"]["passed"], true);
}

/// Thresholds apply to the merged coverage of the run
#[cfg(unix)]
#[test]
fn coverage_threshold_fails_run() {
    let temp = Project::with_config(DESCRIPTOR);
    temp.file("cov.json", &summary("src/app.ts", 100, 100, 10, 100))
        .file("a.test.ts", "");

    temp.rigor(&["run"])
        .assert()
        .code(1)
        .stdout(predicates::str::contains("PASS a.test.ts"))
        .stdout(predicates::str::contains("FAIL: below threshold: lines"))
        .stderr(predicates::str::contains("coverage threshold not met: lines"));
}
