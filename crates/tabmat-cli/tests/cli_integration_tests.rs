// Dweve Tabmat - Tabular Matrix Loader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::{tempdir, NamedTempFile};

// Test helper to create a tabmat command
fn tabmat_cmd() -> Command {
    Command::cargo_bin("tabmat").expect("Failed to find tabmat binary")
}

// Test helper to create a temporary file with content
fn create_temp_file(content: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("Failed to run tabmat");
    assert!(output.status.success(), "tabmat failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    tabmat_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("delimited text to numeric matrix loader"))
        .stdout(predicate::str::contains("batch-validate"));
}

#[test]
fn test_version_output() {
    tabmat_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tabmat"));
}

#[test]
fn test_no_subcommand_fails() {
    tabmat_cmd().assert().failure();
}

// ===== Probe Command Tests =====

#[test]
fn test_probe() {
    let file = create_temp_file("a,1,x\nb,2,y\n\nc,3,z\n");

    tabmat_cmd()
        .arg("probe")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rows: 4"))
        .stdout(predicate::str::contains("Columns: 3"));
}

#[test]
fn test_probe_ragged_file_succeeds() {
    let file = create_temp_file("1,2\n3\n");

    tabmat_cmd()
        .arg("probe")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Columns: 2"));
}

// ===== Load Command Tests =====

#[test]
fn test_load_column_major() {
    let file = create_temp_file("red,1\nblue,2\nred,3\n");
    let value = stdout_json(tabmat_cmd().arg("load").arg(file.path()));

    assert_eq!(value["layout"], "column_major");
    assert_eq!(value["shape"], serde_json::json!([2, 3]));
    assert_eq!(value["matrix"][0], serde_json::json!([0.0, 1.0, 0.0]));
    assert_eq!(value["matrix"][1], serde_json::json!([1.0, 2.0, 3.0]));
    assert_eq!(value["mappings"][0]["entries"][0]["token"], "red");
    assert_eq!(value["mappings"][0]["entries"][1]["code"], 1);
}

#[test]
fn test_load_late_categorical_column() {
    let file = create_temp_file("1\n2\ncat\n");
    let value = stdout_json(tabmat_cmd().arg("load").arg(file.path()));

    assert_eq!(value["matrix"][0], serde_json::json!([0.0, 1.0, 2.0]));
    assert_eq!(value["mappings"][0]["entries"][2]["token"], "cat");
    assert_eq!(value["stats"]["restarts"], 1);
}

#[test]
fn test_load_row_major_integer() {
    let file = create_temp_file("1;2;3\n4;5;6\n");
    let value = stdout_json(
        tabmat_cmd()
            .arg("load")
            .arg(file.path())
            .arg("--row-major")
            .args(["--kind", "i64"])
            .args(["--delimiter", ";"]),
    );

    assert_eq!(value["layout"], "row_major");
    assert_eq!(value["matrix"], serde_json::json!([[1, 2, 3], [4, 5, 6]]));
}

#[test]
fn test_load_to_output_file() {
    let file = create_temp_file("1,2\n");
    let dir = tempdir().unwrap();
    let out = dir.path().join("out.json");

    tabmat_cmd()
        .arg("load")
        .arg(file.path())
        .arg("--output")
        .arg(&out)
        .arg("--pretty")
        .assert()
        .success();

    let written = fs::read_to_string(&out).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value["shape"], serde_json::json!([2, 1]));
}

#[test]
fn test_load_malformed_file() {
    let file = create_temp_file("1,2\n3\n");

    tabmat_cmd()
        .arg("load")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_load_rejects_bad_delimiter() {
    let file = create_temp_file("1,2\n");

    tabmat_cmd()
        .arg("load")
        .arg(file.path())
        .args(["--delimiter", "ab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("single ASCII character"));
}

#[test]
fn test_load_rejects_blank_delimiter() {
    let file = create_temp_file("1 2\n");

    tabmat_cmd()
        .arg("load")
        .arg(file.path())
        .args(["--delimiter", " "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("delimiter cannot be a blank"));
}

#[test]
fn test_load_ragged_file_reports_width() {
    let file = create_temp_file("1,2\n\n3,4\n");

    tabmat_cmd()
        .arg("load")
        .arg(file.path())
        .arg("--row-major")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"))
        .stderr(predicate::str::contains("expected 2 fields, found 1"));
}

#[test]
fn test_load_rejects_unknown_kind() {
    let file = create_temp_file("1,2\n");

    tabmat_cmd()
        .arg("load")
        .arg(file.path())
        .args(["--kind", "u128"])
        .assert()
        .failure();
}

#[test]
fn test_file_size_limit() {
    let file = create_temp_file("1,2,3,4,5,6,7,8,9\n");

    tabmat_cmd()
        .env("TABMAT_MAX_FILE_SIZE", "4")
        .arg("load")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("too large"));
}

// ===== Validate Command Tests =====

#[test]
fn test_validate_valid_file() {
    let file = create_temp_file("red,1\nblue,2\n");

    tabmat_cmd()
        .arg("validate")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("✓"))
        .stdout(predicate::str::contains("Shape: 2 x 2"))
        .stdout(predicate::str::contains("Categorical dimensions: 1 of 2"));
}

#[test]
fn test_validate_invalid_file() {
    let file = create_temp_file("1,2\n3,4,5\n");

    tabmat_cmd()
        .arg("validate")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗"))
        .stderr(predicate::str::contains("Malformed record"));
}

#[test]
fn test_validate_missing_file() {
    tabmat_cmd()
        .arg("validate")
        .arg("/nonexistent/file.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

// ===== Inspect Command Tests =====

#[test]
fn test_inspect() {
    let file = create_temp_file("red,1\nblue,2\n");

    tabmat_cmd()
        .arg("inspect")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("column-major"))
        .stdout(predicate::str::contains("categorical"))
        .stdout(predicate::str::contains("\"blue\""))
        .stdout(predicate::str::contains("numeric"));
}

#[test]
fn test_inspect_verbose_lists_all_categories() {
    let content: String = (0..8).map(|i| format!("label{}\n", i)).collect();
    let file = create_temp_file(&content);

    tabmat_cmd()
        .arg("inspect")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("3 more"));

    tabmat_cmd()
        .arg("inspect")
        .arg(file.path())
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label7\""));
}

// ===== Batch Command Tests =====

#[test]
fn test_batch_validate_all_valid() {
    let dir = tempdir().unwrap();
    let mut paths = Vec::new();
    for i in 0..4 {
        let path = dir.path().join(format!("f{}.csv", i));
        fs::write(&path, format!("{},x{}\n{},y\n", i, i, i + 1)).unwrap();
        paths.push(path);
    }

    tabmat_cmd()
        .arg("batch-validate")
        .args(&paths)
        .arg("--parallel")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total files:"));
}

#[test]
fn test_batch_validate_with_failures() {
    let good = create_temp_file("1,2\n");
    let bad = create_temp_file("1,2\n3\n");

    tabmat_cmd()
        .arg("batch-validate")
        .arg(good.path())
        .arg(bad.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Validation failures"))
        .stderr(predicate::str::contains("1 of 2 files failed validation"));
}

// ===== Logging Tests =====

#[test]
fn test_debug_logging_goes_to_stderr() {
    let file = create_temp_file("1\n2\ncat\n");

    tabmat_cmd()
        .args(["--log", "debug"])
        .arg("validate")
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("rescanning"))
        .stdout(predicate::str::contains("rescanning").not());
}
