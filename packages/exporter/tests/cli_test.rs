//! Command-line tests for the `shr-javadoc` binary.

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_build_writes_site() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("site");

    cargo_bin_cmd!("shr-javadoc")
        .arg("build")
        .arg(fixture("vital_signs.json"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Elements: 9"))
        .stdout(predicate::str::contains("Warnings: 1"))
        .stdout(predicate::str::contains("displayHint"));

    assert!(out.join("index.html").is_file());
    assert!(out.join("shr_vital").join("BodyWeight.html").is_file());
}

#[test]
fn test_build_defaults_to_out_directory() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("shr-javadoc")
        .current_dir(dir.path())
        .arg("build")
        .arg(fixture("vital_signs.json"))
        .assert()
        .success();

    assert!(dir.path().join("out").join("overview-summary.html").is_file());
}

#[test]
fn test_build_fails_on_cycle() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("shr-javadoc")
        .arg("build")
        .arg(fixture("cyclic.yaml"))
        .arg("-o")
        .arg(dir.path().join("site"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("shr.test.A"));

    assert!(!dir.path().join("site").exists());
}

#[test]
fn test_build_rejects_unknown_extension() {
    cargo_bin_cmd!("shr-javadoc")
        .args(["build", "model.xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported model format"));
}

#[test]
fn test_resolve_prints_json() {
    let output = cargo_bin_cmd!("shr-javadoc")
        .arg("resolve")
        .arg(fixture("vital_signs.json"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let doc: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(doc["project"]["shortName"], "SHR");
    assert_eq!(doc["namespaces"][0]["path"], "shr_base");
    assert_eq!(doc["warnings"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_resolve_prints_yaml() {
    cargo_bin_cmd!("shr-javadoc")
        .args(["resolve", "--format", "yaml"])
        .arg(fixture("vital_signs.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("namespacePath: shr_vital"));
}
