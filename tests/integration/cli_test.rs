//! Tests for the `itl3-compare` binary against fixture sources

use std::path::Path;
use std::process::{Command, Output};

use crate::utils::{REGIONS, write_sources};

fn run(dir: &Path, extra: &[&str]) -> Output {
    let (regional, national) = write_sources(dir);
    Command::new(env!("CARGO_BIN_EXE_itl3-compare"))
        .arg("--data")
        .arg(&regional)
        .arg("--national")
        .arg(&national)
        .args(extra)
        .env_remove("ITL3_DATA")
        .env_remove("ITL3_NATIONAL_DATA")
        .env_remove("ITL3_REGISTRY")
        .env_remove("ITL3_HEADLINE")
        .env("RUST_LOG", "warn")
        .output()
        .expect("run itl3-compare")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "itl3-compare failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("report JSON on stdout")
}

#[test]
fn test_report_for_requested_regions() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["--region-1", "tlc31", "--region-2", "tle32"]);
    let report = stdout_json(&output);

    assert_eq!(report["headline"], "GVA per hour worked");
    assert_eq!(report["regions"][0]["code"], "TLC31");
    assert_eq!(report["regions"][0]["name"], "Hartlepool");
    assert_eq!(report["regions"][1]["code"], "TLE32");
    assert_eq!(report["gauges"][0]["value"], 39.0);
    assert_eq!(report["carousel"].as_array().unwrap().len(), 9);
}

#[test]
fn test_defaults_without_region_flags() {
    let dir = tempfile::tempdir().unwrap();
    let report = stdout_json(&run(dir.path(), &["--pretty"]));

    // First two regions by name
    assert_eq!(report["regions"][0]["code"], "TLK11");
    assert_eq!(report["regions"][1]["code"], "TLI31");
}

#[test]
fn test_list_regions() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["--list-regions"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), REGIONS.len());
    assert_eq!(lines[0], "TLK11\tBristol, City of");
    assert_eq!(lines[4], "TLE32\tSheffield");
}

#[test]
fn test_custom_registry_and_headline() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("registry.json");
    std::fs::write(
        &registry,
        r#"{
            "Active": ["Active share", "2022", "2012", ""],
            "Low Skilled": ["Low skill share", 2022, 2016, ""]
        }"#,
    )
    .unwrap();
    let registry = registry.to_str().unwrap();

    let output = run(
        dir.path(),
        &["--registry", registry, "--indicator", "Active", "--region-1", "TLD33"],
    );
    let report = stdout_json(&output);

    assert_eq!(report["headline"], "Active");
    assert_eq!(report["regions"][0]["code"], "TLD33");
    let carousel = report["carousel"].as_array().unwrap();
    assert_eq!(carousel.len(), 1);
    assert_eq!(carousel[0]["indicator"], "Low Skilled");
}

#[test]
fn test_missing_registry_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json");
    let output = run(dir.path(), &["--registry", missing.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("indicator registry"), "unexpected stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_sources_from_environment() {
    let dir = tempfile::tempdir().unwrap();
    let (regional, national) = write_sources(dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_itl3-compare"))
        .arg("--list-regions")
        .env("ITL3_DATA", &regional)
        .env("ITL3_NATIONAL_DATA", &national)
        .env_remove("ITL3_REGISTRY")
        .env("RUST_LOG", "warn")
        .output()
        .expect("run itl3-compare");

    assert!(
        output.status.success(),
        "itl3-compare failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8(output.stdout).unwrap().lines().count(), REGIONS.len());
}
