//! End-to-end tests for the `vantage` binary

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn demo() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/bubble_tea_nyc.yaml")
}

fn vantage(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("vantage").unwrap();
    cmd.env("VANTAGE_DATA_DIR", data_dir.path())
        .env_remove("OPENAI_API_KEY")
        .env_remove("VITE_OPENAI_API_KEY")
        .env_remove("VANTAGE_LOG");
    cmd
}

#[test]
fn test_help() {
    let data = TempDir::new().unwrap();
    vantage(&data)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("map"));
}

#[test]
fn test_report_list_is_ranked() {
    let data = TempDir::new().unwrap();
    vantage(&data)
        .args(["report", "list"])
        .arg(demo())
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)Williamsburg.*Astoria.*Park Slope").unwrap());
}

#[test]
fn test_report_show_top_ranked() {
    let data = TempDir::new().unwrap();
    vantage(&data)
        .args(["report", "show"])
        .arg(demo())
        .assert()
        .success()
        .stdout(predicate::str::contains("VANTAGE LOCATION INTELLIGENCE REPORT"))
        .stdout(predicate::str::contains("Budget: $15,000"))
        .stdout(predicate::str::contains("Found 2 competitors within 0.5 miles"));
}

#[test]
fn test_report_show_placeholders() {
    let data = TempDir::new().unwrap();
    vantage(&data)
        .args(["report", "show", "--location", "Astoria, Queens"])
        .arg(demo())
        .assert()
        .success()
        .stdout(predicate::str::contains("Revenue projections not available"))
        .stdout(predicate::str::contains("No metrics available").not());
}

#[test]
fn test_unknown_location_fails() {
    let data = TempDir::new().unwrap();
    vantage(&data)
        .args(["report", "show", "--location", "Harlem"])
        .arg(demo())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Location not found: Harlem"));
}

#[test]
fn test_report_export_writes_pdf() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    let assert = vantage(&data)
        .args(["report", "export", "--settle-ms", "0", "--json", "--location", "3"])
        .arg("--output-dir")
        .arg(out.path())
        .arg(demo())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let outcome: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let filename = outcome["filename"].as_str().unwrap();
    assert!(filename.starts_with("Vantage_Report_Park_Slope_"));
    assert!(filename.ends_with(".pdf"));

    let path = PathBuf::from(outcome["path"].as_str().unwrap());
    assert!(path.starts_with(out.path()));
    assert!(fs::read(path).unwrap().starts_with(b"%PDF"));
}

#[test]
fn test_report_html_output() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let html_path = out.path().join("report.html");

    vantage(&data)
        .args(["report", "html", "--output"])
        .arg(&html_path)
        .arg(demo())
        .assert()
        .success();

    let html = fs::read_to_string(html_path).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Williamsburg, Brooklyn"));
    assert!(html.contains("$15,000"));
}

#[test]
fn test_image_without_key_fails_before_request() {
    let data = TempDir::new().unwrap();
    vantage(&data)
        .args(["image", "storefront", "120 Mulberry St"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));
}

#[test]
fn test_config_shows_paths() {
    let data = TempDir::new().unwrap();
    vantage(&data)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(data.path().to_string_lossy().to_string()))
        .stdout(predicate::str::contains("OpenAI: not set"));
}
