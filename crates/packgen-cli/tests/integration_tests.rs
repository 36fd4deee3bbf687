//! End-to-end tests for the packgen binary.

mod common;

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use common::{SHOP, packgen, project};

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    packgen(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    packgen(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_color_accepts_conventional_values() {
    let temp = project(SHOP);
    for value in ["1", "yes", "0", ""] {
        packgen(temp.path())
            .env("NO_COLOR", value)
            .arg("validate")
            .assert()
            .success()
            .stdout(predicate::str::contains("is valid"))
            .stdout(predicate::str::contains("\u{1b}[").not());
    }
}

#[test]
fn test_init_then_validate() {
    let temp = TempDir::new().unwrap();
    packgen(temp.path())
        .args(["init", "--name", "Notes"])
        .assert()
        .success();

    let manifest = fs::read_to_string(temp.path().join("packgen.toml")).unwrap();
    assert!(manifest.contains("app_name      = \"Notes\""));

    packgen(temp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp = project(SHOP);
    packgen(temp.path())
        .arg("init")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    packgen(temp.path())
        .args(["init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overwriting"));
}

#[test]
fn test_generate_writes_manifests_and_scaffolding() {
    let temp = project(SHOP);
    packgen(temp.path())
        .args(["generate", "-o", "out", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let screen = temp.path().join("out/Modules/Screens/Screen");
    let manifest = fs::read_to_string(screen.join("Package.swift")).unwrap();
    assert!(manifest.contains(".package(path: \"../../Utilities/Util\")"));
    assert!(manifest.contains(".package(path: \"../../Clients/Client\")"));
    assert!(screen.join("Sources/ScreenViews/ScreenViews.swift").exists());
}

#[test]
fn test_generate_keeps_existing_sources() {
    let temp = project(SHOP);
    packgen(temp.path())
        .args(["generate", "-o", "out", "-y"])
        .assert()
        .success();

    let source = temp.path().join("out/Modules/Utilities/Util/Sources/Util/Util.swift");
    fs::write(&source, "struct Edited {}\n").unwrap();

    packgen(temp.path())
        .args(["generate", "-o", "out", "-y"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&source).unwrap(), "struct Edited {}\n");
}

#[test]
fn test_generate_dry_run_writes_nothing() {
    let temp = project(SHOP);
    packgen(temp.path())
        .args(["generate", "-o", "out", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_generate_json_report() {
    let temp = project(SHOP);
    let assert = packgen(temp.path())
        .args(["--output-format", "json", "generate", "-o", "out", "--dry-run"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["app_name"], "Shop");
    assert_eq!(report["modules"].as_array().unwrap().len(), 3);
    assert_eq!(report["dry_run"], true);
}

#[test]
fn test_graph_list_format() {
    let temp = project(SHOP);
    packgen(temp.path())
        .args(["graph", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Screen:main -> Util\nScreen:main -> Screen:views\nScreen:main -> Client\n",
        ));
}

#[test]
fn test_graph_json_and_dot() {
    let temp = project(SHOP);
    let assert = packgen(temp.path())
        .args(["graph", "--format", "json"])
        .assert()
        .success();
    let modules: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(modules[2]["name"], "Screen");
    assert_eq!(modules[2]["type"], "screen");

    packgen(temp.path())
        .args(["graph", "--format", "dot"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph packgen {"))
        .stdout(predicate::str::contains("\"Screen:main\" -> \"Client:main\";"));
}

#[test]
fn test_config_get_reads_environment() {
    let temp = TempDir::new().unwrap();
    packgen(temp.path())
        .args(["config", "get", "defaults.app_name"])
        .env("PACKGEN_DEFAULTS__APP_NAME", "FromEnv")
        .assert()
        .success()
        .stdout("FromEnv\n");
}

#[test]
fn test_config_file_sets_defaults() {
    let temp = project(SHOP);
    fs::write(temp.path().join("settings.toml"), "[defaults]\noutput_dir = \"gen\"\n").unwrap();

    packgen(temp.path())
        .args(["-c", "settings.toml", "generate", "-y"])
        .assert()
        .success();
    assert!(temp.path().join("gen/Modules/Clients/Client/Package.swift").exists());
}

#[test]
fn test_completions_bash() {
    let temp = TempDir::new().unwrap();
    packgen(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("packgen"));
}
