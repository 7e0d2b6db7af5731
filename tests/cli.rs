//! Command-line tests.
//!
//! Each test works on a file in its own temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SETTINGS: &str = "# Settings\napp:\n  name: demo # display name\n  debug: true\n";

/// Get a command for running yaml-contents.
fn yaml_contents() -> Command {
    Command::cargo_bin("yaml-contents").unwrap()
}

fn settings_file() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.yml");
    fs::write(&path, SETTINGS).unwrap();
    (dir, path)
}

#[test]
fn help_flag_works() {
    yaml_contents()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("realign"));
}

#[test]
fn add_creates_missing_parents() {
    let (_dir, path) = settings_file();
    yaml_contents()
        .arg("add")
        .arg(&path)
        .arg("app.cache.ttl")
        .arg("300")
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("{}  cache:\n    ttl: 300\n", SETTINGS)
    );
}

#[test]
fn set_replaces_value_and_keeps_comment() {
    let (_dir, path) = settings_file();
    yaml_contents()
        .args(["set", path.to_str().unwrap(), "app.name", "production"])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        SETTINGS.replace("name: demo", "name: production")
    );
}

#[test]
fn set_string_flag_quotes_typed_text() {
    let (_dir, path) = settings_file();
    yaml_contents()
        .args(["set", path.to_str().unwrap(), "app.debug", "false", "--string"])
        .assert()
        .success();
    assert!(fs::read_to_string(&path)
        .unwrap()
        .contains("  debug: 'false'\n"));
}

#[test]
fn set_missing_key_fails_without_writing() {
    let (_dir, path) = settings_file();
    yaml_contents()
        .args(["set", path.to_str().unwrap(), "app.missing", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Key not found: 'app.missing'"));
    assert_eq!(fs::read_to_string(&path).unwrap(), SETTINGS);
}

#[test]
fn add_under_scalar_fails_without_writing() {
    let (_dir, path) = settings_file();
    yaml_contents()
        .args(["add", path.to_str().unwrap(), "app.name.first", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Key conflict at 'app.name'"));
    assert_eq!(fs::read_to_string(&path).unwrap(), SETTINGS);
}

#[test]
fn dry_run_prints_instead_of_writing() {
    let (_dir, path) = settings_file();
    yaml_contents()
        .args(["--dry-run", "set", path.to_str().unwrap(), "app.debug", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  debug: false\n"));
    assert_eq!(fs::read_to_string(&path).unwrap(), SETTINGS);
}

#[test]
fn realign_aligns_comments() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("aligned.yml");
    fs::write(&path, "a: 1 # one\nlonger: 2 # two\n").unwrap();
    yaml_contents()
        .arg("realign")
        .arg(&path)
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "a: 1      # one\nlonger: 2 # two\n"
    );
}

#[test]
fn remove_deletes_nested_block() {
    let (_dir, path) = settings_file();
    yaml_contents()
        .args(["remove", path.to_str().unwrap(), "app"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&path).unwrap(), "# Settings\n");
}

#[test]
fn get_prints_raw_value() {
    let (_dir, path) = settings_file();
    yaml_contents()
        .args(["get", path.to_str().unwrap(), "app.name"])
        .assert()
        .success()
        .stdout("demo\n");
}

#[test]
fn indent_flag_sets_nesting_width() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.yml");
    fs::write(&path, "").unwrap();
    yaml_contents()
        .args(["--indent", "4", "add", path.to_str().unwrap(), "a.b", "1"])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&path).unwrap(), "a:\n    b: 1\n");
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yml");
    yaml_contents()
        .args(["get", path.to_str().unwrap(), "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
