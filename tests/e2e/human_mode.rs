//! Human-mode end-to-end tests.

use predicates::prelude::*;

use crate::common::fixtures::Workspace;
use crate::{capture_args, snapcrop};

#[test]
fn human_capture_prints_success_notice() {
    let ws = Workspace::new();
    let still = ws.write_still("still.png", 200, 100);
    snapcrop(&ws)
        .args(capture_args(&ws, &still))
        .assert()
        .success()
        .stdout(predicate::str::contains("Image cropped successfully"));
    assert_eq!(ws.stored_files().len(), 1);
}

#[test]
fn human_missing_source_prints_unsupported_notice() {
    let ws = Workspace::new();
    snapcrop(&ws)
        .args(["capture", "-y", "--storage-root"])
        .arg(ws.storage_root())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Device doesn't support image capture"))
        .stderr(predicate::str::contains("[ERR]"));
}

#[test]
fn human_unreadable_source_prints_capture_failure() {
    let ws = Workspace::new();
    let bogus = ws.path().join("broken.png");
    std::fs::write(&bogus, b"not an image").unwrap();
    snapcrop(&ws)
        .args(capture_args(&ws, &bogus))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Unable to capture image"));
    assert!(ws.stored_files().is_empty());
}

#[test]
fn human_denied_config_closes_screen() {
    let ws = Workspace::new();
    let still = ws.write_still("still.png", 64, 64);
    let config = ws.write_config("[permissions]\ncamera = \"denied\"\n");
    snapcrop(&ws)
        .arg("--config")
        .arg(&config)
        .args(capture_args(&ws, &still))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Permission required"));
    assert!(ws.stored_files().is_empty());
}

#[test]
fn config_path_prints_explicit_file() {
    let ws = Workspace::new();
    let config = ws.write_config("");
    snapcrop(&ws)
        .args(["config", "--path", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains(config.display().to_string()));
}

#[test]
fn config_path_defaults_under_config_home() {
    let ws = Workspace::new();
    snapcrop(&ws)
        .args(["config", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("snapcrop/config.toml"));
}

#[test]
fn missing_explicit_config_is_reported() {
    let ws = Workspace::new();
    snapcrop(&ws)
        .args(["--config", "absent.toml", "history"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn completions_mention_binary() {
    let ws = Workspace::new();
    snapcrop(&ws)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("snapcrop"));
}
