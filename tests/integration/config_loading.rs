//! Configuration files and the desktop host built from them.

use snapcrop::config::{AppConfig, PermissionPolicy, load_config, load_file};
use snapcrop::controller::{CaptureController, run_workflow};
use snapcrop::error::CaptureError;
use snapcrop::host::{Capability, DesktopHost};
use snapcrop::output::{OutputMode, RobotFormat};
use snapcrop::state::WorkflowState;
use snapcrop::storage::{ImageStore, StorageRoot};

use crate::common::fixtures::{APP_ID, Workspace};
use crate::common::init_test_logging;

fn robot_output() -> Box<dyn snapcrop::output::Output> {
    OutputMode::Robot(RobotFormat::JsonCompact).into_output()
}

fn store_for(config: &AppConfig) -> ImageStore {
    let root = config
        .storage_root
        .clone()
        .map_or_else(StorageRoot::unmounted, StorageRoot::new);
    ImageStore::new(root, config.app_id.clone())
}

fn granted_config() -> String {
    format!(
        r#"
app_id = "{APP_ID}"
storage_root = "sdcard"
camera_source = "still.png"
preview_path = "preview.png"

[permissions]
camera = "granted"
storage = "granted"
"#
    )
}

#[test]
fn relative_paths_resolve_against_config_dir() {
    let ws = Workspace::new();
    let path = ws.write_config(
        r#"
camera_source = "stills/cat.png"
preview_path = "out/preview.png"
"#,
    );
    let loaded = load_file(&path).unwrap();
    let base = ws.path().canonicalize().unwrap();

    assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
    assert_eq!(
        loaded.config.camera_source,
        Some(base.join("stills/cat.png"))
    );
    assert_eq!(loaded.config.preview_path, Some(base.join("out/preview.png")));
    assert_eq!(loaded.config.app_id, snapcrop::config::DEFAULT_APP_ID);
}

#[test]
fn explicit_missing_config_is_an_error() {
    let ws = Workspace::new();
    let err = load_config(Some(&ws.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, CaptureError::ConfigNotFound { .. }));
}

#[test]
fn unknown_keys_are_rejected_with_file_name() {
    let ws = Workspace::new();
    let path = ws.write_config("camera = \"front\"\n");
    let err = load_file(&path).unwrap_err();
    assert!(matches!(err, CaptureError::ConfigParse(_)));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn permission_policies_parse() {
    let config = AppConfig::from_toml(
        r#"
[permissions]
camera = "denied"
"#,
    )
    .unwrap();
    assert_eq!(
        config.permissions.policy(Capability::Camera),
        PermissionPolicy::Denied
    );
    assert_eq!(
        config.permissions.policy(Capability::StorageWrite),
        PermissionPolicy::Ask
    );
}

#[test]
fn desktop_workflow_saves_crops_and_writes_preview() {
    init_test_logging();
    let ws = Workspace::new();
    ws.write_still("still.png", 640, 480);
    let path = ws.write_config(&granted_config());
    let config = load_file(&path).unwrap().config;

    let host = DesktopHost::new(&config, robot_output());
    let mut ctl = CaptureController::new(host, store_for(&config));

    assert_eq!(run_workflow(&mut ctl), WorkflowState::Displayed);
    assert_eq!(ws.stored_files().len(), 1);

    let saved = image::open(&ws.stored_files()[0]).unwrap();
    assert_eq!((saved.width(), saved.height()), (160, 120));

    let preview = image::open(ws.path().join("preview.png")).unwrap();
    assert_eq!((preview.width(), preview.height()), (256, 256));
}

#[test]
fn desktop_denied_policy_closes_screen() {
    let ws = Workspace::new();
    ws.write_still("still.png", 64, 64);
    let body = granted_config().replace("storage = \"granted\"", "storage = \"denied\"");
    let config = load_file(&ws.write_config(&body)).unwrap().config;

    let host = DesktopHost::new(&config, robot_output());
    let mut ctl = CaptureController::new(host, store_for(&config));

    assert_eq!(run_workflow(&mut ctl), WorkflowState::Finished);
    assert!(ctl.host().is_finished());
    assert_eq!(ctl.outcome().denied, Some(Capability::StorageWrite));
    assert!(ws.stored_files().is_empty());
}

#[test]
fn desktop_assume_yes_answers_ask_prompts() {
    let ws = Workspace::new();
    ws.write_still("still.png", 64, 64);
    let body = granted_config()
        .replace("camera = \"granted\"", "camera = \"ask\"")
        .replace("storage = \"granted\"", "storage = \"ask\"");
    let config = load_file(&ws.write_config(&body)).unwrap().config;

    let host = DesktopHost::new(&config, robot_output()).assume_yes();
    let mut ctl = CaptureController::new(host, store_for(&config));

    assert_eq!(run_workflow(&mut ctl), WorkflowState::Displayed);
}

#[test]
fn desktop_unreadable_source_reports_capture_failure() {
    let ws = Workspace::new();
    std::fs::write(ws.path().join("still.png"), b"not a png").unwrap();
    let config = load_file(&ws.write_config(&granted_config()))
        .unwrap()
        .config;

    let host = DesktopHost::new(&config, robot_output());
    let mut ctl = CaptureController::new(host, store_for(&config));

    assert_eq!(run_workflow(&mut ctl), WorkflowState::Idle);
    assert!(ws.stored_files().is_empty());
    assert!(ctl.last_saved().is_none());
}
