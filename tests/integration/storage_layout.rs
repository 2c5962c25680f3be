//! Layout and naming of saved captures.

use std::fs;

use snapcrop::storage::{FixedClock, ImageStore, StorageRoot};

use crate::common::fixtures::{APP_ID, Workspace};

#[test]
fn capture_lands_under_app_scoped_images_dir() {
    let ws = Workspace::new();
    let store = ws.store(42);
    let saved = store.save_jpeg(b"\xFF\xD8jpeg").unwrap();

    let expected = ws
        .storage_root()
        .join("Android/data")
        .join(APP_ID)
        .join("Images/42.jpg");
    assert_eq!(saved.path, expected);
    assert_eq!(fs::read(&expected).unwrap(), b"\xFF\xD8jpeg");
}

#[test]
fn image_dir_is_created_on_first_save_only() {
    let ws = Workspace::new();
    assert!(!ws.image_dir().exists());

    ws.store(1).save_jpeg(b"one").unwrap();
    assert!(ws.image_dir().is_dir());

    ws.store(2).save_jpeg(b"two").unwrap();
    assert_eq!(ws.stored_files().len(), 2);
}

#[test]
fn saves_in_the_same_millisecond_share_a_name() {
    let ws = Workspace::new();
    let store = ws.store(7);
    store.save_jpeg(b"first").unwrap();
    let second = store.save_jpeg(b"second").unwrap();

    assert_eq!(ws.stored_files(), vec![second.path.clone()]);
    assert_eq!(fs::read(second.path).unwrap(), b"second");
}

#[test]
fn storage_root_that_is_a_file_is_unavailable() {
    let ws = Workspace::new();
    let file_root = ws.path().join("not-a-dir");
    fs::write(&file_root, b"x").unwrap();
    let store = ImageStore::with_clock(
        StorageRoot::new(&file_root),
        APP_ID,
        Box::new(FixedClock(1)),
    );

    assert!(!store.root().is_mounted());
    assert!(store.save_jpeg(b"data").is_none());
    assert!(store.list().is_err());
}

#[test]
fn blocked_image_dir_yields_no_file() {
    let ws = Workspace::new();
    // A regular file where the `Android` directory should be.
    fs::write(ws.storage_root().join("Android"), b"").unwrap();

    assert!(ws.store(5).save_jpeg(b"data").is_none());
    assert!(ws.stored_files().is_empty());
}

#[test]
fn history_lists_only_timestamp_named_jpegs_oldest_first() {
    let ws = Workspace::new();
    ws.store(300).save_jpeg(b"c").unwrap();
    ws.store(100).save_jpeg(b"a").unwrap();
    ws.store(200).save_jpeg(b"bb").unwrap();
    fs::write(ws.image_dir().join("notes.jpg"), b"").unwrap();
    fs::write(ws.image_dir().join("400.png"), b"").unwrap();

    let files = ws.store(0).list().unwrap();
    let stamps: Vec<i64> = files.iter().map(|f| f.timestamp_ms).collect();
    assert_eq!(stamps, vec![100, 200, 300]);
    assert_eq!(files[1].size_bytes, 2);
}

#[test]
fn history_of_fresh_root_is_empty() {
    let ws = Workspace::new();
    assert!(ws.store(0).list().unwrap().is_empty());
}
